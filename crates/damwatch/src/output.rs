//! Output rendering for the operator console.
//!
//! Table views go through `tabled`, structured formats through serde.
//! Plain mode emits row identifiers for lists and compact JSON for
//! single items, so both stay scriptable. Resolved dashboard fields
//! render with their fallback provenance visible: a metric whose feeds
//! are all down must never read like a live zero.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use damwatch_core::{Resolved, Source};

use crate::cli::{ColorMode, OutputFormat};

// ── Color ────────────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Highlight an alarm word (human presence, the critical condition).
pub fn alarm(word: &str, color: bool) -> String {
    if color {
        word.red().bold().to_string()
    } else {
        word.to_string()
    }
}

/// Highlight a degraded-but-operating notice (the error banner,
/// stale-data warnings).
pub fn caution(text: &str, color: bool) -> String {
    if color {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

// ── Resolved fields ──────────────────────────────────────────────────

/// Render a resolved metric with its unit, marking fallback literals.
pub fn resolved_num(field: &Resolved<f64>, unit: &str) -> String {
    let mut out = format!("{:>6.1} {unit}", field.value);
    if field.source == Source::Fallback {
        out.push_str("  (no data)");
    }
    out
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of items in the chosen format.
///
/// Table mode builds rows via `to_row`; plain mode emits each row's
/// first column (the identifier) one per line; the structured formats
/// serialize the original data, not the display rows.
pub fn render_rows<T, R>(format: &OutputFormat, data: &[T], to_row: impl Fn(&T) -> R) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(&rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data
            .iter()
            .map(|item| first_column(&to_row(item)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render a single item in the chosen format.
///
/// Table mode uses the caller's pre-formatted detail view; plain mode
/// emits one line of compact JSON.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact | OutputFormat::Plain => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn first_column<R: Tabled>(row: &R) -> String {
    row.fields()
        .into_iter()
        .next()
        .map_or_else(String::new, std::borrow::Cow::into_owned)
}

fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[derive(serde::Serialize)]
    struct Item {
        id: String,
        value: f64,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    fn to_row(item: &Item) -> Row {
        Row {
            id: item.id.clone(),
            value: format!("{:.1}", item.value),
        }
    }

    #[test]
    fn test_plain_rows_emit_identifiers() {
        let data = vec![
            Item { id: "a1".into(), value: 1.0 },
            Item { id: "b2".into(), value: 2.0 },
        ];
        let out = render_rows(&OutputFormat::Plain, &data, to_row);
        assert_eq!(out, "a1\nb2");
    }

    #[test]
    fn test_plain_single_is_compact_json() {
        let item = Item { id: "a1".into(), value: 1.5 };
        let out = render_single(&OutputFormat::Plain, &item, |_| String::new());
        assert_eq!(out, r#"{"id":"a1","value":1.5}"#);
    }

    #[test]
    fn test_fallback_values_are_marked() {
        let live = Resolved { value: 82.0, source: Source::Readings };
        let missing = Resolved { value: 0.0, source: Source::Fallback };

        assert_eq!(resolved_num(&live, "%"), "  82.0 %");
        assert!(resolved_num(&missing, "%").ends_with("(no data)"));
    }

    #[test]
    fn test_alarm_plain_when_color_disabled() {
        assert_eq!(alarm("DETECTED", false), "DETECTED");
        assert_ne!(alarm("DETECTED", true), "DETECTED");
    }
}
