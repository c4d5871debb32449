//! Alert history command handler.

use tabled::Tabled;

use damwatch_core::Console;
use damwatch_core::model::AlertLog;

use crate::cli::{AlertsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Detail")]
    detail: String,
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

fn to_row(alert: &AlertLog) -> AlertRow {
    // One detail column; which measurement is present depends on the
    // alert category.
    let detail = if let Some(pct) = alert.water_level_pct {
        format!("{pct:.1} %")
    } else if let Some(cm) = alert.distance_cm {
        format!("{cm:.0} cm")
    } else if let Some(detected) = alert.detected {
        util::opt_bool(Some(detected))
    } else {
        "-".into()
    };

    AlertRow {
        id: alert.id.clone(),
        kind: alert.kind.clone(),
        level: alert.level.clone().unwrap_or_else(|| "-".into()),
        detail,
        node: alert.node_id.clone().unwrap_or_else(|| "-".into()),
        timestamp: alert.timestamp.clone(),
    }
}

pub async fn handle(
    console: &Console,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut alerts = console.alert_logs(args.kind.into()).await?;
    alerts.truncate(args.limit);

    let rendered = output::render_rows(&global.output, &alerts, to_row);
    output::print_output(&rendered, global.quiet);
    Ok(())
}
