// Alert log endpoints
//
// Append-only on the server side; the client only ever reads,
// newest first.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::AlertLogDto;

impl ApiClient {
    /// Fetch the alert history for one category, newest first.
    ///
    /// `GET /api/alerts/{kind}/logs`
    ///
    /// `kind` is the service's path segment: `"waterlevel"`,
    /// `"vibration"`, or `"human"`.
    pub async fn alert_logs(&self, kind: &str) -> Result<Vec<AlertLogDto>, Error> {
        debug!(kind, "fetching alert logs");
        self.get(&format!("/api/alerts/{kind}/logs")).await
    }
}
