// Valve endpoints
//
// One read feed (status) and the single write endpoint of the whole
// service (control). All gating happens client-side in damwatch-core
// before a control request is ever constructed.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ControlAck, ValveControlRequest, ValveStatusDto};

impl ApiClient {
    /// Fetch the authoritative valve state.
    ///
    /// `GET /api/valve/status`
    pub async fn valve_status(&self) -> Result<ValveStatusDto, Error> {
        debug!("fetching valve status");
        self.get("/api/valve/status").await
    }

    /// Issue a valve control command.
    ///
    /// `POST /api/valve/control` — the service is the ultimate authority;
    /// the new state only becomes visible through the next status poll.
    pub async fn valve_control(&self, request: &ValveControlRequest) -> Result<ControlAck, Error> {
        debug!(mode = %request.mode, command = %request.command, "sending valve control");
        self.post("/api/valve/control", request).await
    }
}
