// Human-detection endpoint

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::HumanDetectionDto;

impl ApiClient {
    /// Fetch the human-presence detector status.
    ///
    /// `GET /api/human-detection/status`
    pub async fn human_detection_status(&self) -> Result<HumanDetectionDto, Error> {
        debug!("fetching human detection status");
        self.get("/api/human-detection/status").await
    }
}
