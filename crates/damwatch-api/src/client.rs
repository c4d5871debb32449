// Telemetry service HTTP client
//
// Wraps `reqwest::Client` with base-URL path construction, status
// checking, and JSON decoding. Endpoint groups (telemetry, valve,
// detection, alerts) are implemented as inherent methods via separate
// files to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::HealthStatus;
use crate::transport::TransportConfig;

/// Raw HTTP client for the dam telemetry service.
///
/// The service speaks plain JSON with no envelope: a 2xx body decodes
/// straight into the endpoint's model, anything else maps to
/// [`Error::Http`]. Each feed endpoint fails independently — the caller
/// decides how to combine outcomes.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the service root, e.g. `http://localhost:5000`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` (tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an absolute service path (`/api/...`).
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.endpoint_url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::decode(resp).await
    }

    /// Send a POST request with a JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.endpoint_url(path)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::decode(resp).await
    }

    /// Check the status code, then decode the JSON body.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Decode {
            message: e.to_string(),
            body,
        })
    }

    // ── Liveness ─────────────────────────────────────────────────────

    /// Probe the service root.
    ///
    /// `GET /` — a healthy service answers `{"status": "ok", ...}`.
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        self.get("/").await
    }
}
