// damwatch-api: typed async client for the smart-dam telemetry service.

pub mod alerts;
pub mod client;
pub mod detection;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod transport;
pub mod valve;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
