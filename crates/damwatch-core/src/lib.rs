//! Core logic for the damwatch operator console.
//!
//! Builds on `damwatch-api` and owns everything between the wire and
//! the rendering surface: the domain model, the settle-everything poll
//! cycles, snapshot freshness tracking, value resolution, the operator
//! session gate, and the valve control state machine.

pub mod config;
pub mod console;
pub mod control;
pub mod convert;
pub mod error;
pub mod model;
pub mod resolve;
pub mod session;
pub mod snapshot;

pub use config::{ConsoleConfig, TlsVerification};
pub use console::{Console, PollHandle};
pub use control::{ControlError, ControlRequest, ValveCommand};
pub use error::CoreError;
pub use resolve::{DashboardView, Resolved, Source, resolve};
pub use session::{AdminCredentials, Session};
pub use snapshot::{CycleOutcome, FeedValue, Snapshot};
