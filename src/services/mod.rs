//! Service layer
//!
//! The engine, the control loop that drives it, and the read-side
//! surfaces (status snapshots and the JSON API).

pub mod api;
pub mod engine;
pub mod interval;
pub mod monitor;
pub mod snapshot;

pub use api::{ApiHandler, ApiRequest, ApiResponse, Method};
pub use engine::Engine;
pub use interval::Interval;
pub use monitor::{NoiseMonitor, RunSummary, DEFAULT_TOP_MONITORS};
pub use snapshot::{MonitorSummary, SnapshotHandle, StatusSnapshot};
