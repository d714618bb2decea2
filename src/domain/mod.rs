//! Domain models for noisemon
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod monitor;
pub mod severity;
pub mod smoothing;

pub use monitor::{MonitorConfig, MonitorStats};
pub use severity::{ClassificationMode, Severity, Thresholds};
pub use smoothing::SmoothingFactor;
