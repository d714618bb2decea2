//! noisemon - ambient noise monitoring library
//!
//! This library turns raw microphone readings into a smoothed noise level,
//! classifies it against a rolling baseline, keeps rolling statistics and
//! drives an escalating, rate-limited audible alert.
//!
//! # Modules
//!
//! - [`alerts`]: Alert state machine, tone plans and notifiers
//! - [`cli`]: Command-line interface definitions
//! - [`clock`]: Injectable monotonic clock
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`monitors`]: Rolling statistics monitors
//! - [`sensor`]: Raw sample sources
//! - [`services`]: Engine, control loop, snapshots and JSON API
//! - [`signal`]: Filtering and classification

pub mod alerts;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod monitors;
pub mod sensor;
pub mod services;
pub mod signal;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
