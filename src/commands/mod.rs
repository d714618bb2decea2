//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod classify;
pub mod config;
pub mod run;

pub use classify::run_classify;
pub use config::run_config;
pub use run::run_monitor;

use crate::cli::args::ModeArg;
use crate::config::{Config, ConfigBuilder};
use crate::error::Result;

/// Configuration after file loading and CLI overrides
pub fn effective_config(
    path: Option<&str>,
    mode: Option<ModeArg>,
    sample_interval_ms: Option<u64>,
) -> Result<Config> {
    let config = ConfigBuilder::new()
        .with_file(path)?
        .with_mode(mode.map(Into::into))
        .with_sample_interval(sample_interval_ms)
        .build()?;
    Ok(config)
}
