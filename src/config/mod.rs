//! Configuration system
//!
//! TOML configuration model, validation, file loading and CLI overrides.

pub mod builder;
pub mod file;
pub mod store;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;
pub use store::ConfigStore;

use crate::alerts::AlertConfig;
use crate::domain::{ClassificationMode, MonitorConfig, SmoothingFactor, Thresholds};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Loop timing
    pub timing: TimingConfig,
    /// Smoothing and classification
    pub signal: SignalConfig,
    /// Audible alerts
    pub alert: AlertConfig,
    /// Statistics monitors created at startup
    pub monitors: Vec<MonitorConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            signal: SignalConfig::default(),
            alert: AlertConfig::default(),
            monitors: MonitorConfig::defaults(),
        }
    }
}

impl Config {
    /// Check every section
    ///
    /// Duplicate monitor ids are not an error; only the first one is used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.signal.validate()?;
        self.alert.validate()?;
        for monitor in &self.monitors {
            monitor.validate()?;
        }

        let mut seen = HashSet::new();
        for monitor in &self.monitors {
            if !seen.insert(monitor.id.as_str()) {
                log::warn!("Duplicate monitor id '{}' ignored", monitor.id);
            }
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Loop timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Time between raw samples
    pub sample_interval_ms: u64,
    /// Time between status refreshes
    pub display_interval_ms: u64,
    /// Time between status log lines
    pub logging_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 50,
            display_interval_ms: 1_000,
            logging_interval_ms: 60_000,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("timing.sample_interval_ms", self.sample_interval_ms),
            ("timing.display_interval_ms", self.display_interval_ms),
            ("timing.logging_interval_ms", self.logging_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(key, "must be greater than 0"));
            }
        }
        Ok(())
    }
}

/// Smoothing and classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Fast average weight
    pub ema_alpha: SmoothingFactor,
    /// Slow baseline weight; must be smaller than `ema_alpha`
    pub baseline_alpha: SmoothingFactor,
    pub mode: ClassificationMode,
    /// Ratio mode: multipliers of the baseline
    pub thresholds: Thresholds,
    /// Absolute mode: raw level boundaries
    pub absolute_thresholds: Thresholds,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            ema_alpha: SmoothingFactor::new_unchecked(0.1),
            baseline_alpha: SmoothingFactor::new_unchecked(0.001),
            mode: ClassificationMode::Ratio,
            thresholds: Thresholds::default(),
            absolute_thresholds: Thresholds::absolute_default(),
        }
    }
}

impl SignalConfig {
    /// Check the cross-field rules the value types cannot check alone
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Re-check the value types so hand-built configs get the same guarantees
        SmoothingFactor::new(self.ema_alpha.value())?;
        SmoothingFactor::new(self.baseline_alpha.value())?;
        for thresholds in [&self.thresholds, &self.absolute_thresholds] {
            Thresholds::new(thresholds.regular(), thresholds.high(), thresholds.toxic())?;
        }

        if self.baseline_alpha >= self.ema_alpha {
            return Err(ConfigError::invalid(
                "signal.baseline_alpha",
                format!(
                    "{} must be smaller than ema_alpha ({})",
                    self.baseline_alpha, self.ema_alpha
                ),
            ));
        }
        Ok(())
    }
}
