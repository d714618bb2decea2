//! Statistics monitor domain types
//!
//! Configuration and statistics records for rolling noise monitors.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Shortest accepted aggregation period
pub const MIN_PERIOD_MS: u64 = 1000;
/// Largest accepted priority value
pub const MAX_PRIORITY: u8 = 99;
/// Largest accepted history length
pub const MAX_HISTORY_SIZE: usize = 255;

fn default_history_size() -> usize {
    60
}

fn default_priority() -> u8 {
    MAX_PRIORITY
}

/// Monitor configuration
///
/// Lower `priority` values are displayed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Unique identifier used by the API
    pub id: String,
    /// Display label
    pub label: String,
    /// Aggregation period in milliseconds
    pub period_ms: u64,
    /// Display priority (lower = higher priority); unset sorts last
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Number of historical points to keep
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl MonitorConfig {
    /// Create a monitor configuration with the default history length
    pub fn new(id: impl Into<String>, label: impl Into<String>, period_ms: u64, priority: u8) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            period_ms,
            priority,
            history_size: default_history_size(),
        }
    }

    /// Set the history length
    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }

    /// Check the configuration against the accepted ranges
    ///
    /// # Errors
    /// Returns `DomainError::InvalidMonitor` naming the first violated rule.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fail = |message: String| DomainError::InvalidMonitor {
            id: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(fail("id must not be empty".to_string()));
        }
        if self.label.trim().is_empty() {
            return Err(fail("label must not be empty".to_string()));
        }
        if self.period_ms < MIN_PERIOD_MS {
            return Err(fail(format!(
                "period_ms {} is below the minimum of {}",
                self.period_ms, MIN_PERIOD_MS
            )));
        }
        if self.priority > MAX_PRIORITY {
            return Err(fail(format!(
                "priority {} exceeds the maximum of {}",
                self.priority, MAX_PRIORITY
            )));
        }
        if self.history_size == 0 || self.history_size > MAX_HISTORY_SIZE {
            return Err(fail(format!(
                "history_size {} must be between 1 and {}",
                self.history_size, MAX_HISTORY_SIZE
            )));
        }

        Ok(())
    }

    /// The monitors every fresh installation starts with
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("1min", "1 Minute", 60_000, 1),
            Self::new("5min", "5 Minutes", 300_000, 2),
        ]
    }
}

/// Running statistics of one monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorStats {
    /// Most recent value
    pub current: f64,
    /// Smallest value seen
    pub min: f64,
    /// Largest value seen
    pub max: f64,
    /// Exponentially weighted average
    pub avg: f64,
    /// Most recent values, oldest first
    pub history: VecDeque<f64>,
    /// Number of values seen
    pub sample_count: u64,
    /// Clock reading of the last update
    pub last_update_ms: Option<u64>,
}

impl MonitorStats {
    /// Empty statistics with room for `history_size` points
    pub fn with_capacity(history_size: usize) -> Self {
        Self {
            current: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            avg: 0.0,
            history: VecDeque::with_capacity(history_size),
            sample_count: 0,
            last_update_ms: None,
        }
    }

    /// Whether no value has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// `(min, max)` for reporting; `(0, 0)` before the first value
    pub fn min_max(&self) -> (f64, f64) {
        if self.is_empty() {
            (0.0, 0.0)
        } else {
            (self.min, self.max)
        }
    }
}

impl Default for MonitorStats {
    fn default() -> Self {
        Self::with_capacity(default_history_size())
    }
}
