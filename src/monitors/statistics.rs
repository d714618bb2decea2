//! Rolling statistics monitor
//!
//! One named aggregator keeping running min/max, an exponentially weighted
//! average and a bounded history of recent values.

use crate::domain::{MonitorConfig, MonitorStats, SmoothingFactor};

/// Weight of the newest value in the rolling average
const AVERAGE_ALPHA: SmoothingFactor = SmoothingFactor::new_unchecked(0.1);

/// A single statistics monitor
#[derive(Debug, Clone)]
pub struct StatisticsMonitor {
    config: MonitorConfig,
    stats: MonitorStats,
}

impl StatisticsMonitor {
    /// Create a monitor with empty statistics
    pub fn new(config: MonitorConfig) -> Self {
        let stats = MonitorStats::with_capacity(config.history_size);
        Self { config, stats }
    }

    /// Record a smoothed value observed at `now_ms`
    pub fn update(&mut self, value: f64, now_ms: u64) {
        let stats = &mut self.stats;

        if stats.is_empty() {
            stats.min = value;
            stats.max = value;
            stats.avg = value;
        } else {
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
            stats.avg = AVERAGE_ALPHA.blend(value, stats.avg);
        }
        stats.current = value;

        stats.history.push_back(value);
        while stats.history.len() > self.config.history_size {
            stats.history.pop_front();
        }

        stats.sample_count += 1;
        stats.last_update_ms = Some(now_ms);
    }

    /// Discard all statistics
    pub fn reset(&mut self) {
        self.stats = MonitorStats::with_capacity(self.config.history_size);
    }

    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn priority(&self) -> u8 {
        self.config.priority
    }
}
