//! Signal processor
//!
//! The engine facade: raw samples go in, smoothed levels, severity and
//! monitor statistics come out.

use super::classifier::NoiseClassifier;
use super::filter::{ExponentialFilter, SmoothedSignal};
use crate::config::SignalConfig;
use crate::domain::{MonitorConfig, Severity};
use crate::error::ConfigError;
use crate::monitors::{MonitorRegistry, StatisticsMonitor};

/// Owns the filter, classifier and monitor registry
#[derive(Debug, Clone)]
pub struct SignalProcessor {
    filter: ExponentialFilter,
    classifier: NoiseClassifier,
    monitors: MonitorRegistry,
}

impl SignalProcessor {
    /// Build a processor from validated settings
    pub fn new(config: &SignalConfig, monitors: &[MonitorConfig]) -> Self {
        Self {
            filter: ExponentialFilter::new(config.ema_alpha, config.baseline_alpha),
            classifier: NoiseClassifier::from_config(config),
            monitors: MonitorRegistry::with_monitors(monitors.iter().cloned()),
        }
    }

    /// Feed one raw reading through the filter and every monitor
    pub fn process_sample(&mut self, raw_value: u16, now_ms: u64) {
        self.filter.process_sample(raw_value);
        self.monitors.update_all(self.filter.current(), now_ms);
    }

    /// Apply new signal settings
    ///
    /// Nothing changes unless the whole configuration is valid. Filter state
    /// and monitor statistics survive the update.
    pub fn apply_config(&mut self, config: &SignalConfig) -> Result<(), ConfigError> {
        config.validate()?;

        self.filter
            .set_factors(config.ema_alpha, config.baseline_alpha);
        self.classifier = NoiseClassifier::from_config(config);
        log::info!(
            "Applied signal config: mode={}, alpha={}, baseline_alpha={}",
            config.mode,
            config.ema_alpha,
            config.baseline_alpha
        );
        Ok(())
    }

    pub fn get_current_value(&self) -> f64 {
        self.filter.current()
    }

    pub fn get_baseline(&self) -> f64 {
        self.filter.baseline()
    }

    pub fn signal(&self) -> SmoothedSignal {
        self.filter.signal()
    }

    /// Current severity derived from the latest smoothed values
    pub fn get_noise_category(&self) -> Severity {
        self.classifier.classify(self.filter.signal())
    }

    pub fn classifier(&self) -> &NoiseClassifier {
        &self.classifier
    }

    /// Add a monitor; `false` if the id is already taken
    pub fn add_monitor(&mut self, config: MonitorConfig) -> bool {
        self.monitors.add(config)
    }

    /// Remove a monitor; `false` if it did not exist
    pub fn remove_monitor(&mut self, id: &str) -> bool {
        self.monitors.remove(id)
    }

    /// Replace a monitor's configuration; `false` if it did not exist
    pub fn replace_monitor(&mut self, config: MonitorConfig) -> bool {
        self.monitors.replace(config)
    }

    pub fn get_monitor(&self, id: &str) -> Option<&StatisticsMonitor> {
        self.monitors.get(id)
    }

    /// Up to `count` monitors, most important first
    pub fn get_priority_monitors(&self, count: usize) -> Vec<&StatisticsMonitor> {
        self.monitors.top_by_priority(count)
    }

    pub fn monitors(&self) -> &MonitorRegistry {
        &self.monitors
    }
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self::new(&SignalConfig::default(), &MonitorConfig::defaults())
    }
}
