//! Noise engine
//!
//! Ties the signal processor, the alert state machine and the active
//! configuration together. Every configuration change goes through the
//! store first so a rejected update never reaches the live components.

use super::snapshot::StatusSnapshot;
use crate::alerts::{AlertEvent, AlertStateMachine};
use crate::config::{Config, ConfigStore};
use crate::domain::{MonitorConfig, Severity};
use crate::error::{ConfigError, DomainError};
use crate::monitors::StatisticsMonitor;
use crate::signal::SignalProcessor;
use serde_json::Value;
use std::collections::HashSet;

/// Signal processing, alerting and configuration state
#[derive(Debug, Clone)]
pub struct Engine {
    store: ConfigStore,
    processor: SignalProcessor,
    alerts: AlertStateMachine,
    samples_processed: u64,
    alerts_fired: u64,
    last_sample_ms: Option<u64>,
    last_severity: Severity,
}

impl Engine {
    /// Build from `config`, using defaults if it is invalid
    pub fn new(config: Config) -> Self {
        let store = ConfigStore::new(config);
        let active = store.active();
        let processor = SignalProcessor::new(&active.signal, &active.monitors);
        let alerts = AlertStateMachine::new(active.alert.clone());

        let mut engine = Self {
            store,
            processor,
            alerts,
            samples_processed: 0,
            alerts_fired: 0,
            last_sample_ms: None,
            last_severity: Severity::Ok,
        };
        engine.record_monitors();
        engine
    }

    /// Feed one raw reading and advance the alert state machine
    ///
    /// Returns the alert to sound, if any.
    pub fn process_sample(&mut self, raw_value: u16, now_ms: u64) -> Option<AlertEvent> {
        self.processor.process_sample(raw_value, now_ms);
        self.samples_processed += 1;
        self.last_sample_ms = Some(now_ms);

        let severity = self.processor.get_noise_category();
        if severity != self.last_severity {
            log::debug!("Severity {} -> {}", self.last_severity, severity);
            self.last_severity = severity;
        }
        self.alert_update(severity, now_ms)
    }

    /// Advance the alert state machine one tick
    pub fn alert_update(&mut self, severity: Severity, now_ms: u64) -> Option<AlertEvent> {
        let event = self.alerts.update(severity, now_ms);
        if event.is_some() {
            self.alerts_fired += 1;
        }
        event
    }

    /// Replace the whole configuration
    ///
    /// # Errors
    /// Nothing changes if `candidate` fails validation.
    pub fn apply_config(&mut self, candidate: Config) -> Result<(), ConfigError> {
        self.store.apply(candidate)?;
        self.push_active_config()
    }

    /// Overlay a partial JSON document on the configuration
    pub fn apply_config_patch(&mut self, patch: &Value) -> Result<(), ConfigError> {
        self.store.apply_patch(patch)?;
        self.push_active_config()
    }

    fn push_active_config(&mut self) -> Result<(), ConfigError> {
        let active = self.store.active().clone();
        self.processor.apply_config(&active.signal)?;
        self.alerts.apply_config(active.alert)?;
        self.sync_monitors(&active.monitors);
        Ok(())
    }

    /// Make the live monitors match `wanted`
    ///
    /// Unchanged monitors keep their statistics. The first of several
    /// entries with one id wins.
    fn sync_monitors(&mut self, wanted: &[MonitorConfig]) {
        let stale: Vec<String> = self
            .processor
            .monitors()
            .iter()
            .map(|m| m.id().to_string())
            .filter(|id| !wanted.iter().any(|w| &w.id == id))
            .collect();
        for id in stale {
            self.processor.remove_monitor(&id);
        }

        let mut seen = HashSet::new();
        for config in wanted {
            if !seen.insert(config.id.as_str()) {
                continue;
            }
            let unchanged = self
                .processor
                .get_monitor(&config.id)
                .map(|m| m.config() == config);
            match unchanged {
                Some(true) => {}
                Some(false) => {
                    self.processor.replace_monitor(config.clone());
                }
                None => {
                    self.processor.add_monitor(config.clone());
                }
            }
        }
        self.record_monitors();
    }

    fn record_monitors(&mut self) {
        let monitors = self
            .processor
            .monitors()
            .iter()
            .map(|m| m.config().clone())
            .collect();
        self.store.record_monitors(monitors);
    }

    /// Add a validated monitor
    ///
    /// `Ok(false)` when the id is already taken; the existing monitor stays.
    pub fn add_monitor(&mut self, config: MonitorConfig) -> Result<bool, DomainError> {
        config.validate()?;
        let added = self.processor.add_monitor(config);
        if added {
            self.record_monitors();
        }
        Ok(added)
    }

    /// Replace a monitor's configuration and reset its statistics
    ///
    /// `Ok(false)` when no monitor has that id.
    pub fn replace_monitor(&mut self, config: MonitorConfig) -> Result<bool, DomainError> {
        config.validate()?;
        let replaced = self.processor.replace_monitor(config);
        if replaced {
            self.record_monitors();
        }
        Ok(replaced)
    }

    /// Remove a monitor; unknown ids are a no-op
    pub fn remove_monitor(&mut self, id: &str) -> bool {
        let removed = self.processor.remove_monitor(id);
        if removed {
            self.record_monitors();
        }
        removed
    }

    pub fn get_monitor(&self, id: &str) -> Option<&StatisticsMonitor> {
        self.processor.get_monitor(id)
    }

    pub fn get_priority_monitors(&self, count: usize) -> Vec<&StatisticsMonitor> {
        self.processor.get_priority_monitors(count)
    }

    pub fn config(&self) -> &Config {
        self.store.active()
    }

    pub fn processor(&self) -> &SignalProcessor {
        &self.processor
    }

    pub fn alerts(&self) -> &AlertStateMachine {
        &self.alerts
    }

    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    pub fn alerts_fired(&self) -> u64 {
        self.alerts_fired
    }

    pub fn last_sample_ms(&self) -> Option<u64> {
        self.last_sample_ms
    }

    /// Copy of the current state with the `top_k` most important monitors
    pub fn snapshot(&self, top_k: usize) -> StatusSnapshot {
        StatusSnapshot::capture(self, top_k)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertPhase;
    use crate::config::ConfigBuilder;
    use crate::domain::ClassificationMode;
    use serde_json::json;

    #[test]
    fn test_sustained_noise_fires_alert() {
        let mut engine = Engine::default();
        for t in 0..200 {
            engine.process_sample(100, t * 50);
        }

        let mut events = Vec::new();
        let mut now = 10_000;
        while now <= 16_000 {
            events.extend(engine.process_sample(1_000, now));
            now += 50;
        }

        assert!(!events.is_empty());
        assert_eq!(engine.alerts_fired(), events.len() as u64);
        assert_eq!(engine.samples_processed(), 200 + 121);
    }

    #[test]
    fn test_invalid_config_leaves_engine_untouched() {
        let mut engine = Engine::default();
        let mut candidate = Config::default();
        candidate.signal.mode = ClassificationMode::Absolute;
        candidate.alert.beeps = 0;

        assert!(engine.apply_config(candidate).is_err());
        assert_eq!(engine.config(), &Config::default());
        assert_eq!(engine.processor().classifier().mode(), ClassificationMode::Ratio);
    }

    #[test]
    fn test_absolute_mode_keeps_quiet_room_ok() {
        let config = ConfigBuilder::new()
            .with_mode(Some(ClassificationMode::Absolute))
            .build()
            .unwrap();
        let mut engine = Engine::new(config);
        for t in 0..400 {
            assert!(engine.process_sample(100, t * 50).is_none());
        }
        assert_eq!(engine.processor().get_noise_category(), Severity::Ok);
        assert_eq!(engine.alerts_fired(), 0);

        // Switching a running ratio engine over behaves the same
        let mut engine = Engine::default();
        engine.process_sample(100, 0);
        engine
            .apply_config_patch(&json!({ "signal": { "mode": "absolute" } }))
            .unwrap();
        engine.process_sample(100, 50);
        assert_eq!(engine.processor().get_noise_category(), Severity::Ok);

        engine.process_sample(3_000, 100);
        assert!(engine.processor().get_noise_category() > Severity::Ok);
    }

    #[test]
    fn test_config_patch_reaches_components() {
        let mut engine = Engine::default();
        engine
            .apply_config_patch(&json!({ "alert": { "enabled": false } }))
            .unwrap();
        assert!(!engine.alerts().config().enabled);

        for t in 0..400 {
            let event = engine.alert_update(Severity::Critical, t * 100);
            assert!(event.is_none());
        }
        assert_eq!(engine.alerts().phase(), AlertPhase::Idle);
    }

    #[test]
    fn test_config_monitors_are_synced() {
        let mut engine = Engine::default();
        engine.process_sample(100, 0);

        let mut candidate = Config::default();
        candidate.monitors.remove(1);
        candidate
            .monitors
            .push(MonitorConfig::new("10s", "10 Seconds", 10_000, 0));
        engine.apply_config(candidate).unwrap();

        assert!(engine.get_monitor("5min").is_none());
        assert_eq!(engine.get_monitor("10s").unwrap().stats().sample_count, 0);
        // untouched monitor keeps its statistics
        assert_eq!(engine.get_monitor("1min").unwrap().stats().sample_count, 1);
    }

    #[test]
    fn test_monitor_crud_updates_config() {
        let mut engine = Engine::default();
        assert!(engine
            .add_monitor(MonitorConfig::new("10s", "10 Seconds", 10_000, 0))
            .unwrap());
        assert!(!engine
            .add_monitor(MonitorConfig::new("10s", "Again", 10_000, 4))
            .unwrap());
        assert_eq!(engine.config().monitors.len(), 3);

        assert!(engine
            .add_monitor(MonitorConfig::new("bad", "Bad", 10, 0))
            .is_err());

        assert!(engine.remove_monitor("10s"));
        assert!(!engine.remove_monitor("10s"));
        assert_eq!(engine.config().monitors.len(), 2);
    }
}
