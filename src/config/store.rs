//! Active configuration with last-known-good fallback

use super::Config;
use crate::domain::MonitorConfig;
use crate::error::ConfigError;
use serde_json::Value;

/// Holds the configuration currently in effect
///
/// Updates are validated as a whole before they replace the active
/// configuration, so a rejected update leaves nothing half-applied.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    active: Config,
}

impl ConfigStore {
    /// Start from `initial`, falling back to defaults if it is invalid
    pub fn new(initial: Config) -> Self {
        match initial.validate() {
            Ok(()) => Self { active: initial },
            Err(e) => {
                log::warn!("Rejected configuration, using defaults: {}", e);
                Self {
                    active: Config::default(),
                }
            }
        }
    }

    pub fn active(&self) -> &Config {
        &self.active
    }

    /// Replace the active configuration
    ///
    /// # Errors
    /// Returns the validation error and keeps the previous configuration.
    pub fn apply(&mut self, candidate: Config) -> Result<&Config, ConfigError> {
        if let Err(e) = candidate.validate() {
            log::warn!("Rejected configuration update: {}", e);
            return Err(e);
        }
        self.active = candidate;
        log::info!("Configuration updated");
        Ok(&self.active)
    }

    /// Track monitor changes made outside a full configuration update
    ///
    /// Callers pass monitors that have already been validated.
    pub(crate) fn record_monitors(&mut self, monitors: Vec<MonitorConfig>) {
        self.active.monitors = monitors;
    }

    /// Overlay a partial JSON document on the active configuration
    ///
    /// Keys absent from `patch` keep their current values. Arrays are
    /// replaced, not merged.
    pub fn apply_patch(&mut self, patch: &Value) -> Result<&Config, ConfigError> {
        if !patch.is_object() {
            return Err(ConfigError::ParseError(
                "configuration update must be a JSON object".to_string(),
            ));
        }

        let mut merged = serde_json::to_value(&self.active)?;
        merge_json(&mut merged, patch);
        let candidate: Config = serde_json::from_value(merged)?;
        self.apply(candidate)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            active: Config::default(),
        }
    }
}

fn merge_json(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClassificationMode;
    use serde_json::json;

    #[test]
    fn test_invalid_initial_falls_back_to_defaults() {
        let mut config = Config::default();
        config.alert.max_alerts = 0;
        let store = ConfigStore::new(config);
        assert_eq!(store.active(), &Config::default());
    }

    #[test]
    fn test_rejected_update_keeps_last_known_good() {
        let mut store = ConfigStore::default();

        let mut good = Config::default();
        good.alert.max_alerts = 7;
        store.apply(good.clone()).unwrap();

        let mut bad = good.clone();
        bad.alert.base_cooldown_ms = 0;
        assert!(store.apply(bad).is_err());
        assert_eq!(store.active(), &good);
    }

    #[test]
    fn test_patch_overlays_only_given_keys() {
        let mut store = ConfigStore::default();
        let patch = json!({
            "signal": { "mode": "absolute" },
            "alert": { "beep_interval_ms": 800 }
        });

        let config = store.apply_patch(&patch).unwrap();
        assert_eq!(config.signal.mode, ClassificationMode::Absolute);
        assert_eq!(config.alert.beep_interval_ms, 800);
        assert_eq!(config.alert.max_alerts, 3);
        assert_eq!(config.monitors.len(), 2);
    }

    #[test]
    fn test_invalid_patch_is_all_or_nothing() {
        let mut store = ConfigStore::default();
        let patch = json!({
            "signal": { "mode": "absolute" },
            "alert": { "max_cooldown_ms": 1 }
        });

        assert!(store.apply_patch(&patch).is_err());
        assert_eq!(store.active(), &Config::default());
    }

    #[test]
    fn test_patch_with_bad_type_rejected() {
        let mut store = ConfigStore::default();
        assert!(store.apply_patch(&json!({ "signal": { "ema_alpha": 3.0 } })).is_err());
        assert!(store.apply_patch(&json!([1, 2])).is_err());
    }
}
