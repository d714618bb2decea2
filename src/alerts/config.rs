//! Alert configuration
//!
//! Timing, escalation and tone settings for the audible alert. Validated
//! wholesale before the state machine sees any of it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audible range accepted for alarm tones
pub const FREQUENCY_RANGE_HZ: std::ops::RangeInclusive<u32> = 20..=20_000;
/// Most beeps one alert may play
pub const MAX_BEEPS: u32 = 32;

/// Shape of the beep sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum TonePattern {
    /// Every beep at `alarm_frequency`
    #[default]
    Single,
    /// Beeps alternate between `alarm_frequency` and `alarm_frequency_2`
    TwoTone,
}

impl fmt::Display for TonePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::TwoTone => write!(f, "two_tone"),
        }
    }
}

/// Alert settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Whether audible alerts are produced at all
    pub enabled: bool,
    /// How long severity must stay elevated before the first alert
    pub elevated_threshold_ms: u64,
    /// Length of one beep
    pub beep_duration_ms: u64,
    /// Silence between beeps of one alert
    pub beep_gap_ms: u64,
    /// Minimum spacing between two alerts
    pub beep_interval_ms: u64,
    /// Alerts allowed before a cooldown is forced
    pub max_alerts: u32,
    /// Consecutive rapid alerts that force a cooldown
    pub rapid_trigger_limit: u32,
    /// Cooldown length when cooldowns are infrequent
    pub base_cooldown_ms: u64,
    /// Upper bound for escalated cooldowns
    pub max_cooldown_ms: u64,
    /// Window inside which repeats count as rapid
    pub rapid_trigger_window_ms: u64,
    /// Primary tone in Hz
    pub alarm_frequency: u32,
    /// Secondary tone in Hz (two-tone pattern)
    pub alarm_frequency_2: u32,
    /// Beep sequence shape
    pub pattern: TonePattern,
    /// Beeps per regular alert
    pub beeps: u32,
    /// Beeps per escalated alert
    pub escalated_beeps: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            elevated_threshold_ms: 5_000,
            beep_duration_ms: 100,
            beep_gap_ms: 50,
            beep_interval_ms: 500,
            max_alerts: 3,
            rapid_trigger_limit: 3,
            base_cooldown_ms: 30_000,
            max_cooldown_ms: 300_000,
            rapid_trigger_window_ms: 60_000,
            alarm_frequency: 2_000,
            alarm_frequency_2: 2_500,
            pattern: TonePattern::Single,
            beeps: 4,
            escalated_beeps: 8,
        }
    }
}

impl AlertConfig {
    /// Check every field
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elevated_threshold_ms == 0 {
            return Err(ConfigError::invalid(
                "alert.elevated_threshold_ms",
                "must be greater than 0",
            ));
        }
        if self.beep_duration_ms == 0 {
            return Err(ConfigError::invalid(
                "alert.beep_duration_ms",
                "must be greater than 0",
            ));
        }
        if self.beep_interval_ms < self.beep_duration_ms {
            return Err(ConfigError::invalid(
                "alert.beep_interval_ms",
                format!(
                    "{} is shorter than beep_duration_ms ({})",
                    self.beep_interval_ms, self.beep_duration_ms
                ),
            ));
        }
        if self.max_alerts == 0 {
            return Err(ConfigError::invalid("alert.max_alerts", "must be at least 1"));
        }
        if self.rapid_trigger_limit == 0 {
            return Err(ConfigError::invalid(
                "alert.rapid_trigger_limit",
                "must be at least 1",
            ));
        }
        if self.base_cooldown_ms == 0 {
            return Err(ConfigError::invalid(
                "alert.base_cooldown_ms",
                "must be greater than 0",
            ));
        }
        if self.max_cooldown_ms < self.base_cooldown_ms {
            return Err(ConfigError::invalid(
                "alert.max_cooldown_ms",
                format!(
                    "{} is shorter than base_cooldown_ms ({})",
                    self.max_cooldown_ms, self.base_cooldown_ms
                ),
            ));
        }
        if self.rapid_trigger_window_ms == 0 {
            return Err(ConfigError::invalid(
                "alert.rapid_trigger_window_ms",
                "must be greater than 0",
            ));
        }
        for (key, hz) in [
            ("alert.alarm_frequency", self.alarm_frequency),
            ("alert.alarm_frequency_2", self.alarm_frequency_2),
        ] {
            if !FREQUENCY_RANGE_HZ.contains(&hz) {
                return Err(ConfigError::invalid(
                    key,
                    format!(
                        "{} Hz is outside {}-{} Hz",
                        hz,
                        FREQUENCY_RANGE_HZ.start(),
                        FREQUENCY_RANGE_HZ.end()
                    ),
                ));
            }
        }
        if self.beeps == 0 {
            return Err(ConfigError::invalid("alert.beeps", "must be at least 1"));
        }
        if self.escalated_beeps < self.beeps {
            return Err(ConfigError::invalid(
                "alert.escalated_beeps",
                format!("{} is fewer than beeps ({})", self.escalated_beeps, self.beeps),
            ));
        }
        if self.escalated_beeps > MAX_BEEPS {
            return Err(ConfigError::invalid(
                "alert.escalated_beeps",
                format!("{} exceeds the maximum of {}", self.escalated_beeps, MAX_BEEPS),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AlertConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_alerts, 3);
        assert_eq!(config.rapid_trigger_window_ms, 60_000);
    }

    #[test]
    fn test_inverted_cooldown_bounds_rejected() {
        let config = AlertConfig {
            base_cooldown_ms: 60_000,
            max_cooldown_ms: 30_000,
            ..AlertConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("alert.max_cooldown_ms"));
    }

    #[test]
    fn test_interval_shorter_than_beep_rejected() {
        let config = AlertConfig {
            beep_duration_ms: 200,
            beep_interval_ms: 100,
            ..AlertConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_values_rejected() {
        for config in [
            AlertConfig {
                elevated_threshold_ms: 0,
                ..AlertConfig::default()
            },
            AlertConfig {
                max_alerts: 0,
                ..AlertConfig::default()
            },
            AlertConfig {
                rapid_trigger_window_ms: 0,
                ..AlertConfig::default()
            },
            AlertConfig {
                alarm_frequency: 0,
                ..AlertConfig::default()
            },
        ] {
            assert!(config.validate().is_err(), "{:?} should be rejected", config);
        }
    }

    #[test]
    fn test_beep_counts_capped() {
        let at_cap = AlertConfig {
            beeps: MAX_BEEPS,
            escalated_beeps: MAX_BEEPS,
            ..AlertConfig::default()
        };
        assert!(at_cap.validate().is_ok());

        let huge = AlertConfig {
            beeps: 4_000_000_000,
            escalated_beeps: 4_000_000_000,
            ..AlertConfig::default()
        };
        let err = huge.validate().unwrap_err();
        assert!(err.to_string().contains("alert.escalated_beeps"));

        let escalated_only = AlertConfig {
            escalated_beeps: MAX_BEEPS + 1,
            ..AlertConfig::default()
        };
        assert!(escalated_only.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AlertConfig =
            toml::from_str("max_alerts = 5\npattern = \"two_tone\"").unwrap();
        assert_eq!(config.max_alerts, 5);
        assert_eq!(config.pattern, TonePattern::TwoTone);
        assert_eq!(config.base_cooldown_ms, 30_000);
    }
}
