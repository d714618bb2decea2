//! Alert state machine
//!
//! Decides whether and when an audible alert fires. Sustained elevation
//! arms it, `beep_interval_ms` rate-limits it, and repeated or rapid alerts
//! push it into a cooldown whose length grows when cooldowns come close
//! together. Producing the tone is the caller's job.

use super::config::AlertConfig;
use super::types::{AlertEvent, AlertPhase, AlertState};
use crate::domain::Severity;
use crate::error::ConfigError;

/// Escalating, rate-limited alert state machine
#[derive(Debug, Clone)]
pub struct AlertStateMachine {
    config: AlertConfig,
    phase: AlertPhase,
    elevated: bool,
    elevation_start_ms: Option<u64>,
    alert_count: u32,
    rapid_trigger_count: u32,
    last_trigger_ms: Option<u64>,
    cooldown_start_ms: Option<u64>,
    current_cooldown_ms: u64,
    consecutive_cooldowns: u32,
    last_cooldown_end_ms: Option<u64>,
}

impl AlertStateMachine {
    /// Create an idle state machine
    ///
    /// `config` is expected to have passed [`AlertConfig::validate`].
    pub fn new(config: AlertConfig) -> Self {
        let current_cooldown_ms = config.base_cooldown_ms;
        Self {
            config,
            phase: AlertPhase::Idle,
            elevated: false,
            elevation_start_ms: None,
            alert_count: 0,
            rapid_trigger_count: 0,
            last_trigger_ms: None,
            cooldown_start_ms: None,
            current_cooldown_ms,
            consecutive_cooldowns: 0,
            last_cooldown_end_ms: None,
        }
    }

    /// Advance one evaluation tick
    ///
    /// Returns the alert to sound, if any.
    pub fn update(&mut self, severity: Severity, now_ms: u64) -> Option<AlertEvent> {
        let elevated = severity.is_elevated();
        if elevated != self.elevated {
            log::debug!("Severity now {} (elevated: {})", severity, elevated);
        }
        self.elevated = elevated;

        if !self.config.enabled {
            return None;
        }

        if self.phase == AlertPhase::Cooldown {
            if !self.cooldown_expired(now_ms) {
                return None;
            }
            self.end_cooldown();
        }

        if !elevated {
            if self.phase == AlertPhase::Elevated {
                log::debug!("Noise back below elevated, alert timer cleared");
                self.phase = AlertPhase::Idle;
                self.elevation_start_ms = None;
            }
            return None;
        }

        let start = match (self.phase, self.elevation_start_ms) {
            (AlertPhase::Elevated, Some(start)) => start,
            _ => {
                log::debug!("Noise elevated, starting {}ms timer", self.config.elevated_threshold_ms);
                self.phase = AlertPhase::Elevated;
                self.elevation_start_ms = Some(now_ms);
                now_ms
            }
        };

        if now_ms.saturating_sub(start) < self.config.elevated_threshold_ms {
            return None;
        }

        if self.alert_count >= self.config.max_alerts {
            self.start_cooldown(now_ms);
            return None;
        }

        if let Some(last) = self.last_trigger_ms {
            if now_ms.saturating_sub(last) < self.config.beep_interval_ms {
                return None;
            }
        }

        Some(self.fire(severity, now_ms))
    }

    fn fire(&mut self, severity: Severity, now_ms: u64) -> AlertEvent {
        let rapid = self
            .last_trigger_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.config.rapid_trigger_window_ms);

        if rapid {
            self.rapid_trigger_count += 1;
        } else {
            self.rapid_trigger_count = 0;
        }
        self.last_trigger_ms = Some(now_ms);
        self.alert_count += 1;

        let event = AlertEvent {
            fired_at_ms: now_ms,
            severity,
            alert_number: self.alert_count,
            rapid_trigger_count: self.rapid_trigger_count,
            escalated: rapid,
        };
        log::info!("Alert: {}", event);

        if self.rapid_run_length() >= self.config.rapid_trigger_limit {
            log::info!(
                "{} alerts in quick succession, backing off",
                self.rapid_run_length()
            );
            self.start_cooldown(now_ms);
        }

        event
    }

    /// Alerts in the current rapid run, counting the one that opened it
    fn rapid_run_length(&self) -> u32 {
        self.rapid_trigger_count + 1
    }

    fn start_cooldown(&mut self, now_ms: u64) {
        let frequent = self
            .last_cooldown_end_ms
            .is_some_and(|end| now_ms.saturating_sub(end) < self.config.rapid_trigger_window_ms);

        if frequent {
            self.consecutive_cooldowns += 1;
            let multiplier = u64::from(self.consecutive_cooldowns) + 1;
            self.current_cooldown_ms = self
                .config
                .base_cooldown_ms
                .saturating_mul(multiplier)
                .min(self.config.max_cooldown_ms);
        } else {
            self.consecutive_cooldowns = 0;
            self.current_cooldown_ms = self.config.base_cooldown_ms;
        }

        self.phase = AlertPhase::Cooldown;
        self.cooldown_start_ms = Some(now_ms);
        self.alert_count = 0;
        self.rapid_trigger_count = 0;
        self.elevation_start_ms = None;

        log::info!("Entering {}ms alert cooldown", self.current_cooldown_ms);
    }

    fn cooldown_expired(&self, now_ms: u64) -> bool {
        match self.cooldown_start_ms {
            Some(start) => now_ms.saturating_sub(start) >= self.current_cooldown_ms,
            None => true,
        }
    }

    fn end_cooldown(&mut self) {
        let end = self
            .cooldown_start_ms
            .map(|start| start.saturating_add(self.current_cooldown_ms));

        self.phase = AlertPhase::Idle;
        self.cooldown_start_ms = None;
        self.elevation_start_ms = None;
        self.last_cooldown_end_ms = end;

        log::info!("Alert cooldown over");
    }

    /// Apply new settings, keeping the current state
    ///
    /// A running cooldown keeps the length it started with.
    pub fn apply_config(&mut self, config: AlertConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if self.phase != AlertPhase::Cooldown {
            self.current_cooldown_ms = config.base_cooldown_ms;
        }
        self.config = config;
        log::info!("Applied alert config");
        Ok(())
    }

    pub fn phase(&self) -> AlertPhase {
        self.phase
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Milliseconds left in the running cooldown
    pub fn cooldown_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        if self.phase != AlertPhase::Cooldown {
            return None;
        }
        let start = self.cooldown_start_ms?;
        Some(
            self.current_cooldown_ms
                .saturating_sub(now_ms.saturating_sub(start)),
        )
    }

    /// Copy of the bookkeeping
    pub fn state(&self) -> AlertState {
        AlertState {
            phase: self.phase,
            elevated: self.elevated,
            elevation_start_ms: self.elevation_start_ms,
            alert_count: self.alert_count,
            rapid_trigger_count: self.rapid_trigger_count,
            last_trigger_ms: self.last_trigger_ms,
            in_cooldown: self.phase == AlertPhase::Cooldown,
            cooldown_start_ms: self.cooldown_start_ms,
            current_cooldown_ms: self.current_cooldown_ms,
            consecutive_cooldowns: self.consecutive_cooldowns,
        }
    }
}

impl Default for AlertStateMachine {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}
