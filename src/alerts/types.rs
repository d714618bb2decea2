//! Alert system types

use crate::domain::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the alert state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPhase {
    /// Severity below elevated, nothing pending
    #[default]
    Idle,
    /// Severity elevated, sustained-elevation timer running
    Elevated,
    /// Alerts suppressed until the cooldown expires
    Cooldown,
}

impl fmt::Display for AlertPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Elevated => write!(f, "ELEVATED"),
            Self::Cooldown => write!(f, "COOLDOWN"),
        }
    }
}

/// Copy of the state machine's bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AlertState {
    pub phase: AlertPhase,
    /// Latest observed severity was elevated or worse
    pub elevated: bool,
    pub elevation_start_ms: Option<u64>,
    /// Alerts fired since the last cooldown
    pub alert_count: u32,
    /// Consecutive alerts inside the rapid-trigger window
    pub rapid_trigger_count: u32,
    pub last_trigger_ms: Option<u64>,
    pub in_cooldown: bool,
    pub cooldown_start_ms: Option<u64>,
    pub current_cooldown_ms: u64,
    /// Cooldowns entered shortly after the previous one ended
    pub consecutive_cooldowns: u32,
}

/// Instruction to sound an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertEvent {
    /// Clock reading when the alert fired
    pub fired_at_ms: u64,
    /// Severity that caused it
    pub severity: Severity,
    /// Position of this alert since the last cooldown (1-based)
    pub alert_number: u32,
    /// Consecutive rapid repeats before this one
    pub rapid_trigger_count: u32,
    /// Fired shortly after the previous alert; played louder/longer
    pub escalated: bool,
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "noise {} sustained (alert #{}{})",
            self.severity,
            self.alert_number,
            if self.escalated { ", escalated" } else { "" }
        )
    }
}
