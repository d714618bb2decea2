//! Audible alerting
//!
//! Turns a stream of severities into rate-limited, escalating alerts with
//! cooldowns, and hands them to notification channels.

mod config;
mod machine;
mod notifier;
mod tone;
mod types;

pub use config::{AlertConfig, TonePattern, FREQUENCY_RANGE_HZ, MAX_BEEPS};
pub use machine::AlertStateMachine;
pub use notifier::{LogNotifier, NotificationManager, Notifier, TerminalNotifier};
pub use tone::{Beep, ToneSequence};
pub use types::{AlertEvent, AlertPhase, AlertState};
