//! Alert notification channels
//!
//! The state machine only decides that an alert fires; notifiers make it
//! audible or visible.

use super::tone::ToneSequence;
use super::types::AlertEvent;
use crate::domain::Severity;
use crate::error::Result;
use std::io::{self, Write};

/// Notification channel trait
pub trait Notifier: Send + Sync {
    /// Deliver one alert with its beep sequence
    fn notify(&self, alert: &AlertEvent, tone: &ToneSequence) -> Result<()>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Terminal notifier
///
/// Rings the terminal bell once per beep and prints a colored line.
pub struct TerminalNotifier {
    use_stderr: bool,
    use_colors: bool,
    bell: bool,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self {
            use_stderr: true,
            use_colors: Self::supports_color(),
            bell: true,
        }
    }

    /// Print to stdout instead of stderr
    pub fn stdout() -> Self {
        Self {
            use_stderr: false,
            ..Self::new()
        }
    }

    /// Message only, no bell and no colors
    pub fn quiet() -> Self {
        Self {
            use_stderr: true,
            use_colors: false,
            bell: false,
        }
    }

    fn supports_color() -> bool {
        std::env::var("TERM")
            .map(|term| term != "dumb")
            .unwrap_or(false)
    }

    fn format_alert(&self, alert: &AlertEvent, tone: &ToneSequence) -> String {
        let secs = alert.fired_at_ms / 1000;
        format!(
            "[{:02}:{:02}:{:02}] {} {} ({} beeps)",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60,
            self.format_severity(alert.severity),
            alert,
            tone.len()
        )
    }

    fn format_severity(&self, severity: Severity) -> String {
        if !self.use_colors {
            return severity.to_string();
        }

        let color_code = match severity {
            Severity::Ok => "\x1b[32m",
            Severity::Regular => "\x1b[36m",
            Severity::Elevated => "\x1b[33m",
            Severity::Critical => "\x1b[31m\x1b[1m",
        };

        format!("{}{}\x1b[0m", color_code, severity)
    }

    fn write_to(&self, out: &mut dyn Write, alert: &AlertEvent, tone: &ToneSequence) -> Result<()> {
        if self.bell {
            let bells = "\x07".repeat(tone.len());
            write!(out, "{}", bells)?;
        }
        writeln!(out, "{}", self.format_alert(alert, tone))?;
        out.flush()?;
        Ok(())
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, alert: &AlertEvent, tone: &ToneSequence) -> Result<()> {
        if self.use_stderr {
            self.write_to(&mut io::stderr().lock(), alert, tone)
        } else {
            self.write_to(&mut io::stdout().lock(), alert, tone)
        }
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

/// Log-only notifier
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, alert: &AlertEvent, tone: &ToneSequence) -> Result<()> {
        log::warn!("{} [{}ms tone]", alert, tone.total_duration_ms());
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Notification manager
///
/// Dispatches each alert to every registered channel.
pub struct NotificationManager {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Send to all channels
    ///
    /// A failing channel is logged and does not stop the others.
    pub fn notify_all(&self, alert: &AlertEvent, tone: &ToneSequence) {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(alert, tone) {
                log::warn!("Failed to notify via {}: {}", notifier.name(), e);
            }
        }
    }

    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        let mut manager = Self::new();
        manager.add_notifier(Box::new(TerminalNotifier::new()));
        manager
    }
}
