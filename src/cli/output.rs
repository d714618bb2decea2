//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::domain::{ClassificationMode, Severity, Thresholds};
use crate::services::{MonitorSummary, RunSummary, StatusSnapshot};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

fn format_ratio(ratio: Option<f64>) -> String {
    ratio
        .map(|r| format!("{:.2}", r))
        .unwrap_or_else(|| "n/a".to_string())
}

impl TableDisplay for MonitorSummary {
    fn to_table(&self) -> String {
        format!(
            "{:<12} cur {:>7.1}  min {:>7.1}  max {:>7.1}  avg {:>7.1}  ({} samples)",
            self.label, self.current, self.min, self.max, self.avg, self.sample_count
        )
    }

    fn to_compact(&self) -> String {
        format!("{}={:.1}", self.id, self.avg)
    }
}

impl TableDisplay for StatusSnapshot {
    fn to_table(&self) -> String {
        let mut output = format!(
            "Noise:    {:.1} (baseline {:.1}, ratio {})\n",
            self.current,
            self.baseline,
            format_ratio(self.ratio)
        );
        output.push_str(&format!("Severity: {} [{}]\n", self.severity, self.mode));

        output.push_str(&format!("Alert:    {}", self.alert.phase));
        if self.alert.in_cooldown {
            output.push_str(&format!(" ({}ms)", self.alert.current_cooldown_ms));
        }
        output.push('\n');

        output.push_str(&format!(
            "Samples:  {} processed, {} alerts fired\n",
            self.samples_processed, self.alerts_fired
        ));

        if !self.monitors.is_empty() {
            output.push_str("\nMonitors:\n");
            for monitor in &self.monitors {
                output.push_str(&format!("  {}\n", monitor.to_table()));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        let mut parts = vec![
            format!("{:.1}/{:.1}", self.current, self.baseline),
            self.severity.to_string(),
            self.alert.phase.to_string(),
        ];
        parts.extend(self.monitors.iter().map(|m| m.to_compact()));
        parts.join(" ")
    }
}

impl TableDisplay for RunSummary {
    fn to_table(&self) -> String {
        let mut output = self.status.to_table();

        if self.alerts.is_empty() {
            output.push_str("\nNo alerts fired\n");
        } else {
            output.push_str(&format!("\nAlerts ({}):\n", self.alerts.len()));
            for alert in &self.alerts {
                output.push_str(&format!("  [{:>8}ms] {}\n", alert.fired_at_ms, alert));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "samples={} alerts={} {}",
            self.samples_processed,
            self.alerts.len(),
            self.status.to_compact()
        )
    }
}

/// Result of classifying a single reading
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub current: f64,
    pub baseline: f64,
    pub ratio: Option<f64>,
    pub mode: ClassificationMode,
    pub thresholds: Thresholds,
    pub severity: Severity,
}

impl TableDisplay for ClassificationReport {
    fn to_table(&self) -> String {
        format!(
            "Current:    {:.2}\nBaseline:   {:.2}\nRatio:      {}\nMode:       {}\nThresholds: {} / {} / {}\nSeverity:   {}",
            self.current,
            self.baseline,
            format_ratio(self.ratio),
            self.mode,
            self.thresholds.regular(),
            self.thresholds.high(),
            self.thresholds.toxic(),
            self.severity
        )
    }

    fn to_compact(&self) -> String {
        self.severity.to_string()
    }
}

/// Effective configuration and where it came from
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    pub source: Option<String>,
    pub config: Config,
}

impl TableDisplay for ConfigView {
    fn to_table(&self) -> String {
        let source = self.source.as_deref().unwrap_or("built-in defaults");
        let body = self
            .config
            .to_toml()
            .unwrap_or_else(|e| format!("# unable to render: {}", e));
        format!("# source: {}\n{}", source, body)
    }

    fn to_compact(&self) -> String {
        format!(
            "mode={} alpha={} baseline_alpha={} monitors={}",
            self.config.signal.mode,
            self.config.signal.ema_alpha,
            self.config.signal.baseline_alpha,
            self.config.monitors.len()
        )
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}
