//! Status snapshots for display and API readers
//!
//! The engine is owned by the control loop; everyone else reads copies
//! published through a [`SnapshotHandle`].

use super::engine::Engine;
use crate::alerts::AlertState;
use crate::domain::{ClassificationMode, Severity};
use crate::monitors::StatisticsMonitor;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// One monitor as shown on the status display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorSummary {
    pub id: String,
    pub label: String,
    pub period_ms: u64,
    pub priority: u8,
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub sample_count: u64,
    pub history: Vec<f64>,
}

impl From<&StatisticsMonitor> for MonitorSummary {
    fn from(monitor: &StatisticsMonitor) -> Self {
        let config = monitor.config();
        let stats = monitor.stats();
        let (min, max) = stats.min_max();

        Self {
            id: config.id.clone(),
            label: config.label.clone(),
            period_ms: config.period_ms,
            priority: config.priority,
            current: stats.current,
            min,
            max,
            avg: stats.avg,
            sample_count: stats.sample_count,
            history: stats.history.iter().copied().collect(),
        }
    }
}

/// Point-in-time copy of the engine state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    /// Clock reading of the last processed sample
    pub timestamp_ms: Option<u64>,
    pub current: f64,
    pub baseline: f64,
    /// `current / baseline`, when the baseline is usable
    pub ratio: Option<f64>,
    pub severity: Severity,
    pub mode: ClassificationMode,
    pub alert: AlertState,
    pub samples_processed: u64,
    pub alerts_fired: u64,
    /// Most important monitors first
    pub monitors: Vec<MonitorSummary>,
}

impl StatusSnapshot {
    pub fn capture(engine: &Engine, top_k: usize) -> Self {
        let processor = engine.processor();
        let current = processor.get_current_value();
        let baseline = processor.get_baseline();
        let ratio = processor.signal().ratio();

        Self {
            timestamp_ms: engine.last_sample_ms(),
            current,
            baseline,
            ratio,
            severity: processor.get_noise_category(),
            mode: processor.classifier().mode(),
            alert: engine.alerts().state(),
            samples_processed: engine.samples_processed(),
            alerts_fired: engine.alerts_fired(),
            monitors: engine
                .get_priority_monitors(top_k)
                .into_iter()
                .map(MonitorSummary::from)
                .collect(),
        }
    }
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            timestamp_ms: None,
            current: 0.0,
            baseline: 0.0,
            ratio: None,
            severity: Severity::Ok,
            mode: ClassificationMode::default(),
            alert: AlertState::default(),
            samples_processed: 0,
            alerts_fired: 0,
            monitors: Vec::new(),
        }
    }
}

/// Shared, latest-wins snapshot slot
#[derive(Debug, Clone, Default)]
pub struct SnapshotHandle {
    inner: Arc<RwLock<StatusSnapshot>>,
}

impl SnapshotHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published snapshot
    pub fn publish(&self, snapshot: StatusSnapshot) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = snapshot;
    }

    /// Copy of the latest snapshot
    pub fn latest(&self) -> StatusSnapshot {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
