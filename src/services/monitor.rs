//! Control loop monitor
//!
//! Polls the clock and runs sampling, status publishing and status logging
//! on their own intervals. Alerts are evaluated on every sample.

use super::engine::Engine;
use super::interval::Interval;
use super::snapshot::{SnapshotHandle, StatusSnapshot};
use crate::alerts::{AlertEvent, NotificationManager, ToneSequence};
use crate::clock::Clock;
use crate::error::{AppError, SensorError};
use crate::sensor::SampleSource;
use serde::Serialize;

/// Monitors shown on the status display
pub const DEFAULT_TOP_MONITORS: usize = 2;

/// Outcome of [`NoiseMonitor::run`]
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub samples_processed: u64,
    pub alerts: Vec<AlertEvent>,
    pub status: StatusSnapshot,
}

/// Control loop over one sample source
pub struct NoiseMonitor<S, C> {
    engine: Engine,
    source: S,
    clock: C,
    notifier: NotificationManager,
    snapshot: SnapshotHandle,
    sample_timer: Interval,
    display_timer: Interval,
    logging_timer: Interval,
    top_k: usize,
    exhausted: bool,
}

impl<S: SampleSource, C: Clock> NoiseMonitor<S, C> {
    /// Create a monitor whose timers start at the clock's current reading
    pub fn new(engine: Engine, source: S, clock: C) -> Self {
        let start = clock.now_ms();
        let timing = &engine.config().timing;
        let sample_timer = Interval::new(timing.sample_interval_ms, start);
        let display_timer = Interval::new(timing.display_interval_ms, start);
        let logging_timer = Interval::new(timing.logging_interval_ms, start);

        Self {
            engine,
            source,
            clock,
            notifier: NotificationManager::default(),
            snapshot: SnapshotHandle::new(),
            sample_timer,
            display_timer,
            logging_timer,
            top_k: DEFAULT_TOP_MONITORS,
            exhausted: false,
        }
    }

    /// Replace the notification channels
    pub fn with_notifier(mut self, notifier: NotificationManager) -> Self {
        self.notifier = notifier;
        self
    }

    /// Number of monitors included in published snapshots
    pub fn with_top_monitors(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Handle for readers on other threads
    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.snapshot.clone()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable access for configuration and monitor management
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Whether the source has run dry
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Run whatever is due at the current clock reading
    ///
    /// Returns the alert fired during this tick, if any.
    pub fn tick(&mut self) -> Result<Option<AlertEvent>, SensorError> {
        let now = self.clock.now_ms();
        self.sync_timers();

        let mut fired = None;
        if !self.exhausted && self.sample_timer.due(now) {
            match self.source.read_sample()? {
                Some(raw) => fired = self.process(raw, now),
                None => {
                    log::info!("Sample source '{}' exhausted", self.source.name());
                    self.exhausted = true;
                }
            }
        }

        if self.display_timer.due(now) {
            self.publish();
        }

        if self.logging_timer.due(now) {
            let processor = self.engine.processor();
            log::info!(
                "Noise {:.1} (baseline {:.1}) {}, alert {}",
                processor.get_current_value(),
                processor.get_baseline(),
                processor.get_noise_category(),
                self.engine.alerts().phase()
            );
        }

        Ok(fired)
    }

    fn process(&mut self, raw: u16, now: u64) -> Option<AlertEvent> {
        let event = self.engine.process_sample(raw, now)?;
        let tone = ToneSequence::for_alert(self.engine.alerts().config(), &event);
        self.notifier.notify_all(&event, &tone);
        Some(event)
    }

    fn publish(&self) {
        let snapshot = self.engine.snapshot(self.top_k);
        log::debug!(
            "Status: {:.1}/{:.1} {} ({} samples)",
            snapshot.current,
            snapshot.baseline,
            snapshot.severity,
            snapshot.samples_processed
        );
        self.snapshot.publish(snapshot);
    }

    /// Pick up timing changes applied through the engine
    fn sync_timers(&mut self) {
        let timing = &self.engine.config().timing;
        self.sample_timer.set_period(timing.sample_interval_ms);
        self.display_timer.set_period(timing.display_interval_ms);
        self.logging_timer.set_period(timing.logging_interval_ms);
    }

    fn next_wakeup_ms(&self) -> u64 {
        self.sample_timer
            .next_due_ms()
            .min(self.display_timer.next_due_ms())
            .min(self.logging_timer.next_due_ms())
    }

    /// Run until the source is exhausted or `max_samples` were processed
    pub fn run(&mut self, max_samples: Option<u64>) -> Result<RunSummary, AppError> {
        log::info!("Monitoring '{}'", self.source.name());
        let mut alerts = Vec::new();

        loop {
            alerts.extend(self.tick()?);

            let limit_reached =
                max_samples.is_some_and(|max| self.engine.samples_processed() >= max);
            if self.exhausted || limit_reached {
                break;
            }

            self.clock.wait_until(self.next_wakeup_ms());
        }

        self.publish();
        Ok(RunSummary {
            samples_processed: self.engine.samples_processed(),
            alerts,
            status: self.snapshot.latest(),
        })
    }
}
