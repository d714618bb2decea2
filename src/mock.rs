//! Mock implementations for testing
//!
//! A scripted sample source and a notifier that records what it was asked
//! to play, for exercising the control loop without an ADC or speaker.

use crate::alerts::{AlertEvent, Notifier, ToneSequence};
use crate::error::{Result, SensorError};
use crate::sensor::SampleSource;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Sample source that replays a fixed list of readings
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    samples: VecDeque<u16>,
    fail_after: Option<usize>,
    read: usize,
}

impl MockSource {
    pub fn new(samples: impl IntoIterator<Item = u16>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            fail_after: None,
            read: 0,
        }
    }

    /// Builder: return an error instead of the `n`-th sample (0-based)
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Samples not yet read
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl SampleSource for MockSource {
    fn read_sample(&mut self) -> std::result::Result<Option<u16>, SensorError> {
        if self.fail_after == Some(self.read) {
            return Err(SensorError::InvalidSample {
                line: self.read + 1,
                value: "mock failure".to_string(),
            });
        }
        self.read += 1;
        Ok(self.samples.pop_front())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Notifier that keeps every alert it receives
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    record: Arc<Mutex<Vec<(AlertEvent, ToneSequence)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts received so far
    pub fn events(&self) -> Vec<AlertEvent> {
        self.record
            .lock()
            .unwrap()
            .iter()
            .map(|(event, _)| *event)
            .collect()
    }

    /// Tones received so far
    pub fn tones(&self) -> Vec<ToneSequence> {
        self.record
            .lock()
            .unwrap()
            .iter()
            .map(|(_, tone)| tone.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, alert: &AlertEvent, tone: &ToneSequence) -> Result<()> {
        self.record.lock().unwrap().push((*alert, tone.clone()));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertConfig;
    use crate::domain::Severity;

    #[test]
    fn test_mock_source_replays_then_ends() {
        let mut source = MockSource::new([1, 2]);
        assert_eq!(source.read_sample().unwrap(), Some(1));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.read_sample().unwrap(), Some(2));
        assert_eq!(source.read_sample().unwrap(), None);
    }

    #[test]
    fn test_mock_source_failure() {
        let mut source = MockSource::new([1, 2, 3]).failing_after(1);
        assert!(source.read_sample().is_ok());
        assert!(source.read_sample().is_err());
    }

    #[test]
    fn test_recording_notifier_shares_record() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();

        let event = AlertEvent {
            fired_at_ms: 5,
            severity: Severity::Elevated,
            alert_number: 1,
            rapid_trigger_count: 0,
            escalated: false,
        };
        let tone = ToneSequence::for_alert(&AlertConfig::default(), &event);
        clone.notify(&event, &tone).unwrap();

        assert_eq!(notifier.events(), vec![event]);
        assert_eq!(notifier.tones()[0].len(), 4);
    }
}
