//! Beep sequences for alerts

use super::config::{AlertConfig, TonePattern};
use super::types::AlertEvent;
use serde::Serialize;

/// One beep followed by silence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Beep {
    pub frequency_hz: u32,
    pub duration_ms: u64,
    /// Silence after this beep; zero for the last one
    pub gap_after_ms: u64,
}

/// Beeps to play for one alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToneSequence {
    beeps: Vec<Beep>,
}

impl ToneSequence {
    /// Sequence for `event`
    ///
    /// Escalated alerts get `escalated_beeps` instead of `beeps`.
    pub fn for_alert(config: &AlertConfig, event: &AlertEvent) -> Self {
        let count = if event.escalated {
            config.escalated_beeps
        } else {
            config.beeps
        };

        let beeps = (0..count)
            .map(|i| {
                let frequency_hz = match config.pattern {
                    TonePattern::TwoTone if i % 2 == 1 => config.alarm_frequency_2,
                    _ => config.alarm_frequency,
                };
                let gap_after_ms = if i + 1 < count { config.beep_gap_ms } else { 0 };
                Beep {
                    frequency_hz,
                    duration_ms: config.beep_duration_ms,
                    gap_after_ms,
                }
            })
            .collect();

        Self { beeps }
    }

    pub fn beeps(&self) -> &[Beep] {
        &self.beeps
    }

    pub fn len(&self) -> usize {
        self.beeps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beeps.is_empty()
    }

    /// Time from the first beep starting to the last one ending
    pub fn total_duration_ms(&self) -> u64 {
        self.beeps
            .iter()
            .map(|b| b.duration_ms + b.gap_after_ms)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    fn event(escalated: bool) -> AlertEvent {
        AlertEvent {
            fired_at_ms: 0,
            severity: Severity::Elevated,
            alert_number: 1,
            rapid_trigger_count: u32::from(escalated),
            escalated,
        }
    }

    #[test]
    fn test_regular_alert_sequence() {
        let config = AlertConfig::default();
        let tone = ToneSequence::for_alert(&config, &event(false));

        assert_eq!(tone.len(), 4);
        assert!(tone.beeps().iter().all(|b| b.frequency_hz == 2_000));
        assert_eq!(tone.beeps()[3].gap_after_ms, 0);
        // 4 x 100ms beeps with 3 x 50ms gaps
        assert_eq!(tone.total_duration_ms(), 550);
    }

    #[test]
    fn test_escalated_alert_is_longer() {
        let config = AlertConfig::default();
        let regular = ToneSequence::for_alert(&config, &event(false));
        let escalated = ToneSequence::for_alert(&config, &event(true));

        assert_eq!(escalated.len(), 8);
        assert!(escalated.total_duration_ms() > regular.total_duration_ms());
    }

    #[test]
    fn test_two_tone_alternates() {
        let config = AlertConfig {
            pattern: TonePattern::TwoTone,
            ..AlertConfig::default()
        };
        let tone = ToneSequence::for_alert(&config, &event(false));
        let freqs: Vec<u32> = tone.beeps().iter().map(|b| b.frequency_hz).collect();
        assert_eq!(freqs, vec![2_000, 2_500, 2_000, 2_500]);
    }
}
