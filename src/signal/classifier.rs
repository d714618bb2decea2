//! Noise severity classification

use super::filter::SmoothedSignal;
use crate::config::SignalConfig;
use crate::domain::{ClassificationMode, Severity, Thresholds};

/// Stateless severity classifier
///
/// Holds one threshold set per mode: ratio multipliers and absolute raw
/// levels. Only the set matching the active mode is consulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseClassifier {
    mode: ClassificationMode,
    ratio: Thresholds,
    absolute: Thresholds,
}

impl NoiseClassifier {
    pub fn new(mode: ClassificationMode, ratio: Thresholds, absolute: Thresholds) -> Self {
        Self {
            mode,
            ratio,
            absolute,
        }
    }

    /// Classifier for the given signal settings
    pub fn from_config(config: &SignalConfig) -> Self {
        Self::new(config.mode, config.thresholds, config.absolute_thresholds)
    }

    /// Classify a smoothed signal
    ///
    /// In ratio mode a missing baseline (zero, negative or not finite)
    /// classifies as [`Severity::Ok`].
    pub fn classify(&self, signal: SmoothedSignal) -> Severity {
        match self.mode {
            ClassificationMode::Ratio => match signal.ratio() {
                Some(ratio) => self.ratio.level_for(ratio),
                None => Severity::Ok,
            },
            ClassificationMode::Absolute => self.absolute.level_for(signal.current),
        }
    }

    pub fn mode(&self) -> ClassificationMode {
        self.mode
    }

    /// Thresholds used by the active mode
    pub fn thresholds(&self) -> &Thresholds {
        match self.mode {
            ClassificationMode::Ratio => &self.ratio,
            ClassificationMode::Absolute => &self.absolute,
        }
    }
}

impl Default for NoiseClassifier {
    fn default() -> Self {
        Self::new(
            ClassificationMode::Ratio,
            Thresholds::default(),
            Thresholds::absolute_default(),
        )
    }
}
