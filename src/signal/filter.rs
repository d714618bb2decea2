//! Two-speed exponential filter
//!
//! Produces a fast-responding current level and a slow-moving ambient
//! baseline from raw ADC readings.

use crate::domain::SmoothingFactor;
use serde::Serialize;

/// Baselines at or below this are treated as undefined
pub const MIN_BASELINE: f64 = 1e-6;

/// Smoothed output of the filter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SmoothedSignal {
    /// Fast filter output
    pub current: f64,
    /// Slow filter output tracking ambient noise
    pub baseline: f64,
}

impl SmoothedSignal {
    /// `current / baseline`, or `None` while the baseline is unusable
    ///
    /// Zero, negative and non-finite baselines are unusable.
    pub fn ratio(&self) -> Option<f64> {
        if self.baseline.is_finite() && self.baseline > MIN_BASELINE {
            Some(self.current / self.baseline)
        } else {
            None
        }
    }
}

/// Exponential moving average filter pair
#[derive(Debug, Clone)]
pub struct ExponentialFilter {
    alpha: SmoothingFactor,
    beta: SmoothingFactor,
    signal: SmoothedSignal,
    seeded: bool,
}

impl ExponentialFilter {
    /// Create a filter with fast factor `alpha` and slow factor `beta`
    pub fn new(alpha: SmoothingFactor, beta: SmoothingFactor) -> Self {
        Self {
            alpha,
            beta,
            signal: SmoothedSignal::default(),
            seeded: false,
        }
    }

    /// Feed one raw reading
    ///
    /// The first reading seeds both outputs so neither warms up from zero.
    pub fn process_sample(&mut self, raw: u16) {
        let raw = f64::from(raw);

        if !self.seeded {
            self.signal.current = raw;
            self.signal.baseline = raw;
            self.seeded = true;
            return;
        }

        self.signal.current = self.alpha.blend(raw, self.signal.current);
        self.signal.baseline = self.beta.blend(self.signal.current, self.signal.baseline);
    }

    /// Swap smoothing factors, keeping the filter state
    pub fn set_factors(&mut self, alpha: SmoothingFactor, beta: SmoothingFactor) {
        self.alpha = alpha;
        self.beta = beta;
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.signal.current
    }

    #[inline]
    pub fn baseline(&self) -> f64 {
        self.signal.baseline
    }

    #[inline]
    pub fn signal(&self) -> SmoothedSignal {
        self.signal
    }

    /// Whether at least one sample has been processed
    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }
}

impl Default for ExponentialFilter {
    fn default() -> Self {
        Self::new(
            SmoothingFactor::new_unchecked(0.1),
            SmoothingFactor::new_unchecked(0.001),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(alpha: f64, beta: f64) -> ExponentialFilter {
        ExponentialFilter::new(
            SmoothingFactor::new(alpha).unwrap(),
            SmoothingFactor::new(beta).unwrap(),
        )
    }

    #[test]
    fn test_first_sample_seeds_baseline() {
        let mut f = filter(0.1, 0.001);
        assert!(!f.is_seeded());
        f.process_sample(512);

        assert!(f.is_seeded());
        assert_eq!(f.current(), 512.0);
        assert_eq!(f.baseline(), f.current());
    }

    #[test]
    fn test_baseline_never_zero_after_nonzero_start() {
        let mut f = filter(0.5, 0.01);
        f.process_sample(100);
        for _ in 0..1000 {
            f.process_sample(0);
            assert!(f.baseline() > 0.0);
        }
    }

    #[test]
    fn test_current_reacts_faster_than_baseline() {
        let mut f = filter(0.1, 0.001);
        f.process_sample(100);
        for _ in 0..50 {
            f.process_sample(300);
        }

        assert!(f.current() > 290.0);
        assert!(f.baseline() < 110.0);
        assert!(f.baseline() > 100.0);
    }

    #[test]
    fn test_update_formula() {
        let mut f = filter(0.5, 0.25);
        f.process_sample(100);
        f.process_sample(200);

        // current = 0.5*200 + 0.5*100
        assert!((f.current() - 150.0).abs() < 1e-9);
        // baseline = 0.25*150 + 0.75*100
        assert!((f.baseline() - 112.5).abs() < 1e-9);
    }

    #[test]
    fn test_set_factors_keeps_state() {
        let mut f = filter(0.1, 0.001);
        f.process_sample(400);
        f.set_factors(
            SmoothingFactor::new(1.0).unwrap(),
            SmoothingFactor::new(0.5).unwrap(),
        );
        assert_eq!(f.current(), 400.0);

        f.process_sample(200);
        assert_eq!(f.current(), 200.0);
        assert!((f.baseline() - 300.0).abs() < 1e-9);
    }
}
