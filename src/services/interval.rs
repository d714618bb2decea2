//! Periodic task timer

/// Fires once per period of an externally supplied clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    last_ms: u64,
}

impl Interval {
    /// Timer whose first period starts at `start_ms`
    pub fn new(period_ms: u64, start_ms: u64) -> Self {
        Self {
            period_ms,
            last_ms: start_ms,
        }
    }

    /// `true` once `period_ms` has passed since the last time it fired
    pub fn due(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_ms) >= self.period_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Earliest reading at which [`Interval::due`] can fire
    pub fn next_due_ms(&self) -> u64 {
        self.last_ms.saturating_add(self.period_ms)
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn set_period(&mut self, period_ms: u64) {
        self.period_ms = period_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = Interval::new(100, 0);
        assert!(!timer.due(99));
        assert!(timer.due(100));
        assert!(!timer.due(150));
        assert!(timer.due(200));
        assert_eq!(timer.next_due_ms(), 300);
    }

    #[test]
    fn test_late_tick_restarts_period() {
        let mut timer = Interval::new(100, 0);
        assert!(timer.due(350));
        assert!(!timer.due(400));
        assert!(timer.due(450));
    }

    #[test]
    fn test_zero_period_always_due() {
        let mut timer = Interval::new(0, 10);
        assert!(timer.due(10));
        assert!(timer.due(10));
    }
}
