//! Session clock
//!
//! Converts wall-clock instants (milliseconds, as handed in by the platform
//! time source) into elapsed session seconds. Paused time never counts.

use serde::{Deserialize, Serialize};

/// Session time base
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionClock {
    /// Instant (ms) the running session counts from
    start_ms: f64,
    /// Elapsed seconds frozen at the moment of pausing
    frozen: Option<f64>,
}

impl SessionClock {
    /// Start counting from `now_ms`
    pub fn started_at(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            frozen: None,
        }
    }

    /// Elapsed session seconds at `now_ms`
    ///
    /// While frozen this returns the value captured by [`freeze`](Self::freeze).
    pub fn elapsed_secs(&self, now_ms: f64) -> f64 {
        match self.frozen {
            Some(elapsed) => elapsed,
            None => ((now_ms - self.start_ms) / 1000.0).max(0.0),
        }
    }

    /// Capture the elapsed time so it survives a pause
    pub fn freeze(&mut self, now_ms: f64) {
        if self.frozen.is_none() {
            self.frozen = Some(self.elapsed_secs(now_ms));
        }
    }

    /// Rebase the start instant so elapsed time continues from the frozen value
    pub fn thaw(&mut self, now_ms: f64) {
        if let Some(elapsed) = self.frozen.take() {
            self.start_ms = now_ms - elapsed * 1000.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_elapsed_counts_from_start() {
        let clock = SessionClock::started_at(1_000.0);
        assert_eq!(clock.elapsed_secs(1_000.0), 0.0);
        assert_eq!(clock.elapsed_secs(3_500.0), 2.5);
    }

    #[test]
    fn test_never_negative() {
        let clock = SessionClock::started_at(5_000.0);
        assert_eq!(clock.elapsed_secs(4_000.0), 0.0);
    }

    #[test]
    fn test_pause_excludes_gap() {
        let mut clock = SessionClock::started_at(0.0);
        clock.freeze(10_250.0);
        assert_eq!(clock.frozen, Some(10.25));
        // Frozen value holds no matter how much wall time passes
        assert_eq!(clock.elapsed_secs(99_000.0), 10.25);

        clock.thaw(60_000.0);
        assert_eq!(clock.frozen, None);
        assert!((clock.elapsed_secs(60_000.0) - 10.25).abs() < 1e-9);
        assert!((clock.elapsed_secs(61_000.0) - 11.25).abs() < 1e-9);
    }

    #[test]
    fn test_double_freeze_keeps_first_value() {
        let mut clock = SessionClock::started_at(0.0);
        clock.freeze(2_000.0);
        clock.freeze(9_000.0);
        assert_eq!(clock.elapsed_secs(9_000.0), 2.0);
    }

    #[test]
    fn test_thaw_without_freeze_is_noop() {
        let mut clock = SessionClock::started_at(0.0);
        clock.thaw(50_000.0);
        assert_eq!(clock.elapsed_secs(1_000.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_pause_resume_preserves_elapsed(
            start in 0.0f64..1.0e6,
            run in 0.0f64..180_000.0,
            gap in 0.0f64..1.0e7,
        ) {
            let mut clock = SessionClock::started_at(start);
            let before = clock.elapsed_secs(start + run);
            clock.freeze(start + run);
            clock.thaw(start + run + gap);
            let after = clock.elapsed_secs(start + run + gap);
            prop_assert!((after - before).abs() < 1e-6);
        }
    }
}
