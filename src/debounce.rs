//! Quiet-period debouncing driven by caller-supplied time.
//!
//! Each [`Debouncer::push`] replaces the pending value and restarts the
//! window; [`Debouncer::poll`] hands the last value out once the window has
//! elapsed without further pushes. No timers or threads are involved, the
//! owner polls from its event loop.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Record an event at `now`, superseding any pending one.
    pub fn push(&mut self, now: Instant, value: T) {
        self.pending = Some((now, value));
    }

    /// Fire the pending value if the quiet period has passed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((at, _)) if now.saturating_duration_since(*at) >= self.quiet => {
                self.pending.take().map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Time left until the pending value fires, if any is pending.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(at, _)| self.quiet.saturating_sub(now.saturating_duration_since(*at)))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without firing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(150);

    #[test]
    fn fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.push(t0, 1);
        assert_eq!(d.poll(t0 + Duration::from_millis(149)), None);
        assert_eq!(d.poll(t0 + QUIET), Some(1));
        assert_eq!(d.poll(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn burst_resets_window_and_keeps_last_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        for i in 0..5u64 {
            d.push(t0 + Duration::from_millis(i * 30), i);
        }
        // 150ms after the first push but only 30ms after the last one.
        assert_eq!(d.poll(t0 + Duration::from_millis(150)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(270)), Some(4));
    }

    #[test]
    fn remaining_counts_down() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        assert_eq!(d.remaining(t0), None);
        d.push(t0, ());
        assert_eq!(d.remaining(t0 + Duration::from_millis(100)), Some(Duration::from_millis(50)));
        d.cancel();
        assert!(!d.is_pending());
    }
}
