//! Debouncer - apply only the last of a burst, after a quiet period
//!
//! Each `trigger` replaces the pending value and pushes the deadline back.
//! `poll` hands the value out once the deadline has passed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Record `value` and restart the quiet period.
    pub fn trigger(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.wait, value));
    }

    /// Take the pending value if the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now >= deadline => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without applying it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let mut debouncer = Debouncer::new(ms(250));
        let t0 = Instant::now();

        debouncer.trigger(t0, (800.0, 600.0));
        assert_eq!(debouncer.poll(t0 + ms(249)), None);
        assert_eq!(debouncer.poll(t0 + ms(250)), Some((800.0, 600.0)));

        // Consumed
        assert_eq!(debouncer.poll(t0 + ms(500)), None);
    }

    #[test]
    fn test_burst_keeps_last_value_and_restarts_wait() {
        let mut debouncer = Debouncer::new(ms(250));
        let t0 = Instant::now();

        debouncer.trigger(t0, 1);
        debouncer.trigger(t0 + ms(200), 2);
        debouncer.trigger(t0 + ms(400), 3);

        // 250ms after the first trigger, but the burst is still going
        assert_eq!(debouncer.poll(t0 + ms(450)), None);
        assert_eq!(debouncer.deadline(), Some(t0 + ms(650)));
        assert_eq!(debouncer.poll(t0 + ms(650)), Some(3));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::new(ms(10));
        let t0 = Instant::now();

        debouncer.trigger(t0, "resize");
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.cancel(), Some("resize"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + ms(100)), None);
    }
}
