//! Throttle Gate - rate-limit a callback to once per interval
//!
//! A call that arrives while the gate is closed is dropped, not queued.
//! The gate reopens `interval` after the last call that ran.
//!
//! Time is passed in explicitly, so the gate is deterministic and does not
//! own a timer. A closed gate simply compares against its reopen deadline.
//!
//! # Example
//!
//! ```ignore
//! use std::time::{Duration, Instant};
//! use spark_folio::timing::throttle::wrap;
//!
//! let mut ticks = 0;
//! let mut on_scroll = wrap(|| ticks += 1, Duration::from_millis(100));
//!
//! let t0 = Instant::now();
//! on_scroll.call(t0);                              // runs
//! on_scroll.call(t0 + Duration::from_millis(40));  // dropped
//! on_scroll.call(t0 + Duration::from_millis(100)); // runs
//! ```

use std::time::{Duration, Instant};

use tracing::trace;

// =============================================================================
// GATE
// =============================================================================

/// The rate-limiting state without an attached action.
///
/// Use this directly when the guarded work needs `&mut` access to its caller.
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    interval: Duration,
    reopens_at: Option<Instant>,
    trailing: bool,
    suppressed: bool,
}

impl ThrottleGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            reopens_at: None,
            trailing: false,
            suppressed: false,
        }
    }

    /// Remember a dropped call and report it from `poll_trailing` once the
    /// window ends.
    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the gate next opens, if it is currently closing a window.
    pub fn reopens_at(&self) -> Option<Instant> {
        self.reopens_at
    }

    pub fn is_open(&self, now: Instant) -> bool {
        self.reopens_at.is_none_or(|at| now >= at)
    }

    /// Whether a dropped call is waiting for the window to end.
    pub fn has_trailing(&self) -> bool {
        self.suppressed
    }

    /// Pass the gate. Returns `true` if the caller should run now.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if self.is_open(now) {
            self.reopens_at = Some(now + self.interval);
            self.suppressed = false;
            true
        } else {
            if self.trailing {
                self.suppressed = true;
            }
            trace!(interval_ms = self.interval.as_millis() as u64, "throttled call dropped");
            false
        }
    }

    /// Returns `true` once per suppressed burst, after the window has ended.
    ///
    /// Always `false` unless trailing calls are enabled.
    pub fn poll_trailing(&mut self, now: Instant) -> bool {
        if self.suppressed && self.is_open(now) {
            self.suppressed = false;
            self.reopens_at = Some(now + self.interval);
            true
        } else {
            false
        }
    }

    /// Reopen the gate and forget any pending trailing call.
    pub fn reset(&mut self) {
        self.reopens_at = None;
        self.suppressed = false;
    }
}

// =============================================================================
// WRAPPED ACTION
// =============================================================================

/// An action guarded by a [`ThrottleGate`].
pub struct Throttled<F: FnMut()> {
    gate: ThrottleGate,
    action: F,
}

/// Guard `action` so it runs at most once per `interval`.
pub fn wrap<F: FnMut()>(action: F, interval: Duration) -> Throttled<F> {
    Throttled {
        gate: ThrottleGate::new(interval),
        action,
    }
}

impl<F: FnMut()> Throttled<F> {
    /// Enable trailing calls on the underlying gate.
    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.gate = self.gate.with_trailing(trailing);
        self
    }

    /// Fire-and-forget. Returns whether the action ran.
    pub fn call(&mut self, now: Instant) -> bool {
        if self.gate.try_acquire(now) {
            (self.action)();
            true
        } else {
            false
        }
    }

    /// Run a pending trailing call if its window has ended.
    pub fn poll_trailing(&mut self, now: Instant) -> bool {
        if self.gate.poll_trailing(now) {
            (self.action)();
            true
        } else {
            false
        }
    }

    pub fn gate(&self) -> &ThrottleGate {
        &self.gate
    }

    pub fn reset(&mut self) {
        self.gate.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_call_runs_immediately() {
        let count = Cell::new(0);
        let mut throttled = wrap(|| count.set(count.get() + 1), ms(100));

        assert!(throttled.call(Instant::now()));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_burst_runs_once() {
        let count = Cell::new(0);
        let mut throttled = wrap(|| count.set(count.get() + 1), ms(100));
        let t0 = Instant::now();

        for i in 0..10 {
            throttled.call(t0 + ms(i * 9));
        }

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_runs_again_after_window() {
        let count = Cell::new(0);
        let mut throttled = wrap(|| count.set(count.get() + 1), ms(100));
        let t0 = Instant::now();

        throttled.call(t0);
        assert!(!throttled.call(t0 + ms(99)));
        assert!(throttled.call(t0 + ms(100)));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_dropped_calls_do_not_extend_window() {
        let mut gate = ThrottleGate::new(ms(100));
        let t0 = Instant::now();

        assert!(gate.try_acquire(t0));
        assert!(!gate.try_acquire(t0 + ms(90)));
        // Window is measured from the call that ran, not the dropped one
        assert!(gate.try_acquire(t0 + ms(100)));
    }

    #[test]
    fn test_zero_interval_never_throttles() {
        let mut gate = ThrottleGate::new(Duration::ZERO);
        let t0 = Instant::now();

        assert!(gate.try_acquire(t0));
        assert!(gate.try_acquire(t0));
        assert!(gate.try_acquire(t0));
    }

    #[test]
    fn test_no_trailing_by_default() {
        let mut gate = ThrottleGate::new(ms(100));
        let t0 = Instant::now();

        gate.try_acquire(t0);
        gate.try_acquire(t0 + ms(50));

        assert!(!gate.has_trailing());
        assert!(!gate.poll_trailing(t0 + ms(200)));
    }

    #[test]
    fn test_trailing_call_fires_once_after_window() {
        let count = Cell::new(0);
        let mut throttled = wrap(|| count.set(count.get() + 1), ms(100)).with_trailing(true);
        let t0 = Instant::now();

        throttled.call(t0);
        throttled.call(t0 + ms(30));
        throttled.call(t0 + ms(60));
        assert_eq!(count.get(), 1);

        // Too early
        assert!(!throttled.poll_trailing(t0 + ms(80)));

        assert!(throttled.poll_trailing(t0 + ms(100)));
        assert_eq!(count.get(), 2);

        // Only once per burst
        assert!(!throttled.poll_trailing(t0 + ms(300)));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_trailing_cleared_by_regular_call() {
        let mut gate = ThrottleGate::new(ms(100)).with_trailing(true);
        let t0 = Instant::now();

        gate.try_acquire(t0);
        gate.try_acquire(t0 + ms(50));
        assert!(gate.has_trailing());

        // A regular call after the window supersedes the trailing one
        assert!(gate.try_acquire(t0 + ms(150)));
        assert!(!gate.has_trailing());
    }

    #[test]
    fn test_reset_reopens_gate() {
        let mut gate = ThrottleGate::new(ms(100)).with_trailing(true);
        let t0 = Instant::now();

        gate.try_acquire(t0);
        gate.try_acquire(t0 + ms(10));
        gate.reset();

        assert!(!gate.has_trailing());
        assert!(gate.is_open(t0 + ms(20)));
        assert_eq!(gate.reopens_at(), None);
    }
}
