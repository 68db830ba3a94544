//! Scheduler - deadline timers driven by an external clock
//!
//! Replaces `setTimeout` / `requestAnimationFrame` chains with one ordered
//! table of pending tasks. The owner calls `take_due(now)` from its tick and
//! dispatches whatever comes back.
//!
//! # Pattern
//!
//! - Tasks are plain values (usually an enum), not closures
//! - Equal deadlines fire in scheduling order
//! - `clear()` cancels everything, which is how a page tears down

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use tracing::trace;

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    queue: BTreeMap<(Instant, u64), T>,
    deadlines: HashMap<u64, Instant>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Schedule `task` to fire at `at`.
    pub fn schedule_at(&mut self, at: Instant, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.insert((at, id), task);
        self.deadlines.insert(id, at);
        TimerId(id)
    }

    /// Schedule `task` to fire `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, task: T) -> TimerId {
        self.schedule_at(now + delay, task)
    }

    /// Cancel a pending task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let at = self.deadlines.remove(&id.0)?;
        self.queue.remove(&(at, id.0))
    }

    /// Cancel every pending task matching `predicate`. Returns how many.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let doomed: Vec<(Instant, u64)> = self
            .queue
            .iter()
            .filter(|(_, task)| predicate(task))
            .map(|(key, _)| *key)
            .collect();

        for key in &doomed {
            self.queue.remove(key);
            self.deadlines.remove(&key.1);
        }
        doomed.len()
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > now {
                break;
            }
            let ((_, id), task) = entry.remove_entry();
            self.deadlines.remove(&id);
            due.push(task);
        }
        if !due.is_empty() {
            trace!(count = due.len(), pending = self.queue.len(), "timers fired");
        }
        due
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Cancel everything. Returns how many tasks were pending.
    pub fn clear(&mut self) -> usize {
        let count = self.queue.len();
        self.queue.clear();
        self.deadlines.clear();
        count
    }
}

impl<T: PartialEq> Scheduler<T> {
    /// Whether an equal task is already pending.
    pub fn contains(&self, task: &T) -> bool {
        self.queue.values().any(|pending| pending == task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_take_due_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();

        scheduler.schedule_after(t0, ms(30), "c");
        scheduler.schedule_after(t0, ms(10), "a");
        scheduler.schedule_after(t0, ms(20), "b");

        assert_eq!(scheduler.take_due(t0 + ms(5)), Vec::<&str>::new());
        assert_eq!(scheduler.take_due(t0 + ms(20)), vec!["a", "b"]);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(t0 + ms(30)));
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        let at = Instant::now();

        scheduler.schedule_at(at, 1);
        scheduler.schedule_at(at, 2);
        scheduler.schedule_at(at, 3);

        assert_eq!(scheduler.take_due(at), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();

        let keep = scheduler.schedule_after(t0, ms(10), "keep");
        let drop = scheduler.schedule_after(t0, ms(10), "drop");

        assert_eq!(scheduler.cancel(drop), Some("drop"));
        assert_eq!(scheduler.cancel(drop), None);
        assert!(scheduler.is_scheduled(keep));
        assert_eq!(scheduler.take_due(t0 + ms(10)), vec!["keep"]);
        assert!(!scheduler.is_scheduled(keep));
    }

    #[test]
    fn test_cancel_where() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();

        for n in 0..6 {
            scheduler.schedule_after(t0, ms(n), n);
        }

        assert_eq!(scheduler.cancel_where(|n| n % 2 == 0), 3);
        assert_eq!(scheduler.take_due(t0 + ms(10)), vec![1, 3, 5]);
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();

        let id = scheduler.schedule_after(t0, ms(5), ());
        scheduler.schedule_after(t0, ms(50), ());

        assert_eq!(scheduler.clear(), 2);
        assert!(scheduler.is_empty());
        assert!(!scheduler.is_scheduled(id));
        assert!(scheduler.take_due(t0 + ms(100)).is_empty());
    }

    #[test]
    fn test_contains() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(Instant::now(), ms(1), "typing");

        assert!(scheduler.contains(&"typing"));
        assert!(!scheduler.contains(&"counter"));
    }
}
