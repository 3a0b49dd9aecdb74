// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic timer queue.
//!
//! The queue never reads a clock. Callers pass timestamps in milliseconds
//! from whatever time source their runtime has, arm a single platform timer
//! for [`TimerQueue::next_deadline`], and drain due entries with
//! [`TimerQueue::pop_due`] when it fires.
//!
//! ```
//! use understory_floating::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let a = timers.schedule(100, "show");
//! let _b = timers.schedule(50, "hide");
//! assert_eq!(timers.next_deadline(), Some(50));
//!
//! assert!(timers.cancel(a));
//! assert_eq!(timers.pop_due(200).map(|(_, v)| v), Some("hide"));
//! assert_eq!(timers.pop_due(200), None);
//! ```

use alloc::collections::BTreeMap;

use hashbrown::HashMap;

/// Handle to a scheduled timer, used for cancellation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deadline-ordered queue of pending timers carrying a payload `T`.
///
/// Timers with equal deadlines fire in scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    by_deadline: BTreeMap<(u64, TimerId), T>,
    deadlines: HashMap<TimerId, u64>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            by_deadline: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `payload` to fire at `deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.by_deadline.insert((deadline_ms, id), payload);
        self.deadlines.insert(id, deadline_ms);
        id
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.by_deadline.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    /// Returns `true` while `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.by_deadline.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Removes and returns the earliest timer due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, T)> {
        let &(deadline, id) = self.by_deadline.keys().next()?;
        if deadline > now_ms {
            return None;
        }
        self.deadlines.remove(&id);
        self.by_deadline.remove(&(deadline, id)).map(|payload| (id, payload))
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.by_deadline.clear();
        self.deadlines.clear();
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(30, 'c');
        q.schedule(10, 'a');
        q.schedule(20, 'b');
        let fired: alloc::vec::Vec<char> =
            core::iter::from_fn(|| q.pop_due(100).map(|(_, v)| v)).collect();
        assert_eq!(fired, ['a', 'b', 'c']);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(10, 1);
        q.schedule(10, 2);
        assert_eq!(q.pop_due(10).map(|(_, v)| v), Some(1));
        assert_eq!(q.pop_due(10).map(|(_, v)| v), Some(2));
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(10, ());
        assert_eq!(q.pop_due(9), None);
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(10).is_some());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.schedule(10, ());
        assert!(q.is_pending(id));
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(!q.is_pending(id));
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn fired_timer_cannot_be_cancelled() {
        let mut q = TimerQueue::new();
        let id = q.schedule(0, ());
        assert_eq!(q.pop_due(0).map(|(fired, _)| fired), Some(id));
        assert!(!q.cancel(id));
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        q.schedule(1, ());
        q.schedule(2, ());
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop_due(u64::MAX), None);
    }
}
