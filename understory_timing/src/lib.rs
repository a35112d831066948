// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI state machines often need a deferred action: a long-press after a
//! stationary touch, a tooltip after hovering, a double-click window closing.
//! This crate keeps the bookkeeping for such one-shot timers without owning a
//! clock or an event loop. Callers feed it timestamps they already have (for
//! example the `time` field of an input event or `performance.now()`), and ask
//! it which timers are due.
//!
//! - [`TimerQueue::schedule`] registers a payload with an absolute deadline.
//! - [`TimerQueue::cancel`] removes a pending timer; a cancelled timer is never
//!   returned as expired.
//! - [`TimerQueue::next_deadline`] tells the host when to wake up next.
//! - [`TimerQueue::pop_expired`] / [`TimerQueue::drain_expired`] yield due timers
//!   in deadline order.
//!
//! Timestamps are opaque `u64` values; milliseconds are typical but any
//! monotonic unit works as long as it is used consistently.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let press = timers.schedule_after(1_000, 500, "long-press");
//! let hover = timers.schedule_after(1_000, 800, "tooltip");
//!
//! assert_eq!(timers.next_deadline(), Some(1_500));
//!
//! // The pointer moved: the long-press no longer applies.
//! assert_eq!(timers.cancel(press), Some("long-press"));
//!
//! // Nothing is due yet at t=1_600; the tooltip fires at t=1_800.
//! assert_eq!(timers.pop_expired(1_600), None);
//! assert_eq!(timers.pop_expired(1_800), Some((hover, "tooltip")));
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Identifier for a scheduled timer.
///
/// Ids are allocated from a per-queue counter and are never reused, so a stale
/// id can never cancel a timer scheduled later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    deadline: u64,
    id: TimerId,
    payload: T,
}

/// A deadline-ordered queue of cancellable one-shot timers.
///
/// Entries are kept sorted by deadline; timers sharing a deadline expire in
/// the order they were scheduled. The queue is intended for the handful of
/// timers a UI interaction layer keeps alive at once, so it favors a compact
/// `Vec` over a heap.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules `payload` to expire at the absolute `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Insert after every entry with an equal deadline to keep FIFO ties.
        let at = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(
            at,
            Entry {
                deadline,
                id,
                payload,
            },
        );
        id
    }

    /// Schedules `payload` to expire `delay` units after `now`.
    ///
    /// The deadline saturates at `u64::MAX`.
    pub fn schedule_after(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.schedule(now.saturating_add(delay), payload)
    }

    /// Cancels a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already expired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).payload)
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns the deadline of a pending timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.deadline)
    }

    /// Returns the earliest pending deadline, if any.
    ///
    /// Hosts use this to schedule their next wake-up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_expired(&mut self, now: u64) -> Option<(TimerId, T)> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let entry = self.entries.remove(0);
        Some((entry.id, entry.payload))
    }

    /// Returns an iterator that removes every timer due at `now`, in deadline order.
    ///
    /// Timers left unconsumed when the iterator is dropped stay in the queue.
    pub fn drain_expired(&mut self, now: u64) -> DrainExpired<'_, T> {
        DrainExpired { queue: self, now }
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Iterator returned by [`TimerQueue::drain_expired`].
#[derive(Debug)]
pub struct DrainExpired<'a, T> {
    queue: &'a mut TimerQueue<T>,
    now: u64,
}

impl<T> Iterator for DrainExpired<'_, T> {
    type Item = (TimerId, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_expired(self.now)
    }
}
