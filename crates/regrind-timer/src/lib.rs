//! Single-shot delayed-task queue for Regrind.
//!
//! The plugin host offers exactly one timing primitive: "run this callback
//! after N seconds". [`DelayQueue`] models that primitive for a
//! `tokio::select!` actor loop — tasks are scheduled with a deadline and
//! handed back, one at a time, when due.
//!
//! Deliberately **no cancellation**: once scheduled, a task will fire. By
//! the time it does, the state it was scheduled under may be gone, so every
//! consumer re-validates its own precondition before acting on a task.
//!
//! # Integration
//!
//! The queue is designed to sit inside the plugin actor's
//! `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(msg) = rx.recv() => { /* handle commands and host events */ }
//!         task = timers.next_due() => { /* re-check guard, then execute */ }
//!     }
//! }
//! ```

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant};
use tracing::trace;

/// Identifies one scheduled task, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t-{}", self.0)
    }
}

struct Entry<T> {
    id: TimerId,
    due: Instant,
    task: T,
}

/// A queue of single-shot delayed tasks.
///
/// Tasks come due in deadline order; equal deadlines fire in scheduling
/// order (ids are monotonic and break ties).
pub struct DelayQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> DelayQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `task` to come due after `delay`.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = Instant::now() + delay;
        self.entries.push(Entry { id, due, task });
        trace!(timer = %id, delay_ms = delay.as_millis() as u64, "task scheduled");
        id
    }

    /// Schedules `task` after `delay` plus a random jitter of up to
    /// `max_jitter`.
    ///
    /// Used for retry backoff so repeated attempts don't hammer the host
    /// on an exact cadence.
    pub fn schedule_jittered(
        &mut self,
        delay: Duration,
        max_jitter: Duration,
        task: T,
    ) -> TimerId {
        let max_us = max_jitter.as_micros() as u64;
        let jitter = if max_us == 0 {
            Duration::ZERO
        } else {
            Duration::from_micros(rand::rng().random_range(0..max_us))
        };
        self.schedule(delay + jitter, task)
    }

    /// Number of tasks not yet due.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every scheduled task without firing it.
    ///
    /// Only used at shutdown — ordinary operation relies on fire-time
    /// guards, not cancellation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Waits until the earliest task is due and returns it.
    ///
    /// While the queue is empty this future pends forever — `select!`
    /// keeps servicing its other branches, and a later `schedule` call
    /// (from another branch of the same loop) re-creates the future with
    /// the new deadline on the next loop iteration.
    pub async fn next_due(&mut self) -> T {
        let Some(idx) = self.earliest() else {
            // Nothing scheduled: pend forever, select! handles the rest.
            std::future::pending::<()>().await;
            unreachable!()
        };

        time::sleep_until(self.entries[idx].due).await;

        let entry = self.entries.swap_remove(idx);
        trace!(timer = %entry.id, "task due");
        entry.task
    }

    /// Index of the entry with the earliest deadline (ties: lowest id).
    fn earliest(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.due, e.id.0))
            .map(|(idx, _)| idx)
    }
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
