//! Delayed-task queue on the game clock, in milliseconds.
//!
//! The clock only moves in whole ticks (`advance` is fed tick durations),
//! but delays and due times are kept in milliseconds so a task scheduled
//! part-way through a tick is not rounded down to that tick's start.
//!
//! Tasks are plain values (e.g. "expire particle #7"), not closures, so a
//! task never holds a borrow of the state it will act on. The queue is owned
//! by that state: dropping the state drops every pending task unfired.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct Scheduled<T> {
    due: u64,
    /// Scheduling order, breaks ties between tasks due at the same time.
    seq: u64,
    task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

pub struct TimerQueue<T> {
    now: u64,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Scheduled<T>>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Current time of the queue's clock (ms).
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `task` to fire `delay_ms` from now. Returns the due time.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> u64 {
        let due = self.now + delay_ms;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(Scheduled { due, seq, task }));
        due
    }

    /// Advance the clock by `delta_ms` and return every task that has come
    /// due, ordered by due time and then by scheduling order.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<T> {
        self.now += delta_ms;
        let mut fired = Vec::new();
        while let Some(Reverse(next)) = self.pending.peek() {
            if next.due > self.now {
                break;
            }
            if let Some(Reverse(s)) = self.pending.pop() {
                fired.push(s.task);
            }
        }
        fired
    }

    /// Time at which the earliest pending task fires.
    #[cfg(test)]
    pub fn next_due(&self) -> Option<u64> {
        self.pending.peek().map(|Reverse(s)| s.due)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
