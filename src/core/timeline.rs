//! Per-entity scheduled side effects.
//!
//! Delayed callbacks (attack sounds, projectile spawns, the return to idle)
//! are kept as a min-heap of `(fire time, effect)` pairs on the owning entity.
//! The owner advances its own clock once per tick and receives every effect
//! that came due, in fire order. Nothing runs on a wall clock, so timing is
//! deterministic for a given sequence of deltas.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<E> {
    fire_at: Duration,
    /// Insertion order, breaks ties so equal fire times pop FIFO.
    seq: u64,
    effect: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fire_at
            .cmp(&other.fire_at)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A local clock plus the effects waiting on it.
#[derive(Debug, Clone)]
pub struct Timeline<E> {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Scheduled<E>>>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local time elapsed since the timeline was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `effect` to fire `delay_secs` from now. Negative delays fire
    /// on the next advance.
    pub fn schedule(&mut self, delay_secs: f32, effect: E) {
        let delay = Duration::from_secs_f32(delay_secs.max(0.0));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(Scheduled {
            fire_at: self.now + delay,
            seq,
            effect,
        }));
    }

    /// Move the clock forward and drain every effect that is now due.
    pub fn advance(&mut self, delta_secs: f32) -> Vec<E> {
        self.now += Duration::from_secs_f32(delta_secs.max(0.0));

        let mut due = Vec::new();
        while self
            .pending
            .peek()
            .is_some_and(|Reverse(next)| next.fire_at <= self.now)
        {
            if let Some(Reverse(next)) = self.pending.pop() {
                due.push(next.effect);
            }
        }
        due
    }

    /// Drop every pending effect. Used when the owner dies.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}
