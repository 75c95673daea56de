//! Deferred effects: things that happen a fixed time after a trigger.
//!
//! Effects hold weak entity handles. The handler re-checks the registry
//! before acting, so an effect against an entity that has since gone away
//! is a no-op. Nothing is ever cancelled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hecs::Entity;

/// A delayed world mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredEffect {
    /// Refill the player after death and return them to the origin.
    RespawnPlayer,
    /// Remove a destroyed ship, paying its bounty if the player killed it.
    RemoveShip { ship: Entity, from_player: bool },
    /// Drop a hit spark from the scene.
    ExpireHitMarker { marker: Entity },
}

#[derive(Debug)]
struct Scheduled {
    due: f64,
    seq: u64,
    effect: DeferredEffect,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed: BinaryHeap is a max-heap and we want the earliest first,
    // oldest first among equal due times.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Time-ordered queue of deferred effects, drained by the engine every tick.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward. Time never runs backwards.
    pub fn advance_to(&mut self, now: f64) {
        self.now = self.now.max(now);
    }

    pub fn schedule_after(&mut self, delay_secs: f64, effect: DeferredEffect) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due: self.now + delay_secs,
            seq,
            effect,
        });
    }

    /// Pop the next effect whose due time has been reached.
    pub fn pop_due(&mut self) -> Option<DeferredEffect> {
        if self.queue.peek()?.due > self.now {
            return None;
        }
        self.queue.pop().map(|s| s.effect)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether an effect matching `pred` is still waiting.
    pub fn is_pending(&self, pred: impl Fn(&DeferredEffect) -> bool) -> bool {
        self.queue.iter().any(|s| pred(&s.effect))
    }
}
