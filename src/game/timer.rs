//! Logical-clock timers driven by the game loop's frame deltas.

use std::time::Duration;

use tracing::{debug, trace};

use crate::game::events::GameEvent;
use crate::round::RoundId;

/// Per-round answer countdown. Fires at most once per arming.
#[derive(Debug, Clone)]
pub struct Countdown {
    budget: Duration,
    armed: Option<(RoundId, Duration)>,
}

impl Countdown {
    pub fn new(budget: Duration) -> Self {
        Self { budget, armed: None }
    }

    /// Arms the countdown for `round` with the full budget, replacing any previous arming.
    pub fn start(&mut self, round: RoundId) {
        self.armed = Some((round, self.budget));
    }

    /// Disarms the countdown without firing it.
    pub fn abandon(&mut self) {
        if let Some((round, remaining)) = self.armed.take() {
            trace!(round = %round, ?remaining, "Countdown abandoned");
        }
    }

    /// Advances the countdown, returning the expiry event on the tick the budget runs out.
    pub fn tick(&mut self, dt: Duration) -> Option<GameEvent> {
        let (round, remaining) = self.armed?;
        let remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            self.armed = None;
            debug!(round = %round, "Countdown expired");
            Some(GameEvent::CountdownExpired { round })
        } else {
            self.armed = Some((round, remaining));
            None
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.armed.map(|(_, remaining)| remaining)
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: Duration,
    seq: u64,
    event: GameEvent,
}

/// Delivers events after a delay, in order of due time and then of scheduling.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, after: Duration, event: GameEvent) {
        trace!(?after, ?event, "Scheduling event");
        self.pending.push(Scheduled {
            due: self.now + after,
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Moves the clock forward and returns every event that came due, oldest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<GameEvent> {
        self.now += dt;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;

        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.event).collect()
    }

    /// Drops pending events bound to any round other than `round`.
    pub fn retain_round(&mut self, round: RoundId) {
        let before = self.pending.len();
        self.pending.retain(|s| s.event.round().is_none_or(|r| r == round));
        let dropped = before - self.pending.len();
        if dropped > 0 {
            debug!(dropped, round = %round, "Dropped stale timers");
        }
    }

    /// Time left until the first pending event matching `predicate`.
    pub fn time_until(&self, predicate: impl Fn(&GameEvent) -> bool) -> Option<Duration> {
        self.pending
            .iter()
            .filter(|s| predicate(&s.event))
            .map(|s| s.due.saturating_sub(self.now))
            .min()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
