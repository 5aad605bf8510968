//! Mutable per-run simulation state.

use super::availability::{DAY, HOUR};
use super::context::SimContext;
use super::stats::SimStats;
use crate::catalog::ActionType;
use crate::policy::Policy;
use std::time::Duration;

/// State of one simulated run, advanced one decision step at a time.
///
/// A fresh status is created for every evaluation and discarded once its
/// [`SimStats`] snapshot is taken. The clock never moves backwards and the
/// offer cursor advances exactly once per step.
#[derive(Debug, Clone)]
pub struct SimStatus {
    clock: Duration,
    day: u64,
    last_refresh_day: Option<u64>,
    cost_gain: Vec<f64>,
    counts: Vec<usize>,
    cursor: usize,
}

impl SimStatus {
    /// A status at time zero that has never refreshed.
    pub fn new(action_count: usize, dimensions: usize) -> Self {
        Self {
            clock: Duration::ZERO,
            day: 0,
            last_refresh_day: None,
            cost_gain: vec![0.0; dimensions],
            counts: vec![0; action_count],
            cursor: 0,
        }
    }

    /// Moves the clock to `clock`. Intended for fixtures.
    pub fn at(mut self, clock: Duration) -> Self {
        self.clock = clock;
        self.day = day_of(clock);
        self
    }

    /// Sets the day of the last refresh. Intended for fixtures.
    pub fn with_last_refresh_day(mut self, day: Option<u64>) -> Self {
        self.last_refresh_day = day;
        self
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Whole simulated days since the start, `floor(clock / 24h)`.
    pub fn day(&self) -> u64 {
        self.day
    }

    /// Hour of the simulated day, in `0..24`.
    pub fn hour_of_day(&self) -> u32 {
        ((self.clock.as_secs() / HOUR.as_secs()) % 24) as u32
    }

    pub fn last_refresh_day(&self) -> Option<u64> {
        self.last_refresh_day
    }

    /// Whether a refresh is allowed now: only once per simulated day.
    pub fn can_refresh(&self) -> bool {
        match self.last_refresh_day {
            None => true,
            Some(last) => self.day > last,
        }
    }

    pub fn cost_gain(&self) -> &[f64] {
        &self.cost_gain
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Steps executed so far.
    pub fn steps(&self) -> usize {
        self.cursor
    }

    /// Executes one decision step and returns the chosen action.
    ///
    /// # Panics
    /// Panics if the context's offer sequence is exhausted.
    pub fn step<P: Policy + ?Sized>(&mut self, ctx: &SimContext, policy: &P) -> ActionType {
        let offers = ctx.offers_at(self.cursor);
        self.cursor += 1;

        let action = policy.decide(self, offers);
        let catalog = ctx.catalog();

        let done = if action.is_refresh() {
            self.clock
        } else {
            self.clock.saturating_add(catalog.duration(action))
        };
        let available = ctx.config().availability.next_available(self.clock);
        self.clock = available.max(done);
        self.day = day_of(self.clock);

        if action.is_refresh() {
            self.last_refresh_day = Some(self.day);
        }
        for (acc, v) in self.cost_gain.iter_mut().zip(catalog.cost_gain(action)) {
            *acc += v;
        }
        self.counts[action.index()] += 1;

        tracing::trace!(
            step = self.cursor,
            ?offers,
            %action,
            clock_h = self.clock.as_secs_f64() / HOUR.as_secs_f64(),
            "step"
        );
        action
    }

    /// Consumes the status into its read-only snapshot.
    pub fn into_stats(self) -> SimStats {
        SimStats {
            elapsed: self.clock,
            steps: self.cursor,
            counts: self.counts,
            cost_gain: self.cost_gain,
        }
    }
}

fn day_of(clock: Duration) -> u64 {
    clock.as_secs() / DAY.as_secs()
}
