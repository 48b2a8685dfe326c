#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-rate scheduler that turns real elapsed time into simulation ticks.
//!
//! The world only advances through explicit `Tick` commands. Hosts that run in
//! real time feed wall-clock deltas into [`FixedStep::accumulate`] and submit
//! one tick per step it reports; tests skip the scheduler and tick directly.

use std::time::Duration;

use balloon_defence_core::TICK_PERIOD;

/// Largest number of ticks a single accumulation may report.
pub const MAX_CATCH_UP_STEPS: u32 = 5;

/// Accumulator that releases whole fixed-period steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedStep {
    period: Duration,
    max_steps: u32,
    accumulator: Duration,
}

impl FixedStep {
    /// Creates a scheduler with the provided step period and catch-up cap.
    ///
    /// Returns `None` when the period is zero or the cap would forbid every step.
    #[must_use]
    pub fn new(period: Duration, max_steps: u32) -> Option<Self> {
        if period.is_zero() || max_steps == 0 {
            return None;
        }
        Some(Self {
            period,
            max_steps,
            accumulator: Duration::ZERO,
        })
    }

    /// Duration of a single step.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Real time carried over that has not yet filled a whole step.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Adds `real_dt` and reports how many steps are due.
    ///
    /// When more than the catch-up cap is owed, the surplus is dropped so a
    /// stalled host does not fast-forward the simulation afterwards.
    pub fn accumulate(&mut self, real_dt: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(real_dt);

        let mut due = 0;
        while self.accumulator >= self.period && due < self.max_steps {
            self.accumulator -= self.period;
            due += 1;
        }

        if self.accumulator >= self.period {
            self.accumulator = Duration::ZERO;
        }

        due
    }

    /// Discards any carried-over time, typically when the host pauses.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self {
            period: TICK_PERIOD,
            max_steps: MAX_CATCH_UP_STEPS,
            accumulator: Duration::ZERO,
        }
    }
}
