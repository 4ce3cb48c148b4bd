// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition scheduling with optional wall-clock grid alignment.
//!
//! [`Schedule`] decides how long to wait before initiating the next
//! transition. Without clock sync the delay is simply the show period,
//! counted from whenever the previous transition finished. With clock sync
//! the delay is chosen so the *initiation* of every transition lands on a
//! boundary of a `period`-millisecond grid anchored at the Unix epoch,
//! regardless of when the instance started. Independent instances (and
//! reloads of the same page) therefore transition in lockstep.
//!
//! The schedule is re-armed only after the in-flight fade completes, so
//! scheduling and transitioning strictly alternate; there is never a second
//! concurrent delay.

use crate::time::{EpochMillis, Millis};

/// Computes the delay before the next transition is initiated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Schedule {
    period: Millis,
    clock_sync: bool,
}

impl Schedule {
    /// Creates a schedule with the given show period.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero. Config validation rejects non-positive
    /// show durations before a schedule is ever built.
    #[must_use]
    pub const fn new(period: Millis, clock_sync: bool) -> Self {
        assert!(period.0 != 0, "schedule period must not be zero");
        Self { period, clock_sync }
    }

    /// Returns the show period.
    #[inline]
    #[must_use]
    pub const fn period(self) -> Millis {
        self.period
    }

    /// Returns whether delays are aligned to the epoch-anchored grid.
    #[inline]
    #[must_use]
    pub const fn clock_sync(self) -> bool {
        self.clock_sync
    }

    /// Computes the delay from `now` until the next transition.
    ///
    /// Clock-synced: `(d - (now mod d)) mod d`, in `[0, d)` — zero when
    /// `now` sits exactly on a grid boundary, meaning "fire immediately".
    /// Unsynced: always exactly `d`.
    #[must_use]
    pub const fn delay_from(self, now: EpochMillis) -> Millis {
        let d = self.period.0;
        if self.clock_sync {
            Millis((d - now.0 % d) % d)
        } else {
            Millis(d)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synced_delay_completes_the_current_grid_cell() {
        // d = 5000, t = 12000 → 5000 - 2000 = 3000.
        let schedule = Schedule::new(Millis(5000), true);
        assert_eq!(schedule.delay_from(EpochMillis(12_000)), Millis(3000));
    }

    #[test]
    fn synced_delay_on_boundary_is_zero() {
        let schedule = Schedule::new(Millis(5000), true);
        assert_eq!(schedule.delay_from(EpochMillis(0)), Millis::ZERO);
        assert_eq!(schedule.delay_from(EpochMillis(10_000)), Millis::ZERO);
    }

    #[test]
    fn synced_delay_stays_below_period() {
        let schedule = Schedule::new(Millis(5000), true);
        for t in (0..50_000).step_by(777) {
            let delay = schedule.delay_from(EpochMillis(t));
            assert!(delay < Millis(5000), "delay {delay:?} for t={t}");
            // Initiation time must land on the grid.
            assert_eq!((t + delay.millis()) % 5000, 0, "off-grid for t={t}");
        }
    }

    #[test]
    fn unsynced_delay_is_always_the_period() {
        let schedule = Schedule::new(Millis(5000), false);
        for t in [0, 1, 2000, 12_000, 999_999_999] {
            assert_eq!(schedule.delay_from(EpochMillis(t)), Millis(5000));
        }
    }

    #[test]
    fn instances_started_apart_agree_on_the_next_boundary() {
        let a = Schedule::new(Millis(3000), true);
        let b = Schedule::new(Millis(3000), true);
        let start_a = EpochMillis(10_250);
        let start_b = EpochMillis(11_800);
        let fire_a = start_a + a.delay_from(start_a);
        let fire_b = start_b + b.delay_from(start_b);
        assert_eq!(fire_a, fire_b, "both land on the 12s boundary");
        assert_eq!(fire_a, EpochMillis(12_000));
    }
}
