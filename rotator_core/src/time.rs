// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wall-clock instants and millisecond durations.
//!
//! [`EpochMillis`] represents a point in time as milliseconds since the Unix
//! epoch. Unlike a monotonic clock, the epoch anchor is shared by every
//! instance on every page, which is what lets clock-synced rotators land
//! their transitions on the same grid (see [`Schedule`]).
//!
//! [`Millis`] represents a duration in the same millisecond units.
//!
//! [`Schedule`]: crate::schedule::Schedule

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time expressed as milliseconds since the Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EpochMillis(pub u64);

impl EpochMillis {
    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Returns the duration between `self` and an earlier instant, or zero
    /// if `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Millis {
        Millis(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a duration.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, duration: Millis) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<Millis> for EpochMillis {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Millis) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Millis> for EpochMillis {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Millis) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sub for EpochMillis {
    type Output = Millis;

    #[inline]
    fn sub(self, rhs: Self) -> Millis {
        Millis(self.0 - rhs.0)
    }
}

impl fmt::Debug for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EpochMillis({})", self.0)
    }
}

/// A duration in milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Millis(pub u64);

impl Millis {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Converts a duration in seconds to milliseconds.
    ///
    /// The caller is expected to pass a validated, finite, non-negative
    /// value (see [`RotatorConfig::validate`]); fractional milliseconds are
    /// truncated.
    ///
    /// [`RotatorConfig::validate`]: crate::config::RotatorConfig::validate
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "seconds are validated finite and positive; ms fits in u64"
    )]
    pub fn from_secs(secs: f64) -> Self {
        Self((secs * 1000.0) as u64)
    }

    /// Saturating addition.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Millis {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Millis {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Millis({})", self.0)
    }
}
