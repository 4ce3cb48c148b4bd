// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rotate-forever state machine.
//!
//! [`Rotator`] owns the current index and the `Idle ⇄ Transitioning` state;
//! it performs no platform work itself. Each step method consumes one host
//! event (start, timer elapsed, fade completed) and returns the
//! [`StepChanges`] the host must apply: style snaps, at most one fade to
//! start, at most one timer to arm, and at most one index to persist. The
//! host applies them in that order.
//!
//! # Transition shape
//!
//! From index `cur` with `next = (cur + 1) mod N`:
//!
//! - **Non-wrap** (`next != 0`): `next` is snapped visible at opacity 0 and
//!   faded in to 1 above the still-visible `cur`. On completion `cur` snaps
//!   hidden.
//! - **Wrap** (`next == 0`): element 0 is snapped visible at opacity 1
//!   *before* the fade, then `cur` fades out to reveal it. On completion
//!   `cur` snaps hidden.
//!
//! The asymmetry follows from the fixed stacking order: element 0 has the
//! lowest stacking index, so it must be revealed by fading the old top
//! element away rather than faded in over it.
//!
//! The index advance (and its persistence write) happens when the transition
//! is *initiated*, so the persisted index names the target of an in-flight
//! fade, not the visually dominant element.

use alloc::vec::Vec;

use crate::config::{ConfigError, RotatorConfig};
use crate::persist::IndexRecord;
use crate::schedule::Schedule;
use crate::time::{EpochMillis, Millis};

/// Fully opaque.
pub const OPAQUE: f64 = 1.0;
/// Fully transparent.
pub const CLEAR: f64 = 0.0;

/// Whether a transition is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionState {
    /// Exactly one element is fully visible.
    Idle,
    /// A fade is running; `outgoing` is the element that snaps hidden when
    /// it completes.
    Transitioning {
        /// Index of the element leaving the stage.
        outgoing: u32,
    },
}

/// An immediate, unanimated style write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snap {
    /// Element ordinal within the container.
    pub index: u32,
    /// Opacity to set.
    pub opacity: f64,
    /// Visibility to set.
    pub visible: bool,
}

/// A tween over one element's opacity, with a completion signal.
///
/// The host runs it however it likes (rAF loop, timer, test double) and must
/// report completion via [`Rotator::finish`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeSpec {
    /// Element ordinal within the container.
    pub index: u32,
    /// Starting opacity.
    pub from: f64,
    /// Final opacity.
    pub to: f64,
    /// Tween duration.
    pub duration: Millis,
}

/// The set of host actions produced by a single step.
///
/// Apply in order: `snaps`, `persist`, `fade`, `rearm`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepChanges {
    /// Immediate style writes.
    pub snaps: Vec<Snap>,
    /// Tween to start, if any.
    pub fade: Option<FadeSpec>,
    /// Delay before the next [`Rotator::advance`], if the schedule should be
    /// re-armed.
    pub rearm: Option<Millis>,
    /// Index to write to the persisted entry, if persistence is enabled and
    /// the index moved.
    pub persist: Option<u32>,
}

impl StepChanges {
    /// Returns `true` when the step requires no host action at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snaps.is_empty()
            && self.fade.is_none()
            && self.rearm.is_none()
            && self.persist.is_none()
    }

    /// Clears all actions.
    pub fn clear(&mut self) {
        self.snaps.clear();
        self.fade = None;
        self.rearm = None;
        self.persist = None;
    }
}

/// Cycles through `len` sibling elements, cross-fading on a timer.
///
/// Pure state machine: construct with a validated config and the container's
/// element count, then feed it host events and apply the returned
/// [`StepChanges`]. See the crate docs for the full pipeline.
#[derive(Debug)]
pub struct Rotator {
    config: RotatorConfig,
    schedule: Schedule,
    len: u32,
    current: u32,
    state: TransitionState,
}

impl Rotator {
    /// Creates a rotator over `len` elements.
    ///
    /// Validates `config` and fails with the first [`ConfigError`] found.
    /// `len == 0` is accepted; such a rotator never schedules anything.
    pub fn new(config: RotatorConfig, len: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let schedule = Schedule::new(config.show_period(), config.clock_sync);
        Ok(Self {
            config,
            schedule,
            len,
            current: 0,
            state: TransitionState::Idle,
        })
    }

    /// Applies a stored record to choose the starting index.
    ///
    /// No-op unless `persist_index` is enabled and there are elements. The
    /// stored value is reduced modulo `len`, so a record written against a
    /// longer element list can never select a missing element.
    pub fn restore(&mut self, record: IndexRecord) {
        if self.config.persist_index && self.len > 0 {
            self.current = record.current % self.len;
        }
    }

    /// Produces the initial element states and arms the first delay.
    ///
    /// With zero elements the returned changes are empty: no styles, no
    /// schedule, no persistence. Otherwise every element gets a snap — the
    /// current one visible at opacity 1, the rest hidden at 0 — and the
    /// schedule is armed from `now`.
    pub fn start(&mut self, now: EpochMillis) -> StepChanges {
        let mut changes = StepChanges::default();
        if self.len == 0 {
            return changes;
        }
        for j in 0..self.len {
            let shown = j == self.current;
            changes.snaps.push(Snap {
                index: j,
                opacity: if shown { OPAQUE } else { CLEAR },
                visible: shown,
            });
        }
        changes.rearm = Some(self.schedule.delay_from(now));
        changes
    }

    /// Handles an elapsed delay: advances the index and begins a transition.
    ///
    /// With one element the advance targets the same element, so the step
    /// emits no style work and immediately re-arms. An advance delivered
    /// while a fade is still in flight is ignored — a well-behaved host
    /// never produces one, since the schedule is only re-armed from
    /// [`finish`](Self::finish).
    pub fn advance(&mut self, now: EpochMillis) -> StepChanges {
        let mut changes = StepChanges::default();
        if self.len == 0 || matches!(self.state, TransitionState::Transitioning { .. }) {
            return changes;
        }
        if self.len == 1 {
            if self.config.persist_index {
                changes.persist = Some(0);
            }
            changes.rearm = Some(self.schedule.delay_from(now));
            return changes;
        }

        let cur = self.current;
        let next = (cur + 1) % self.len;
        self.current = next;
        if self.config.persist_index {
            changes.persist = Some(next);
        }

        let duration = self.config.fade_period();
        if next == 0 {
            // Wrap: reveal element 0 underneath, fade the old top away.
            changes.snaps.push(Snap {
                index: 0,
                opacity: OPAQUE,
                visible: true,
            });
            changes.fade = Some(FadeSpec {
                index: cur,
                from: OPAQUE,
                to: CLEAR,
                duration,
            });
        } else {
            changes.snaps.push(Snap {
                index: next,
                opacity: CLEAR,
                visible: true,
            });
            changes.fade = Some(FadeSpec {
                index: next,
                from: CLEAR,
                to: OPAQUE,
                duration,
            });
        }
        self.state = TransitionState::Transitioning { outgoing: cur };
        changes
    }

    /// Handles fade completion: restores the Idle invariant and re-arms.
    ///
    /// The outgoing element snaps to hidden at opacity 0; afterwards exactly
    /// one element (the current one) is visible. Ignored when no fade is in
    /// flight.
    pub fn finish(&mut self, now: EpochMillis) -> StepChanges {
        let mut changes = StepChanges::default();
        let TransitionState::Transitioning { outgoing } = self.state else {
            return changes;
        };
        self.state = TransitionState::Idle;
        changes.snaps.push(Snap {
            index: outgoing,
            opacity: CLEAR,
            visible: false,
        });
        changes.rearm = Some(self.schedule.delay_from(now));
        changes
    }

    /// Index of the element currently shown (or being faded toward).
    #[inline]
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Number of elements in the container.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Returns `true` when there are no elements to rotate.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current transition state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> TransitionState {
        self.state
    }

    /// The validated configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &RotatorConfig {
        &self.config
    }
}
