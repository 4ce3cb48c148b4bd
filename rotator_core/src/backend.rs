// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The rotator splits platform-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Clock** — A `now() -> EpochMillis` free function reading the
//!   platform's wall clock (web: `Date.now()`). Wall-clock rather than
//!   monotonic, because the clock-sync grid is anchored at the Unix epoch
//!   and must agree across instances and reloads.
//!
//! - **Timer** — A one-shot delay that fires a callback after a given
//!   [`Millis`]. This is backend-specific and not abstracted by a trait
//!   because setup and lifetime management differ fundamentally across
//!   hosts (web: `setTimeout` with a retained JS closure).
//!
//! - **Stage** — Implements the [`Stage`] trait to write element styles.
//!   The backend also owns one-time element preparation (absolute
//!   positioning, stacking order, positioning context on the container),
//!   which is a pure style concern the core never sees.
//!
//! - **Fade driver** — Runs a [`FadeSpec`] tween over an element's opacity
//!   and signals completion (web: a `requestAnimationFrame` loop). Kept out
//!   of the [`Stage`] trait because it needs a completion callback, whose
//!   shape is host-specific.
//!
//! - **Store** — Implements [`IndexStore`](crate::persist::IndexStore) over
//!   whatever named, scoped client state the host offers (web: cookies).
//!
//! # Crate boundaries
//!
//! `rotator_core` owns the data model, scheduling, the state machine, and
//! this contract module. Backend crates depend on `rotator_core` and
//! provide platform glue. A driver type in the backend wires the pieces
//! into the event loop.
//!
//! # Step loop pseudocode
//!
//! ```rust,ignore
//! fn on_timer_elapsed() {
//!     let changes = rotator.advance(now());
//!     dispatch(changes);
//! }
//!
//! fn on_fade_complete() {
//!     let changes = rotator.finish(now());
//!     dispatch(changes);
//! }
//!
//! fn dispatch(changes: StepChanges) {
//!     stage.apply(&changes);
//!     if let Some(index) = changes.persist {
//!         store.save(key, &IndexRecord { current: index }.encode(), scope);
//!     }
//!     if let Some(fade) = changes.fade {
//!         fade_driver.run(fade, on_fade_complete);
//!     }
//!     if let Some(delay) = changes.rearm {
//!         timer.arm(delay, on_timer_elapsed);
//!     }
//! }
//! ```
//!
//! [`FadeSpec`]: crate::rotation::FadeSpec
//! [`Millis`]: crate::time::Millis

use crate::rotation::StepChanges;

/// Writes element styles in response to a step.
///
/// Both DOM-backed stages and test doubles implement this trait, enabling
/// generic drivers and invariant checks. `apply` handles the immediate
/// snaps in [`StepChanges::snaps`]; the `fade`, `rearm`, and `persist`
/// actions are dispatched by the driver to the other capabilities.
pub trait Stage {
    /// Applies the style snaps from the given [`StepChanges`].
    fn apply(&mut self, changes: &StepChanges);
}
