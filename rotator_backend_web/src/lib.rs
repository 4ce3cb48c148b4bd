// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for the rotator.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomStage`]: style mutation on the container's element children
//! - [`Timer`]: `setTimeout` one-shot delay
//! - [`FadeLoop`]: `requestAnimationFrame` opacity tween
//! - [`CookieStore`]: cookie-backed index persistence
//! - [`ElementRotator`]: the driver wiring everything into the event loop
//!
//! # Usage
//!
//! ```rust,ignore
//! let container: HtmlElement = document
//!     .get_element_by_id("banner")
//!     .expect("container exists")
//!     .unchecked_into();
//! let rotator = ElementRotator::new(container, RotatorConfig::default())?;
//! rotator.render();
//! ```

#![no_std]

extern crate alloc;

mod cookie;
mod fade;
mod rotator;
mod stage;
mod timer;

pub use cookie::CookieStore;
pub use fade::FadeLoop;
pub use rotator::ElementRotator;
pub use rotator_core::backend::Stage;
pub use stage::DomStage;
pub use timer::Timer;

use rotator_core::time::EpochMillis;

/// Returns the current wall-clock time from `Date.now()`.
///
/// Wall-clock rather than monotonic, because the clock-sync grid is
/// anchored at the Unix epoch and must agree across instances and reloads.
#[must_use]
pub fn now() -> EpochMillis {
    let ms = timer::date_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Date.now() returns positive integral milliseconds; fits in u64"
    )]
    EpochMillis(ms as u64)
}
