// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state machine, scheduling, and persistence model for timed element
//! cross-fades.
//!
//! `rotator_core` drives a fixed set of sibling elements inside a container,
//! cross-fading from the currently shown element to the next on a timer. It
//! is `no_std` compatible (with `alloc`) and performs no platform work: the
//! three capabilities it needs — style mutation, tween execution, and
//! persisted named state — are provided by backend crates (see [`backend`]).
//!
//! # Architecture
//!
//! The crate is organized around an event-driven step loop that turns host
//! callbacks into change sets:
//!
//! ```text
//!   Timer (delay elapsed)
//!       │
//!       ▼
//!   Rotator::advance() ──► StepChanges ──► Stage::apply() + fade + persist
//!                                               │
//!                         fade runs to end ─────┘
//!                                               ▼
//!   Rotator::finish() ──► StepChanges ──► Stage::apply() + re-armed timer
//! ```
//!
//! **[`rotation`]** — The `Idle ⇄ Transitioning` state machine, current
//! index, and the [`StepChanges`](rotation::StepChanges) each step emits.
//!
//! **[`schedule`]** — Delay computation, optionally aligned to a show-period
//! grid anchored at the Unix epoch so independent instances transition in
//! lockstep.
//!
//! **[`config`]** — Typed configuration with one-shot validation; invalid
//! options are rejected, never coerced.
//!
//! **[`persist`]** — The persisted index record codec and the
//! [`IndexStore`](persist::IndexStore) capability contract.
//!
//! **[`backend`]** — The [`Stage`](backend::Stage) trait and the contract
//! backend crates implement to host a rotator.
//!
//! **[`time`]** — Wall-clock [`EpochMillis`](time::EpochMillis) instants and
//! [`Millis`](time::Millis) durations.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! step-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod persist;
pub mod rotation;
pub mod schedule;
pub mod time;
pub mod trace;
