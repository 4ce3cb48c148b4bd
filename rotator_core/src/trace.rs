// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the rotate loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! drivers call at each stage of the loop. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::time::{EpochMillis, Millis};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a delay is armed for the next transition.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleEvent {
    /// Wall-clock time when the delay was computed.
    pub at: EpochMillis,
    /// The armed delay.
    pub delay: Millis,
    /// Whether the delay was aligned to the epoch grid.
    pub clock_sync: bool,
}

/// Emitted when a transition is initiated.
#[derive(Clone, Copy, Debug)]
pub struct TransitionBeginEvent {
    /// Index the rotator was showing.
    pub from: u32,
    /// Index being faded toward (already the current index).
    pub to: u32,
    /// Whether this is the wrap-around transition back to element 0.
    pub wrap: bool,
    /// Fade duration.
    pub duration: Millis,
}

/// Emitted when a fade completes and the Idle invariant is restored.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEndEvent {
    /// The element now fully visible.
    pub current: u32,
    /// Wall-clock time of completion.
    pub at: EpochMillis,
}

/// Emitted when a stored index is applied at initialization.
#[derive(Clone, Copy, Debug)]
pub struct IndexRestoredEvent {
    /// The raw stored index.
    pub stored: u32,
    /// The index actually applied (stored reduced modulo the element count).
    pub applied: u32,
}

/// Emitted when the index is written back to the persisted entry.
#[derive(Clone, Copy, Debug)]
pub struct IndexPersistedEvent {
    /// The index that was written.
    pub index: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the rotate loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a delay is armed.
    fn on_schedule(&mut self, e: &ScheduleEvent) {
        _ = e;
    }

    /// Called when a transition is initiated.
    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        _ = e;
    }

    /// Called when a fade completes.
    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        _ = e;
    }

    /// Called when a stored index is applied.
    fn on_index_restored(&mut self, e: &IndexRestoredEvent) {
        _ = e;
    }

    /// Called when the index is persisted.
    fn on_index_persisted(&mut self, e: &IndexPersistedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that dispatches nowhere.
    #[inline]
    #[must_use]
    pub fn disabled() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Reports an armed delay.
    #[inline]
    pub fn schedule(&mut self, e: &ScheduleEvent) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_schedule(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Reports an initiated transition.
    #[inline]
    pub fn transition_begin(&mut self, e: &TransitionBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_transition_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Reports a completed fade.
    #[inline]
    pub fn transition_end(&mut self, e: &TransitionEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_transition_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Reports an applied stored index.
    #[inline]
    pub fn index_restored(&mut self, e: &IndexRestoredEvent) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_index_restored(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Reports a persisted index.
    #[inline]
    pub fn index_persisted(&mut self, e: &IndexPersistedEvent) {
        #[cfg(feature = "trace")]
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_index_persisted(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_accepts_every_event() {
        let mut sink = NoopSink;
        sink.on_schedule(&ScheduleEvent {
            at: EpochMillis(0),
            delay: Millis(5000),
            clock_sync: false,
        });
        sink.on_transition_begin(&TransitionBeginEvent {
            from: 0,
            to: 1,
            wrap: false,
            duration: Millis(1000),
        });
        sink.on_transition_end(&TransitionEndEvent {
            current: 1,
            at: EpochMillis(1000),
        });
        sink.on_index_restored(&IndexRestoredEvent {
            stored: 7,
            applied: 1,
        });
        sink.on_index_persisted(&IndexPersistedEvent { index: 1 });
    }

    #[cfg(feature = "trace")]
    #[derive(Default)]
    struct CountingSink {
        schedules: u32,
        begins: u32,
        ends: u32,
    }

    #[cfg(feature = "trace")]
    impl TraceSink for CountingSink {
        fn on_schedule(&mut self, _e: &ScheduleEvent) {
            self.schedules += 1;
        }

        fn on_transition_begin(&mut self, _e: &TransitionBeginEvent) {
            self.begins += 1;
        }

        fn on_transition_end(&mut self, _e: &TransitionEndEvent) {
            self.ends += 1;
        }
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_the_sink() {
        let mut sink = CountingSink::default();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.schedule(&ScheduleEvent {
                at: EpochMillis(0),
                delay: Millis(5000),
                clock_sync: true,
            });
            tracer.transition_begin(&TransitionBeginEvent {
                from: 0,
                to: 1,
                wrap: false,
                duration: Millis(1000),
            });
            tracer.transition_end(&TransitionEndEvent {
                current: 1,
                at: EpochMillis(1000),
            });
        }
        assert_eq!((sink.schedules, sink.begins, sink.ends), (1, 1, 1));
    }

    #[test]
    fn disabled_tracer_is_inert() {
        let mut tracer = Tracer::disabled();
        tracer.schedule(&ScheduleEvent {
            at: EpochMillis(0),
            delay: Millis(1),
            clock_sync: false,
        });
        tracer.index_persisted(&IndexPersistedEvent { index: 0 });
    }
}
