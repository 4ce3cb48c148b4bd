// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are epoch milliseconds, printed as-is.

use std::io::Write;

use rotator_core::trace::{
    IndexPersistedEvent, IndexRestoredEvent, ScheduleEvent, TraceSink, TransitionBeginEvent,
    TransitionEndEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl Default for PrettyPrintSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_schedule(&mut self, e: &ScheduleEvent) {
        let sync = if e.clock_sync { "grid" } else { "free" };
        let _ = writeln!(
            self.writer,
            "[schedule] at={}ms delay={}ms ({sync})",
            e.at.0,
            e.delay.millis(),
        );
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        let wrap = if e.wrap { " wrap" } else { "" };
        let _ = writeln!(
            self.writer,
            "[fade:begin] {} -> {}{wrap} duration={}ms",
            e.from,
            e.to,
            e.duration.millis(),
        );
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        let _ = writeln!(
            self.writer,
            "[fade:end] current={} at={}ms",
            e.current, e.at.0,
        );
    }

    fn on_index_restored(&mut self, e: &IndexRestoredEvent) {
        let _ = writeln!(
            self.writer,
            "[restore] stored={} applied={}",
            e.stored, e.applied,
        );
    }

    fn on_index_persisted(&mut self, e: &IndexPersistedEvent) {
        let _ = writeln!(self.writer, "[persist] index={}", e.index);
    }
}
