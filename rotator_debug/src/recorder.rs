// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use rotator_core::time::{EpochMillis, Millis};
use rotator_core::trace::{
    IndexPersistedEvent, IndexRestoredEvent, ScheduleEvent, TraceSink, TransitionBeginEvent,
    TransitionEndEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SCHEDULE: u8 = 1;
const TAG_TRANSITION_BEGIN: u8 = 2;
const TAG_TRANSITION_END: u8 = 3;
const TAG_INDEX_RESTORED: u8 = 4;
const TAG_INDEX_PERSISTED: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }
}

impl TraceSink for RecorderSink {
    fn on_schedule(&mut self, e: &ScheduleEvent) {
        self.write_u8(TAG_SCHEDULE);
        self.write_u64(e.at.0);
        self.write_u64(e.delay.millis());
        self.write_bool(e.clock_sync);
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.write_u8(TAG_TRANSITION_BEGIN);
        self.write_u32(e.from);
        self.write_u32(e.to);
        self.write_bool(e.wrap);
        self.write_u64(e.duration.millis());
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        self.write_u8(TAG_TRANSITION_END);
        self.write_u32(e.current);
        self.write_u64(e.at.0);
    }

    fn on_index_restored(&mut self, e: &IndexRestoredEvent) {
        self.write_u8(TAG_INDEX_RESTORED);
        self.write_u32(e.stored);
        self.write_u32(e.applied);
    }

    fn on_index_persisted(&mut self, e: &IndexPersistedEvent) {
        self.write_u8(TAG_INDEX_PERSISTED);
        self.write_u32(e.index);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`ScheduleEvent`].
    Schedule(ScheduleEvent),
    /// A [`TransitionBeginEvent`].
    TransitionBegin(TransitionBeginEvent),
    /// A [`TransitionEndEvent`].
    TransitionEnd(TransitionEndEvent),
    /// An [`IndexRestoredEvent`].
    IndexRestored(IndexRestoredEvent),
    /// An [`IndexPersistedEvent`].
    IndexPersisted(IndexPersistedEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn decode_schedule(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Schedule(ScheduleEvent {
            at: EpochMillis(self.read_u64()?),
            delay: Millis(self.read_u64()?),
            clock_sync: self.read_bool()?,
        }))
    }

    fn decode_transition_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TransitionBegin(TransitionBeginEvent {
            from: self.read_u32()?,
            to: self.read_u32()?,
            wrap: self.read_bool()?,
            duration: Millis(self.read_u64()?),
        }))
    }

    fn decode_transition_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TransitionEnd(TransitionEndEvent {
            current: self.read_u32()?,
            at: EpochMillis(self.read_u64()?),
        }))
    }

    fn decode_index_restored(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::IndexRestored(IndexRestoredEvent {
            stored: self.read_u32()?,
            applied: self.read_u32()?,
        }))
    }

    fn decode_index_persisted(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::IndexPersisted(IndexPersistedEvent {
            index: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SCHEDULE => self.decode_schedule(),
            TAG_TRANSITION_BEGIN => self.decode_transition_begin(),
            TAG_TRANSITION_END => self.decode_transition_end(),
            TAG_INDEX_RESTORED => self.decode_index_restored(),
            TAG_INDEX_PERSISTED => self.decode_index_persisted(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rotator_core::trace::Tracer;

    fn sample_schedule() -> ScheduleEvent {
        ScheduleEvent {
            at: EpochMillis(1_700_000_012_000),
            delay: Millis(3000),
            clock_sync: true,
        }
    }

    fn sample_begin() -> TransitionBeginEvent {
        TransitionBeginEvent {
            from: 2,
            to: 0,
            wrap: true,
            duration: Millis(1000),
        }
    }

    #[test]
    fn round_trip_schedule() {
        let mut rec = RecorderSink::new();
        let orig = sample_schedule();
        rec.on_schedule(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Schedule(e) => {
                assert_eq!(e.at.0, orig.at.0);
                assert_eq!(e.delay, orig.delay);
                assert_eq!(e.clock_sync, orig.clock_sync);
            }
            other => panic!("expected Schedule, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_transition_pair() {
        let mut rec = RecorderSink::new();
        rec.on_transition_begin(&sample_begin());
        rec.on_transition_end(&TransitionEndEvent {
            current: 0,
            at: EpochMillis(1_700_000_013_000),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::TransitionBegin(e) => {
                assert_eq!((e.from, e.to), (2, 0));
                assert!(e.wrap, "2 -> 0 is the wrap transition");
                assert_eq!(e.duration, Millis(1000));
            }
            other => panic!("expected TransitionBegin, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::TransitionEnd(e) => {
                assert_eq!(e.current, 0);
                assert_eq!(e.at.0, 1_700_000_013_000);
            }
            other => panic!("expected TransitionEnd, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_index_events() {
        let mut rec = RecorderSink::new();
        rec.on_index_restored(&IndexRestoredEvent {
            stored: 7,
            applied: 1,
        });
        rec.on_index_persisted(&IndexPersistedEvent { index: 1 });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            RecordedEvent::IndexRestored(IndexRestoredEvent {
                stored: 7,
                applied: 1,
            })
        ));
        assert!(matches!(
            events[1],
            RecordedEvent::IndexPersisted(IndexPersistedEvent { index: 1 })
        ));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_schedule(&sample_schedule());
        let bytes = rec.into_bytes();

        let events: Vec<_> = decode(&bytes[..bytes.len() - 1]).collect();
        assert!(events.is_empty(), "partial record must not decode");
    }

    #[test]
    fn tracer_feeds_the_recorder() {
        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            tracer.schedule(&sample_schedule());
            tracer.transition_begin(&sample_begin());
        }

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], RecordedEvent::Schedule(_)));
        assert!(matches!(events[1], RecordedEvent::TransitionBegin(_)));
    }
}
