// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export for recorded traces.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes a JSON array of event objects to the given writer, one object
//! per event with an `"event"` discriminant. The output is meant for ad-hoc
//! tooling (jq, spreadsheets, timeline scripts) rather than any fixed schema.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Schedule(e) => {
                events.push(json!({
                    "event": "schedule",
                    "at_ms": e.at.0,
                    "delay_ms": e.delay.millis(),
                    "clock_sync": e.clock_sync,
                }));
            }
            RecordedEvent::TransitionBegin(e) => {
                events.push(json!({
                    "event": "transition_begin",
                    "from": e.from,
                    "to": e.to,
                    "wrap": e.wrap,
                    "duration_ms": e.duration.millis(),
                }));
            }
            RecordedEvent::TransitionEnd(e) => {
                events.push(json!({
                    "event": "transition_end",
                    "current": e.current,
                    "at_ms": e.at.0,
                }));
            }
            RecordedEvent::IndexRestored(e) => {
                events.push(json!({
                    "event": "index_restored",
                    "stored": e.stored,
                    "applied": e.applied,
                }));
            }
            RecordedEvent::IndexPersisted(e) => {
                events.push(json!({
                    "event": "index_persisted",
                    "index": e.index,
                }));
            }
        }
    }

    serde_json::to_writer_pretty(&mut *writer, &Value::Array(events))
        .map_err(io::Error::other)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use rotator_core::time::{EpochMillis, Millis};
    use rotator_core::trace::{ScheduleEvent, TraceSink as _, TransitionEndEvent};

    #[test]
    fn export_writes_one_object_per_event() {
        let mut rec = RecorderSink::new();
        rec.on_schedule(&ScheduleEvent {
            at: EpochMillis(12_000),
            delay: Millis(3000),
            clock_sync: true,
        });
        rec.on_transition_end(&TransitionEndEvent {
            current: 1,
            at: EpochMillis(16_000),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let array = parsed.as_array().expect("top-level array");
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["event"], "schedule");
        assert_eq!(array[0]["delay_ms"], 3000);
        assert_eq!(array[0]["clock_sync"], true);
        assert_eq!(array[1]["event"], "transition_end");
        assert_eq!(array[1]["current"], 1);
    }

    #[test]
    fn export_of_nothing_is_an_empty_array() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, json!([]));
    }
}
