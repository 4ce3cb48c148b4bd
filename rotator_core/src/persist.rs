// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted index record codec and store contract.
//!
//! The rotator persists one named entry per instance. The entry value is a
//! sub-value record — `name=value` pairs joined with `&` — holding at least
//! a `current` field with the index of the element the rotator is showing
//! (or fading toward). [`IndexRecord`] encodes and parses that record;
//! [`IndexStore`] is the capability backends implement on top of whatever
//! client storage the host provides (the web backend uses cookies).
//!
//! The store is plain read-then-write with no transactional guarantee;
//! one rotator instance per persist key is assumed.

use alloc::format;
use alloc::string::String;

use crate::config::PersistScope;

/// Reads and writes one named, scoped piece of client-side state.
///
/// Implemented by backends ([`CookieStore`] on the web) and by in-memory
/// test doubles. Write failures are not reported; per the error model,
/// capability failures propagate to the host's default handling.
///
/// [`CookieStore`]: https://docs.rs/rotator_backend_web
pub trait IndexStore {
    /// Returns the raw record stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` with the given scope options.
    fn save(&mut self, key: &str, value: &str, scope: &PersistScope);
}

/// The persisted record: currently just the `current` index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexRecord {
    /// Index of the element the rotator is showing (or fading toward).
    pub current: u32,
}

impl IndexRecord {
    /// Encodes the record as a sub-value string.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("current={}", self.current)
    }

    /// Parses a sub-value record, returning `None` when no parseable
    /// `current` field is present.
    ///
    /// Unknown fields are ignored so the record can grow without breaking
    /// older readers.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.split('&').find_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            if name != "current" {
                return None;
            }
            value.parse().ok().map(|current| Self { current })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::borrow::ToOwned;
    use alloc::collections::BTreeMap;

    #[test]
    fn encode_emits_the_current_field() {
        assert_eq!(IndexRecord { current: 3 }.encode(), "current=3");
        assert_eq!(IndexRecord { current: 0 }.encode(), "current=0");
    }

    #[test]
    fn parse_reads_back_what_encode_wrote() {
        let record = IndexRecord { current: 7 };
        assert_eq!(IndexRecord::parse(&record.encode()), Some(record));
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        assert_eq!(
            IndexRecord::parse("seen=12&current=4&theme=dark"),
            Some(IndexRecord { current: 4 })
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in ["", "current", "current=", "current=abc", "current=-1", "x=1"] {
            assert_eq!(IndexRecord::parse(raw), None, "raw {raw:?}");
        }
    }

    /// Minimal in-memory store for exercising the capability contract.
    #[derive(Debug, Default)]
    struct MemoryStore {
        entries: BTreeMap<String, String>,
    }

    impl IndexStore for MemoryStore {
        fn load(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn save(&mut self, key: &str, value: &str, _scope: &PersistScope) {
            self.entries.insert(key.to_owned(), value.to_owned());
        }
    }

    #[test]
    fn store_round_trip() {
        let mut store = MemoryStore::default();
        let scope = PersistScope::default();
        assert_eq!(store.load("elementrotator"), None);

        store.save("elementrotator", &IndexRecord { current: 2 }.encode(), &scope);
        let raw = store.load("elementrotator").expect("entry was written");
        assert_eq!(IndexRecord::parse(&raw), Some(IndexRecord { current: 2 }));
    }
}
