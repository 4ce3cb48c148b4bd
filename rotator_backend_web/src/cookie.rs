// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cookie-backed index persistence.
//!
//! [`CookieStore`] implements the [`IndexStore`] capability over
//! `document.cookie`. The entry name and value are percent-encoded with the
//! `encodeURIComponent` character set, and the configured
//! [`PersistScope`] is rendered into `path`/`domain`/`secure` attributes on
//! every write. Reads scan the cookie header; writes are fire-and-forget,
//! matching the error model (capability failures propagate to the host's
//! default handling, there are no retries).
//!
//! [`IndexStore`]: rotator_core::persist::IndexStore
//! [`PersistScope`]: rotator_core::config::PersistScope

use alloc::string::String;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};
use wasm_bindgen::JsCast as _;
use web_sys::HtmlDocument;

use rotator_core::config::PersistScope;
use rotator_core::persist::IndexStore;

/// The `encodeURIComponent` character set: everything but
/// `A–Z a–z 0–9 - _ . ! ~ * ' ( )` is escaped.
const COOKIE_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Renders a `Set-Cookie`-shaped assignment string for `document.cookie`.
fn format_cookie(key: &str, value: &str, scope: &PersistScope) -> String {
    let mut cookie = String::new();
    cookie.extend(percent_encode(key.as_bytes(), COOKIE_COMPONENT));
    cookie.push('=');
    cookie.extend(percent_encode(value.as_bytes(), COOKIE_COMPONENT));
    if let Some(path) = &scope.path {
        cookie.push_str("; path=");
        cookie.push_str(path);
    }
    if let Some(domain) = &scope.domain {
        cookie.push_str("; domain=");
        cookie.push_str(domain);
    }
    if scope.secure {
        cookie.push_str("; secure");
    }
    cookie
}

/// Finds `key` in a cookie header (`a=1; b=2; …`) and returns its decoded
/// value.
fn find_cookie(header: &str, key: &str) -> Option<String> {
    let encoded_key: String = percent_encode(key.as_bytes(), COOKIE_COMPONENT).collect();
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name != encoded_key {
            return None;
        }
        percent_decode_str(value)
            .decode_utf8()
            .ok()
            .map(String::from)
    })
}

/// Reads and writes one named cookie per persist key.
pub struct CookieStore {
    document: HtmlDocument,
}

impl core::fmt::Debug for CookieStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CookieStore").finish_non_exhaustive()
    }
}

impl CookieStore {
    /// Creates a store over the current page's document.
    ///
    /// # Panics
    ///
    /// Panics outside a browsing context (no window or document).
    #[must_use]
    pub fn new() -> Self {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
            .unchecked_into();
        Self { document }
    }
}

impl Default for CookieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexStore for CookieStore {
    fn load(&self, key: &str) -> Option<String> {
        let header = self.document.cookie().ok()?;
        find_cookie(&header, key)
    }

    fn save(&mut self, key: &str, value: &str, scope: &PersistScope) {
        let _ = self.document.set_cookie(&format_cookie(key, value, scope));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn scope(path: Option<&str>, domain: Option<&str>, secure: bool) -> PersistScope {
        PersistScope {
            path: path.map(ToString::to_string),
            domain: domain.map(ToString::to_string),
            secure,
        }
    }

    #[test]
    fn format_renders_the_default_scope() {
        let cookie = format_cookie("elementrotator", "current=3", &PersistScope::default());
        assert_eq!(cookie, "elementrotator=current%3D3; path=/");
    }

    #[test]
    fn format_renders_domain_and_secure() {
        let cookie = format_cookie(
            "rotator",
            "current=0",
            &scope(Some("/app"), Some("example.com"), true),
        );
        assert_eq!(
            cookie,
            "rotator=current%3D0; path=/app; domain=example.com; secure"
        );
    }

    #[test]
    fn format_omits_absent_scope_parts() {
        let cookie = format_cookie("rotator", "current=1", &scope(None, None, false));
        assert_eq!(cookie, "rotator=current%3D1");
    }

    #[test]
    fn find_decodes_the_stored_value() {
        let header = "theme=dark; elementrotator=current%3D7; session=abc";
        assert_eq!(
            find_cookie(header, "elementrotator").as_deref(),
            Some("current=7")
        );
    }

    #[test]
    fn find_reads_back_what_format_wrote() {
        let cookie = format_cookie("my rotator", "current=12", &PersistScope::default());
        // `document.cookie` reads back only the name=value pair.
        let pair = cookie.split(';').next().expect("assignment pair");
        assert_eq!(find_cookie(pair, "my rotator").as_deref(), Some("current=12"));
    }

    #[test]
    fn find_misses_cleanly() {
        assert_eq!(find_cookie("a=1; b=2", "c"), None);
        assert_eq!(find_cookie("", "a"), None);
        assert_eq!(find_cookie("malformed", "malformed"), None);
    }
}
