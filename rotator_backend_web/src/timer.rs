// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` one-shot timer.
//!
//! [`Timer`] arms a single pending delay and invokes a fixed callback when
//! it elapses. Re-arming replaces the pending delay; at most one is ever
//! outstanding, which is exactly the shape the rotator's schedule needs
//! (the delay and the fade strictly alternate).

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use rotator_core::time::Millis;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object on every arm.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: f64) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);

    #[wasm_bindgen(js_namespace = Date, js_name = "now")]
    pub(crate) fn date_now() -> f64;
}

/// A re-armable one-shot timer wrapping `setTimeout`.
///
/// Create with [`Timer::new`], then call [`arm`](Self::arm) whenever a new
/// delay should be scheduled. The JS closure is created once and re-used
/// for every arm.
pub struct Timer {
    inner: Rc<TimerInner>,
}

struct TimerInner {
    /// The JS closure registered with `setTimeout`.
    ///
    /// Stored in its own `RefCell` so it can be set once at construction
    /// and referenced from inside itself without conflicting with
    /// `callback`.
    closure: RefCell<Option<Closure<dyn FnMut()>>>,

    /// The user-supplied callback invoked when the delay elapses.
    callback: RefCell<Box<dyn FnMut()>>,

    /// The ID returned by the most recent `setTimeout` call.
    timeout_id: Cell<i32>,

    /// Whether a delay is currently pending.
    armed: Cell<bool>,
}

impl Timer {
    /// Creates a timer that is **not yet armed**.
    ///
    /// `callback` runs each time an armed delay elapses.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(TimerInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            timeout_id: Cell::new(0),
            armed: Cell::new(false),
        });

        let closure_inner = Rc::clone(&inner);
        let closure = Closure::wrap(Box::new(move || {
            closure_inner.armed.set(false);
            // The borrow is scoped so a callback that re-arms the timer
            // doesn't overlap with the `closure` RefCell.
            closure_inner.callback.borrow_mut()();
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Arms the timer to fire after `delay`.
    ///
    /// A previously pending delay is cancelled first; the timer never has
    /// two delays outstanding. A delay of zero is valid and fires on the
    /// next event-loop turn.
    pub fn arm(&self, delay: Millis) {
        if self.inner.armed.get() {
            clear_timeout(self.inner.timeout_id.get());
        }
        if let Some(ref closure) = *self.inner.closure.borrow() {
            #[expect(
                clippy::cast_precision_loss,
                reason = "delays are far below 2^53 ms; exact as f64"
            )]
            let id = set_timeout(closure.as_ref().unchecked_ref(), delay.millis() as f64);
            self.inner.timeout_id.set(id);
            self.inner.armed.set(true);
        }
    }

    /// Cancels the pending delay, if any.
    pub fn cancel(&self) {
        if self.inner.armed.get() {
            clear_timeout(self.inner.timeout_id.get());
            self.inner.armed.set(false);
        }
    }

    /// Returns `true` while a delay is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.inner.armed.get()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for Timer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timer")
            .field("armed", &self.inner.armed.get())
            .field("timeout_id", &self.inner.timeout_id.get())
            .finish()
    }
}
