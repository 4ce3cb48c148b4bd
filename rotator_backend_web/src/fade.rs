// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` opacity tween.
//!
//! [`FadeLoop`] runs a [`FadeSpec`] over a DOM element's opacity, writing a
//! linearly interpolated value each animation frame and invoking a fixed
//! completion callback when the duration elapses. Each callback receives a
//! [`DOMHighResTimeStamp`][mdn] (milliseconds from `performance.now()`),
//! which anchors the tween's elapsed time.
//!
//! At most one fade is ever in flight; starting a new one while another is
//! running replaces it without signalling completion for the old one. The
//! rotator never does this (fades and delays strictly alternate), but the
//! loop must not misbehave if a host does.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp
//! [`FadeSpec`]: rotator_core::rotation::FadeSpec

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use rotator_core::rotation::FadeSpec;
use web_sys::HtmlElement;

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// Computes the tween value at `elapsed_ms` into the fade.
///
/// Returns the opacity to write and whether the fade has finished. The
/// interpolation is linear; a zero duration finishes immediately at `to`.
#[must_use]
pub fn opacity_at(from: f64, to: f64, elapsed_ms: f64, duration_ms: f64) -> (f64, bool) {
    if elapsed_ms >= duration_ms || duration_ms <= 0.0 {
        return (to, true);
    }
    let t = (elapsed_ms / duration_ms).clamp(0.0, 1.0);
    (from + (to - from) * t, false)
}

/// The tween currently in flight.
struct ActiveFade {
    el: HtmlElement,
    from: f64,
    to: f64,
    duration_ms: f64,
    /// Timestamp of the first frame; the tween's elapsed time is measured
    /// from here rather than from `start()`, so the first frame writes
    /// `from` exactly.
    started_at: Option<f64>,
}

/// A `requestAnimationFrame` loop that tweens one element's opacity.
///
/// Create with [`FadeLoop::new`], then call [`start`](Self::start) with the
/// element and [`FadeSpec`] for each transition. The loop re-registers
/// itself each frame until the duration elapses, then invokes the
/// completion callback.
pub struct FadeLoop {
    inner: Rc<FadeInner>,
}

struct FadeInner {
    /// The JS closure registered with `requestAnimationFrame`.
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,

    /// The user-supplied completion callback.
    on_complete: RefCell<Box<dyn FnMut()>>,

    /// The fade currently running, if any.
    active: RefCell<Option<ActiveFade>>,

    /// The ID returned by the most recent `requestAnimationFrame` call.
    raf_id: Cell<i32>,
}

impl FadeLoop {
    /// Creates a fade loop that is **not yet running**.
    ///
    /// `on_complete` runs once per finished fade, after the final opacity
    /// has been written.
    pub fn new(on_complete: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(FadeInner {
            closure: RefCell::new(None),
            on_complete: RefCell::new(Box::new(on_complete)),
            active: RefCell::new(None),
            raf_id: Cell::new(0),
        });

        let closure_inner = Rc::clone(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let finished = {
                let mut active = closure_inner.active.borrow_mut();
                let Some(fade) = active.as_mut() else {
                    return;
                };
                let started = *fade.started_at.get_or_insert(timestamp_ms);
                let (opacity, finished) =
                    opacity_at(fade.from, fade.to, timestamp_ms - started, fade.duration_ms);
                let _ = fade
                    .el
                    .style()
                    .set_property("opacity", &format!("{opacity}"));
                if finished {
                    *active = None;
                }
                finished
            };

            if finished {
                // The `active` borrow is released before the callback runs,
                // so a completion handler may start the next fade.
                closure_inner.on_complete.borrow_mut()();
            } else if let Some(ref closure) = *closure_inner.closure.borrow() {
                let id = request_animation_frame(closure.as_ref().unchecked_ref());
                closure_inner.raf_id.set(id);
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Begins tweening `el`'s opacity per `spec`.
    ///
    /// The element's opacity is set to `spec.from` immediately; the first
    /// animation frame anchors the tween's clock. A fade already in flight
    /// is dropped without completing.
    #[expect(
        clippy::cast_precision_loss,
        reason = "fade durations are far below 2^53 ms; exact as f64"
    )]
    pub fn start(&self, el: HtmlElement, spec: FadeSpec) {
        let _ = el.style().set_property("opacity", &format!("{}", spec.from));

        let was_running = self
            .inner
            .active
            .replace(Some(ActiveFade {
                el,
                from: spec.from,
                to: spec.to,
                duration_ms: spec.duration.millis() as f64,
                started_at: None,
            }))
            .is_some();

        // The previous fade's frame is still registered; reuse it.
        if !was_running
            && let Some(ref closure) = *self.inner.closure.borrow()
        {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.raf_id.set(id);
        }
    }

    /// Returns `true` while a fade is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.active.borrow().is_some()
    }
}

impl Drop for FadeLoop {
    fn drop(&mut self) {
        if self.inner.active.borrow_mut().take().is_some() {
            cancel_animation_frame(self.inner.raf_id.get());
        }
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for FadeLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FadeLoop")
            .field("running", &self.is_running())
            .field("raf_id", &self.inner.raf_id.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_endpoints_are_exact() {
        let (start, done) = opacity_at(0.0, 1.0, 0.0, 1000.0);
        assert_eq!(start, 0.0);
        assert!(!done);

        let (end, done) = opacity_at(0.0, 1.0, 1000.0, 1000.0);
        assert_eq!(end, 1.0);
        assert!(done, "elapsed == duration finishes the fade");
    }

    #[test]
    fn tween_is_linear_in_between() {
        let (mid, done) = opacity_at(0.0, 1.0, 500.0, 1000.0);
        assert_eq!(mid, 0.5);
        assert!(!done);

        // Fading out runs the same line in reverse.
        let (mid, _) = opacity_at(1.0, 0.0, 250.0, 1000.0);
        assert_eq!(mid, 0.75);
    }

    #[test]
    fn overshoot_clamps_to_the_target() {
        let (v, done) = opacity_at(0.0, 1.0, 1500.0, 1000.0);
        assert_eq!(v, 1.0);
        assert!(done);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let (v, done) = opacity_at(0.25, 1.0, 0.0, 0.0);
        assert_eq!(v, 1.0);
        assert!(done);
    }
}
