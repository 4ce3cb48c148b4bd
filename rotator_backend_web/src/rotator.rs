// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The browser driver.
//!
//! [`ElementRotator`] wires a [`Rotator`] to the web capabilities — the
//! [`DomStage`], the [`Timer`], the [`FadeLoop`], and the [`CookieStore`] —
//! and runs the step loop on the browser's event loop. Each host callback
//! (timer elapsed, fade completed) produces one
//! [`StepChanges`](rotator_core::rotation::StepChanges), which is dispatched
//! in order: snaps, persistence write, fade start, timer re-arm.
//!
//! There is no stop operation: once [`render`](ElementRotator::render) has
//! started the loop it runs until the page is torn down or the driver is
//! dropped (dropping releases the JS closures, so no further callback can
//! re-arm).

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use web_sys::HtmlElement;

use rotator_core::backend::Stage as _;
use rotator_core::config::{ConfigError, RotatorConfig};
use rotator_core::persist::{IndexRecord, IndexStore as _};
use rotator_core::rotation::{Rotator, StepChanges};
use rotator_core::trace::{
    IndexPersistedEvent, IndexRestoredEvent, ScheduleEvent, TraceSink, TransitionBeginEvent,
    TransitionEndEvent,
};

use crate::cookie::CookieStore;
use crate::fade::FadeLoop;
use crate::now;
use crate::stage::DomStage;
use crate::timer::Timer;

/// Rotates a container's children in the browser.
///
/// Construct with the container and a [`RotatorConfig`], then call
/// [`render`](Self::render) to prepare the elements and begin the loop.
/// `render` assumes the container's children are already in final form;
/// calling it twice re-prepares the elements and double-schedules, so
/// call it once.
pub struct ElementRotator {
    inner: Rc<Inner>,
}

struct Inner {
    rotator: RefCell<Rotator>,
    stage: RefCell<DomStage>,
    store: RefCell<CookieStore>,
    timer: RefCell<Option<Timer>>,
    fade: RefCell<Option<FadeLoop>>,
    sink: RefCell<Option<Box<dyn TraceSink>>>,
    /// Restore event held until a sink can hear it (see [`report_restored`]).
    restored: Cell<Option<IndexRestoredEvent>>,
}

impl ElementRotator {
    /// Creates a rotator over the direct element children of `container`.
    ///
    /// Fails when `config` does not validate. With persistence enabled, the
    /// stored index is read (once) and applied here. Nothing runs until
    /// [`render`](Self::render).
    pub fn new(container: HtmlElement, config: RotatorConfig) -> Result<Self, ConfigError> {
        let stage = DomStage::new(container);
        let mut rotator = Rotator::new(config, stage.len())?;
        let store = CookieStore::new();

        let mut restored = None;
        if rotator.config().persist_index
            && !rotator.is_empty()
            && let Some(raw) = store.load(&rotator.config().persist_key)
            && let Some(record) = IndexRecord::parse(&raw)
        {
            rotator.restore(record);
            restored = Some(IndexRestoredEvent {
                stored: record.current,
                applied: rotator.current(),
            });
        }

        let inner = Rc::new(Inner {
            rotator: RefCell::new(rotator),
            stage: RefCell::new(stage),
            store: RefCell::new(store),
            timer: RefCell::new(None),
            fade: RefCell::new(None),
            sink: RefCell::new(None),
            restored: Cell::new(restored),
        });

        *inner.timer.borrow_mut() = Some(Timer::new(weak_callback(&inner, on_timer)));
        *inner.fade.borrow_mut() = Some(FadeLoop::new(weak_callback(&inner, on_fade_complete)));

        Ok(Self { inner })
    }

    /// Prepares the elements and begins the rotate-forever loop.
    ///
    /// With zero element children this prepares nothing and schedules
    /// nothing; the widget stays inert.
    pub fn render(&self) {
        with_sink(&self.inner, |sink| {
            report_restored(&self.inner.restored, sink);
        });
        self.inner.stage.borrow().prepare();
        let changes = self.inner.rotator.borrow_mut().start(now());
        dispatch(&self.inner, &changes);
    }

    /// Index of the element currently shown (or being faded toward).
    #[must_use]
    pub fn current(&self) -> u32 {
        self.inner.rotator.borrow().current()
    }

    /// Installs a [`TraceSink`] that receives step-loop events.
    ///
    /// Install before [`render`](Self::render) to observe the restore event
    /// from construction; it is delivered when `render` runs.
    pub fn set_trace_sink(&self, sink: impl TraceSink + 'static) {
        *self.inner.sink.borrow_mut() = Some(Box::new(sink));
    }
}

impl core::fmt::Debug for ElementRotator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementRotator")
            .field("current", &self.inner.rotator.borrow().current())
            .field("len", &self.inner.rotator.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Wraps a host callback so it holds only a weak reference to the driver.
///
/// The JS closures inside [`Timer`] and [`FadeLoop`] are owned by `Inner`;
/// a strong capture there would form a reference cycle and keep the loop
/// running after the driver is dropped. A callback firing after the drop
/// fails the upgrade and does nothing.
fn weak_callback<T: 'static>(target: &Rc<T>, f: fn(&T)) -> impl FnMut() + 'static {
    let target = Rc::downgrade(target);
    move || {
        if let Some(target) = target.upgrade() {
            f(&target);
        }
    }
}

/// Delivers the restore event held since construction, at most once.
///
/// The event arises in `new`, before any sink can be installed, so it is
/// parked until `render` runs with a sink in place.
fn report_restored(pending: &Cell<Option<IndexRestoredEvent>>, sink: &mut dyn TraceSink) {
    if let Some(e) = pending.take() {
        sink.on_index_restored(&e);
    }
}

/// The armed delay elapsed: advance the index and begin a transition.
fn on_timer(inner: &Inner) {
    let at = now();
    let (from, changes) = {
        let mut rotator = inner.rotator.borrow_mut();
        let from = rotator.current();
        (from, rotator.advance(at))
    };
    if let Some(fade) = changes.fade {
        let to = inner.rotator.borrow().current();
        with_sink(inner, |sink| {
            sink.on_transition_begin(&TransitionBeginEvent {
                from,
                to,
                wrap: to == 0,
                duration: fade.duration,
            });
        });
    }
    dispatch(inner, &changes);
}

/// The fade finished: restore the Idle invariant and re-arm.
fn on_fade_complete(inner: &Inner) {
    let at = now();
    let changes = inner.rotator.borrow_mut().finish(at);
    let current = inner.rotator.borrow().current();
    with_sink(inner, |sink| {
        sink.on_transition_end(&TransitionEndEvent { current, at });
    });
    dispatch(inner, &changes);
}

/// Applies one step's changes: snaps, persistence, fade, re-arm.
fn dispatch(inner: &Inner, changes: &StepChanges) {
    inner.stage.borrow_mut().apply(changes);

    if let Some(index) = changes.persist {
        let (key, scope) = {
            let rotator = inner.rotator.borrow();
            let config = rotator.config();
            (config.persist_key.clone(), config.persist_scope.clone())
        };
        let record = IndexRecord { current: index };
        inner.store.borrow_mut().save(&key, &record.encode(), &scope);
        with_sink(inner, |sink| {
            sink.on_index_persisted(&IndexPersistedEvent { index });
        });
    }

    if let Some(spec) = changes.fade {
        let el = inner.stage.borrow().element(spec.index).cloned();
        if let Some(el) = el
            && let Some(fade) = inner.fade.borrow().as_ref()
        {
            fade.start(el, spec);
        }
    }

    if let Some(delay) = changes.rearm {
        with_sink(inner, |sink| {
            sink.on_schedule(&ScheduleEvent {
                at: now(),
                delay,
                clock_sync: inner.rotator.borrow().config().clock_sync,
            });
        });
        if let Some(timer) = inner.timer.borrow().as_ref() {
            timer.arm(delay);
        }
    }
}

/// Runs `f` against the installed sink, if any.
fn with_sink(inner: &Inner, f: impl FnOnce(&mut dyn TraceSink)) {
    if let Some(sink) = inner.sink.borrow_mut().as_deref_mut() {
        f(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct RecordingSink {
        restored: Vec<(u32, u32)>,
    }

    impl TraceSink for RecordingSink {
        fn on_index_restored(&mut self, e: &IndexRestoredEvent) {
            self.restored.push((e.stored, e.applied));
        }
    }

    #[test]
    fn held_restore_event_is_delivered_exactly_once() {
        let pending = Cell::new(Some(IndexRestoredEvent {
            stored: 7,
            applied: 1,
        }));
        let mut sink = RecordingSink::default();
        report_restored(&pending, &mut sink);
        report_restored(&pending, &mut sink);
        assert_eq!(sink.restored, vec![(7, 1)]);
        assert!(pending.take().is_none(), "event must be consumed");
    }

    #[test]
    fn no_restore_means_no_event() {
        let pending = Cell::new(None);
        let mut sink = RecordingSink::default();
        report_restored(&pending, &mut sink);
        assert!(sink.restored.is_empty());
    }

    #[test]
    fn weak_callback_holds_no_strong_reference() {
        let target = Rc::new(Cell::new(0_u32));
        let mut callback = weak_callback(&target, |t: &Cell<u32>| t.set(t.get() + 1));
        assert_eq!(
            Rc::strong_count(&target),
            1,
            "callback must not keep its target alive"
        );
        callback();
        assert_eq!(target.get(), 1);
    }

    #[test]
    fn weak_callback_is_inert_after_the_target_drops() {
        let fired = Rc::new(Cell::new(0_u32));
        let target = Rc::new(Rc::clone(&fired));
        let mut callback = weak_callback(&target, |t: &Rc<Cell<u32>>| t.set(t.get() + 1));
        callback();
        assert_eq!(fired.get(), 1);

        drop(target);
        callback();
        assert_eq!(fired.get(), 1, "a fire after the drop must do nothing");
    }
}
