// Copyright 2026 the Rotator Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! [`DomStage`] captures the container's direct element children at
//! construction time (the element sequence is fixed after that), prepares
//! them for stacked rotation, and applies [`StepChanges`] style snaps.
//!
//! [`StepChanges`]: rotator_core::rotation::StepChanges

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use rotator_core::backend::Stage;
use rotator_core::rotation::StepChanges;
use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

/// Positioning values that already establish a stacking context.
const POSITIONED: [&str; 3] = ["relative", "absolute", "fixed"];

/// Whether preparation must force `position: relative` on the container.
///
/// Never with zero children (an empty container is left untouched), and
/// never when the computed position already establishes a context. An
/// unreadable computed style counts as unpositioned.
fn should_force_positioning(child_count: usize, computed_position: Option<&str>) -> bool {
    child_count > 0 && !matches!(computed_position, Some(p) if POSITIONED.contains(&p))
}

/// Maps the rotator's element ordinals to live DOM elements and applies
/// style snaps.
///
/// The stage owns the container `HtmlElement` and a fixed, document-ordered
/// list of its direct element children, captured once at construction.
/// Children added or removed later are not observed.
pub struct DomStage {
    container: HtmlElement,
    elements: Vec<HtmlElement>,
}

impl core::fmt::Debug for DomStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomStage")
            .field("container", &"HtmlElement")
            .field("elements_len", &self.elements.len())
            .finish()
    }
}

impl DomStage {
    /// Creates a stage over the direct element children of `container`, in
    /// document order.
    ///
    /// Non-HTML element children (e.g. inline SVG roots) are skipped; text
    /// and comment nodes are never part of `children()` to begin with.
    #[must_use]
    pub fn new(container: HtmlElement) -> Self {
        let children = container.children();
        let mut elements = Vec::with_capacity(children.length() as usize);
        for i in 0..children.length() {
            if let Some(el) = children.item(i)
                && let Ok(el) = el.dyn_into::<HtmlElement>()
            {
                elements.push(el);
            }
        }
        Self {
            container,
            elements,
        }
    }

    /// Number of rotating elements.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "element count comes from HtmlCollection::length, a u32"
    )]
    pub fn len(&self) -> u32 {
        self.elements.len() as u32
    }

    /// Returns `true` when the container has no element children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns a reference to the container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Returns the DOM element at the given ordinal, if it exists.
    #[must_use]
    pub fn element(&self, index: u32) -> Option<&HtmlElement> {
        self.elements.get(index as usize)
    }

    /// One-time element preparation, run at render time.
    ///
    /// Stacks every child absolutely at the container's origin with
    /// `z-index` equal to its ordinal, and forces the container to
    /// `position: relative` when its computed position would not otherwise
    /// establish a positioning context for the children. With zero element
    /// children nothing is touched, the container included.
    pub fn prepare(&self) {
        let position = self.computed_position();
        if should_force_positioning(self.elements.len(), position.as_deref()) {
            let _ = self
                .container
                .style()
                .set_property("position", "relative");
        }
        for (j, el) in self.elements.iter().enumerate() {
            let s = el.style();
            let _ = s.set_property("position", "absolute");
            let _ = s.set_property("left", "0");
            let _ = s.set_property("top", "0");
            let _ = s.set_property("z-index", &format!("{j}"));
        }
    }

    /// Reads the container's computed `position` value, if available.
    fn computed_position(&self) -> Option<String> {
        let window = web_sys::window()?;
        let computed = window.get_computed_style(&self.container).ok()??;
        computed.get_property_value("position").ok()
    }
}

impl Stage for DomStage {
    /// Applies the style snaps: opacity as a number, visibility as
    /// `visible`/`hidden`.
    fn apply(&mut self, changes: &StepChanges) {
        for snap in &changes.snaps {
            if let Some(el) = self.elements.get(snap.index as usize) {
                let s = el.style();
                let _ = s.set_property("opacity", &format!("{}", snap.opacity));
                let _ = s.set_property(
                    "visibility",
                    if snap.visible { "visible" } else { "hidden" },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_container_is_never_repositioned() {
        assert!(!should_force_positioning(0, Some("static")));
        assert!(!should_force_positioning(0, Some("relative")));
        assert!(!should_force_positioning(0, None));
    }

    #[test]
    fn unpositioned_container_with_children_is_forced() {
        assert!(should_force_positioning(3, Some("static")));
        assert!(should_force_positioning(1, Some("sticky")));
        assert!(should_force_positioning(2, None), "unreadable style counts as unpositioned");
    }

    #[test]
    fn positioned_container_is_left_alone() {
        for position in POSITIONED {
            assert!(
                !should_force_positioning(3, Some(position)),
                "{position} already establishes a context"
            );
        }
    }
}
