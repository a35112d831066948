// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: element lookup, geometry, styles, and listener plumbing.
//!
//! The drag/drop controller never touches a document directly. Everything it
//! needs from the environment goes through [`Host`]: resolving selectors,
//! measuring elements, reading computed styles, building the proxy overlay,
//! and attaching or detaching input listeners.
//!
//! Implementations exist for the browser DOM (`understory_drag_drop_web`) and
//! for an in-memory document ([`MemoryHost`](crate::memory::MemoryHost)) used in
//! tests and headless tooling.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::input::InputSource;
use crate::selector::Selector;

/// Naming convention a host uses for style property names.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyCase {
    /// `fontSize`, `borderColor`: scripting-style property names.
    #[default]
    Camel,
    /// `font-size`, `border-color`: CSS property names, as passed to
    /// `CSSStyleDeclaration.setProperty`.
    Kebab,
}

impl PropertyCase {
    /// Converts a CSS (kebab-case) property name to this convention.
    ///
    /// ```
    /// use understory_drag_drop::PropertyCase;
    ///
    /// assert_eq!(PropertyCase::Camel.apply("vertical-align"), "verticalAlign");
    /// assert_eq!(PropertyCase::Camel.apply("width"), "width");
    /// assert_eq!(PropertyCase::Kebab.apply("line-height"), "line-height");
    /// ```
    #[must_use]
    pub fn apply(self, css_name: &str) -> Cow<'_, str> {
        match self {
            Self::Kebab => Cow::Borrowed(css_name),
            Self::Camel if !css_name.contains('-') => Cow::Borrowed(css_name),
            Self::Camel => {
                let mut out = String::with_capacity(css_name.len());
                for (i, segment) in css_name.split('-').enumerate() {
                    let mut chars = segment.chars();
                    match chars.next() {
                        Some(first) if i > 0 => {
                            out.extend(first.to_uppercase());
                            out.push_str(chars.as_str());
                        }
                        _ => out.push_str(segment),
                    }
                }
                Cow::Owned(out)
            }
        }
    }
}

/// A child node as seen by the proxy factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChildNode<E> {
    /// A text node. Styles are never copied onto text.
    Text,
    /// An element node.
    Element(E),
}

/// The environment a [`DragDrop`](crate::DragDrop) controller runs in.
///
/// Element handles are non-owning references into the host's document.
/// A handle may outlive its element (for example after the element was removed
/// from the page); hosts report such stale handles by returning `None` from
/// [`bounding_rect`](Self::bounding_rect) and must otherwise tolerate them
/// without panicking.
pub trait Host {
    /// Handle to a document element. Equality is element identity.
    type Element: Clone + PartialEq + fmt::Debug;
    /// Handle for an active document-level move/release subscription.
    type Subscription: fmt::Debug;

    /// Naming convention expected by [`set_style`](Self::set_style).
    const PROPERTY_CASE: PropertyCase = PropertyCase::Camel;

    /// Resolves a selector to elements in document order.
    ///
    /// A selector matching nothing yields an empty list.
    fn find(&self, selector: &Selector<'_>) -> Vec<Self::Element>;

    /// Returns the element's bounding rectangle in pointer coordinates,
    /// or `None` if the handle is stale.
    fn bounding_rect(&self, element: &Self::Element) -> Option<Rect>;

    /// Returns one computed style value, by CSS (kebab-case) property name.
    ///
    /// Unset or unknown properties yield an empty string.
    fn computed_style(&self, element: &Self::Element, property: &str) -> String;

    /// Sets an inline style property. `property` follows
    /// [`PROPERTY_CASE`](Self::PROPERTY_CASE).
    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    /// Deep-clones an element's subtree. The clone is detached.
    fn deep_clone(&mut self, element: &Self::Element) -> Self::Element;

    /// Returns the element's direct children, index-for-index with the document.
    fn child_nodes(&self, element: &Self::Element) -> Vec<ChildNode<Self::Element>>;

    /// Creates a detached, empty container element for the drag proxy.
    fn create_overlay(&mut self) -> Self::Element;

    /// Sets an element's id.
    fn set_id(&mut self, element: &Self::Element, id: &str);

    /// Appends `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Appends an element to the document body.
    fn attach_to_body(&mut self, element: &Self::Element);

    /// Removes an element from the document.
    fn remove(&mut self, element: &Self::Element);

    /// Attaches press (mouse down / touch start) listeners to a newly
    /// registered draggable element.
    ///
    /// Called at most once per element.
    fn listen_for_press(&mut self, element: &Self::Element);

    /// Starts routing document-level move and release input of `source` to the
    /// controller.
    fn subscribe(&mut self, source: InputSource) -> Self::Subscription;

    /// Stops the routing started by [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}
