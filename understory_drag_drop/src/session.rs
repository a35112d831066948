// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session and drop resolution records.
//!
//! A [`DragSession`] exists from an accepted press until the release is
//! resolved. It remembers where the source element and the pointer were when
//! the press happened, and derives the proxy position from the pointer's total
//! offset since then:
//!
//! ```text
//! proxy_origin = source_origin + (pointer - pointer_origin)
//! ```
//!
//! A [`DropResolution`] holds the latest hit-test outcome for the session.

use kurbo::{Point, Vec2};

use crate::input::{InputSource, PointerEvent};

/// Lifecycle phase of a [`DragDrop`](crate::DragDrop) controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No press is being tracked.
    #[default]
    Idle,
    /// A draggable was pressed; the pointer has not moved yet.
    Armed,
    /// The pointer moved at least once since the press.
    Dragging,
    /// The release was resolved and listeners are torn down; drop and end
    /// callbacks are running.
    Resolved,
}

/// State of the drag in progress.
#[derive(Clone, Debug)]
pub struct DragSession<E> {
    pub(crate) source: E,
    pub(crate) source_origin: Point,
    pub(crate) pointer_origin: Point,
    pub(crate) proxy: E,
    pub(crate) press: PointerEvent,
    pub(crate) pointer: Point,
    pub(crate) proxy_origin: Point,
    pub(crate) moved: bool,
    pub(crate) active: bool,
}

impl<E> DragSession<E> {
    pub(crate) fn new(source: E, source_origin: Point, press: PointerEvent, proxy: E) -> Self {
        Self {
            source,
            source_origin,
            pointer_origin: press.position,
            proxy,
            press,
            pointer: press.position,
            proxy_origin: source_origin,
            moved: false,
            active: true,
        }
    }

    /// The element being dragged.
    pub fn source(&self) -> &E {
        &self.source
    }

    /// Top-left corner of the source element when the press happened.
    pub fn source_origin(&self) -> Point {
        self.source_origin
    }

    /// Pointer position at the press.
    pub fn pointer_origin(&self) -> Point {
        self.pointer_origin
    }

    /// The floating proxy overlay.
    pub fn proxy(&self) -> &E {
        &self.proxy
    }

    /// The press that started this session.
    pub fn press_event(&self) -> &PointerEvent {
        &self.press
    }

    /// Listener family the session is subscribed to.
    pub fn input_source(&self) -> InputSource {
        self.press.source()
    }

    /// Latest pointer position seen by the session.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Current top-left corner of the proxy.
    pub fn proxy_origin(&self) -> Point {
        self.proxy_origin
    }

    /// Returns `true` once the pointer has moved since the press.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Returns `true` until the release has been resolved.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Total pointer offset from the press position.
    pub fn offset(&self, pointer: Point) -> Vec2 {
        pointer - self.pointer_origin
    }

    /// Proxy origin for a pointer at `pointer`.
    pub fn proxy_origin_for(&self, pointer: Point) -> Point {
        self.source_origin + self.offset(pointer)
    }

    /// Records a pointer sample and returns the movement since the previous one.
    pub(crate) fn track(&mut self, pointer: Point) -> Vec2 {
        let delta = pointer - self.pointer;
        self.pointer = pointer;
        self.proxy_origin = self.proxy_origin_for(pointer);
        delta
    }
}

/// Latest drop-target resolution for a session.
#[derive(Clone, Debug, PartialEq)]
pub struct DropResolution<E> {
    pub(crate) target: Option<E>,
    pub(crate) point: Point,
}

impl<E> DropResolution<E> {
    /// A resolution with no target, anchored at `point`.
    #[must_use]
    pub const fn none(point: Point) -> Self {
        Self {
            target: None,
            point,
        }
    }

    /// The droppable under the pointer at the last hit test, if any.
    pub fn target(&self) -> Option<&E> {
        self.target.as_ref()
    }

    /// Pointer position at the last hit test, or at the release.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Returns `true` if a droppable was hit.
    pub fn is_hit(&self) -> bool {
        self.target.is_some()
    }
}
