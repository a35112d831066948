// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional lifecycle callback slots.

use alloc::boxed::Box;
use core::fmt;

use crate::input::PointerEvent;
use crate::session::{DragSession, DropResolution};

/// Callback for the first movement of a session.
pub type DragStartFn<E> = Box<dyn FnMut(&PointerEvent, &DragSession<E>)>;

/// Callback for moves, drops, and drag ends.
pub type DragFn<E> = Box<dyn FnMut(&PointerEvent, &DragSession<E>, &DropResolution<E>)>;

/// Callback for a long-press: the press event and the cancellation flag.
pub type LongPressFn = Box<dyn FnMut(&PointerEvent, bool)>;

/// The callback slots of a [`DragDrop`](crate::DragDrop) controller.
///
/// Every slot is optional. Panics raised by a callback are not caught.
pub struct Callbacks<E> {
    pub(crate) drag_start: Option<DragStartFn<E>>,
    pub(crate) drag_move: Option<DragFn<E>>,
    pub(crate) drag_end: Option<DragFn<E>>,
    pub(crate) drop: Option<DragFn<E>>,
    pub(crate) long_press: Option<LongPressFn>,
}

impl<E> Default for Callbacks<E> {
    fn default() -> Self {
        Self {
            drag_start: None,
            drag_move: None,
            drag_end: None,
            drop: None,
            long_press: None,
        }
    }
}

impl<E> Callbacks<E> {
    /// Empties every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn drag_start(&mut self, event: &PointerEvent, session: &DragSession<E>) {
        if let Some(f) = self.drag_start.as_mut() {
            f(event, session);
        }
    }

    pub(crate) fn drag_move(
        &mut self,
        event: &PointerEvent,
        session: &DragSession<E>,
        resolution: &DropResolution<E>,
    ) {
        if let Some(f) = self.drag_move.as_mut() {
            f(event, session, resolution);
        }
    }

    pub(crate) fn drag_end(
        &mut self,
        event: &PointerEvent,
        session: &DragSession<E>,
        resolution: &DropResolution<E>,
    ) {
        if let Some(f) = self.drag_end.as_mut() {
            f(event, session, resolution);
        }
    }

    pub(crate) fn dropped(
        &mut self,
        event: &PointerEvent,
        session: &DragSession<E>,
        resolution: &DropResolution<E>,
    ) {
        if let Some(f) = self.drop.as_mut() {
            f(event, session, resolution);
        }
    }

    pub(crate) fn long_press(&mut self, event: &PointerEvent, cancelled: bool) {
        if let Some(f) = self.long_press.as_mut() {
            f(event, cancelled);
        }
    }
}

impl<E> fmt::Debug for Callbacks<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("drag_start", &self.drag_start.is_some())
            .field("drag_move", &self.drag_move.is_some())
            .field("drag_end", &self.drag_end.is_some())
            .field("drop", &self.drop.is_some())
            .field("long_press", &self.long_press.is_some())
            .finish()
    }
}
