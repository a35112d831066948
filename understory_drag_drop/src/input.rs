// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input consumed by the drag/drop controller.
//!
//! Hosts translate their platform events (DOM `mousedown`/`touchstart`, winit
//! cursor events, ...) into [`PointerEvent`] values. Each event carries the
//! pointer position in the same coordinate space the host uses for
//! [`Host::bounding_rect`](crate::Host::bounding_rect), plus a monotonic
//! timestamp that drives the long-press deadline.

use kurbo::Point;

/// A mouse button, as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The primary (usually left) button.
    Primary,
    /// The auxiliary (usually middle / wheel) button.
    Auxiliary,
    /// The secondary (usually right) button.
    Secondary,
    /// Any other button, carrying the host's raw code.
    Other(i16),
}

impl MouseButton {
    /// Maps a DOM `MouseEvent.button` code.
    #[must_use]
    pub const fn from_dom_button(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// What produced a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A mouse, with the button involved in the press or release.
    Mouse(MouseButton),
    /// A touch contact (the primary touch point).
    Touch,
}

/// The family of document-level listeners a drag session subscribes to.
///
/// A session started by a mouse press tracks mouse moves and releases; one
/// started by a touch tracks touch moves and ends. Never both.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Mouse move / mouse up.
    Mouse,
    /// Touch move / touch end.
    Touch,
}

/// A single pointer sample: where, what, and when.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// The device and button that produced the event.
    pub kind: PointerKind,
    /// Pointer position in host coordinates.
    pub position: Point,
    /// Monotonic timestamp, in the unit used for
    /// [`DragDropConfig::long_press_delay`](crate::DragDropConfig::long_press_delay)
    /// (milliseconds by default).
    pub time: u64,
}

impl PointerEvent {
    /// A primary-button mouse event.
    #[must_use]
    pub const fn mouse(position: Point, time: u64) -> Self {
        Self::mouse_button(MouseButton::Primary, position, time)
    }

    /// A mouse event for a specific button.
    #[must_use]
    pub const fn mouse_button(button: MouseButton, position: Point, time: u64) -> Self {
        Self {
            kind: PointerKind::Mouse(button),
            position,
            time,
        }
    }

    /// A touch event for the primary touch point.
    #[must_use]
    pub const fn touch(position: Point, time: u64) -> Self {
        Self {
            kind: PointerKind::Touch,
            position,
            time,
        }
    }

    /// Returns the same event moved to `position` at `time`.
    #[must_use]
    pub const fn at(self, position: Point, time: u64) -> Self {
        Self {
            kind: self.kind,
            position,
            time,
        }
    }

    /// Returns the listener family this event belongs to.
    #[must_use]
    pub const fn source(&self) -> InputSource {
        match self.kind {
            PointerKind::Mouse(_) => InputSource::Mouse,
            PointerKind::Touch => InputSource::Touch,
        }
    }

    /// Returns `true` for touch input.
    #[must_use]
    pub const fn is_touch(&self) -> bool {
        matches!(self.kind, PointerKind::Touch)
    }

    /// Returns `true` if this event may start or end a drag.
    ///
    /// Any touch qualifies; mouse input only with the primary button.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(
            self.kind,
            PointerKind::Touch | PointerKind::Mouse(MouseButton::Primary)
        )
    }
}
