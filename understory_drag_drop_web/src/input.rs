// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM input translation that does not need a browser.

use kurbo::Point;
use understory_drag_drop::{InputSource, MouseButton, PointerKind};

/// DOM event names for a subscription: move, release, and an optional
/// abandonment event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListenerNames {
    /// Pointer movement.
    pub moved: &'static str,
    /// Pointer release.
    pub released: &'static str,
    /// Interrupted input that abandons the drag.
    pub cancelled: Option<&'static str>,
}

/// Returns the document-level events a session of `source` listens to.
#[must_use]
pub const fn listener_names(source: InputSource) -> ListenerNames {
    match source {
        InputSource::Mouse => ListenerNames {
            moved: "mousemove",
            released: "mouseup",
            cancelled: None,
        },
        InputSource::Touch => ListenerNames {
            moved: "touchmove",
            released: "touchend",
            cancelled: Some("touchcancel"),
        },
    }
}

/// Maps a DOM `MouseEvent.button` code to a pointer kind.
#[must_use]
pub const fn mouse_kind(button: i16) -> PointerKind {
    PointerKind::Mouse(MouseButton::from_dom_button(button))
}

/// Picks the position a touch event reports.
///
/// The first touch still on the target wins. On `touchend` that list is
/// empty, so the first changed touch is used instead.
#[must_use]
pub fn select_touch_point(first_target: Option<Point>, first_changed: Option<Point>) -> Option<Point> {
    first_target.or(first_changed)
}

/// Converts a `DOMHighResTimeStamp` to whole milliseconds.
///
/// Negative and non-finite values map to zero.
#[must_use]
pub fn timestamp(ms: f64) -> u64 {
    if !ms.is_finite() || ms <= 0.0 {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "saturating float to int cast; sub-millisecond precision is not needed"
    )]
    let whole = ms as u64;
    whole
}

/// Delay in milliseconds to pass to `setTimeout` so that it fires at `deadline`.
#[must_use]
pub fn delay_until(deadline: u64, now: u64) -> i32 {
    i32::try_from(deadline.saturating_sub(now)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_sessions_also_listen_for_cancel() {
        assert_eq!(listener_names(InputSource::Mouse).cancelled, None);
        let touch = listener_names(InputSource::Touch);
        assert_eq!(touch.moved, "touchmove");
        assert_eq!(touch.released, "touchend");
        assert_eq!(touch.cancelled, Some("touchcancel"));
    }

    #[test]
    fn mouse_buttons() {
        assert_eq!(mouse_kind(0), PointerKind::Mouse(MouseButton::Primary));
        assert_eq!(mouse_kind(1), PointerKind::Mouse(MouseButton::Auxiliary));
        assert_eq!(mouse_kind(2), PointerKind::Mouse(MouseButton::Secondary));
        assert_eq!(mouse_kind(4), PointerKind::Mouse(MouseButton::Other(4)));
    }

    #[test]
    fn target_touch_preferred_over_changed() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(select_touch_point(Some(a), Some(b)), Some(a));
        assert_eq!(select_touch_point(None, Some(b)), Some(b));
        assert_eq!(select_touch_point(None, None), None);
    }

    #[test]
    fn timestamps_clamp() {
        assert_eq!(timestamp(1234.9), 1234);
        assert_eq!(timestamp(-5.0), 0);
        assert_eq!(timestamp(f64::NAN), 0);
    }

    #[test]
    fn delays_saturate() {
        assert_eq!(delay_until(1_500, 1_000), 500);
        assert_eq!(delay_until(1_000, 1_500), 0);
        assert_eq!(delay_until(u64::MAX, 0), i32::MAX);
    }
}
