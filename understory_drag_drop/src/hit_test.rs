// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-target hit testing: axis-aligned containment plus hover feedback.
//!
//! ## Containment
//!
//! A point is inside a droppable when it lies within the element's bounding
//! rectangle, **edges included** on all four sides. Stale elements (no
//! rectangle) never contain anything.
//!
//! ## Tie-break
//!
//! When droppables overlap, the earliest registered one wins. Candidates are
//! scanned from last to first and every match overwrites the previous one, so
//! the final match is the lowest index.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::hit_test;
//!
//! let zones = [
//!     Rect::new(0.0, 0.0, 100.0, 100.0),
//!     Rect::new(50.0, 50.0, 150.0, 150.0),
//! ];
//!
//! // Inside both: the first registered zone wins.
//! assert_eq!(hit_test::resolve(Point::new(75.0, 75.0), &zones, |r| Some(*r)), Some(0));
//! // Exactly on the second zone's far corner: edges count.
//! assert_eq!(hit_test::resolve(Point::new(150.0, 150.0), &zones, |r| Some(*r)), Some(1));
//! // Outside everything.
//! assert_eq!(hit_test::resolve(Point::new(200.0, 10.0), &zones, |r| Some(*r)), None);
//! ```

use alloc::string::ToString;

use kurbo::{Point, Rect};

use crate::config::DragDropConfig;
use crate::host::Host;
use crate::session::DropResolution;

/// Style property carrying hover feedback.
pub const FEEDBACK_PROPERTY: &str = "border";

/// Returns `true` if `point` lies inside `rect`, edges included.
///
/// Rectangles with negative width or height are normalized first.
#[must_use]
pub fn contains(rect: Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.y >= rect.y0 && point.y <= rect.y1 && point.x >= rect.x0 && point.x <= rect.x1
}

/// Returns the index of the droppable under `point`, if any.
///
/// `rect_of` yields a candidate's bounding rectangle, or `None` for a stale
/// element. See the [module docs](self) for the tie-break rule.
pub fn resolve<E>(
    point: Point,
    candidates: &[E],
    mut rect_of: impl FnMut(&E) -> Option<Rect>,
) -> Option<usize> {
    let mut hit = None;
    for (idx, candidate) in candidates.iter().enumerate().rev() {
        if rect_of(candidate).is_some_and(|rect| contains(rect, point)) {
            hit = Some(idx);
        }
    }
    hit
}

/// Applies hover feedback: the winner gets the hover border, every other
/// candidate the idle border. `winner = None` restores all of them.
pub fn apply_feedback<H: Host>(
    host: &mut H,
    candidates: &[H::Element],
    winner: Option<usize>,
    config: &DragDropConfig,
) {
    let property = H::PROPERTY_CASE.apply(FEEDBACK_PROPERTY);
    let hover = config.hover_effect.to_string();
    let idle = config.idle_effect.to_string();
    for (idx, candidate) in candidates.iter().enumerate() {
        let value = if Some(idx) == winner { &hover } else { &idle };
        host.set_style(candidate, &property, value);
    }
}

/// Runs a full hit test at `point`: resolves the winner among `candidates`,
/// applies feedback, and records the outcome in `resolution`.
///
/// Returns the winning index.
pub fn resolve_into<H: Host>(
    host: &mut H,
    candidates: &[H::Element],
    config: &DragDropConfig,
    resolution: &mut DropResolution<H::Element>,
    point: Point,
) -> Option<usize> {
    let winner = resolve(point, candidates, |el| host.bounding_rect(el));
    apply_feedback(host, candidates, winner, config);
    resolution.target = winner.map(|idx| candidates[idx].clone());
    resolution.point = point;
    log::trace!("hit test at {point:?}: {winner:?}");
    winner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(x: f64, y: f64, w: f64, h: f64) -> Option<Rect> {
        Some(Rect::from_origin_size((x, y), (w, h)))
    }

    #[test]
    fn edges_are_inclusive() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        for p in [
            Point::new(10.0, 20.0),
            Point::new(30.0, 20.0),
            Point::new(10.0, 40.0),
            Point::new(30.0, 40.0),
            Point::new(20.0, 20.0),
            Point::new(10.0, 30.0),
        ] {
            assert!(contains(r, p), "{p:?} should be inside {r:?}");
        }
        assert!(!contains(r, Point::new(9.999, 30.0)));
        assert!(!contains(r, Point::new(20.0, 40.001)));
    }

    #[test]
    fn zero_size_rect_contains_its_origin() {
        let r = Rect::from_origin_size((5.0, 5.0), (0.0, 0.0));
        assert!(contains(r, Point::new(5.0, 5.0)));
        assert!(!contains(r, Point::new(5.0, 5.1)));
    }

    #[test]
    fn negative_rect_is_normalized() {
        let r = Rect::new(30.0, 40.0, 10.0, 20.0);
        assert!(contains(r, Point::new(15.0, 25.0)));
    }

    #[test]
    fn earliest_registered_wins_on_overlap() {
        let zones = [
            zone(0.0, 0.0, 100.0, 100.0),
            zone(0.0, 0.0, 100.0, 100.0),
            zone(0.0, 0.0, 100.0, 100.0),
        ];
        assert_eq!(resolve(Point::new(50.0, 50.0), &zones, |r| *r), Some(0));
    }

    #[test]
    fn later_zone_wins_where_earlier_does_not_overlap() {
        let zones = [zone(0.0, 0.0, 10.0, 10.0), zone(5.0, 5.0, 10.0, 10.0)];
        assert_eq!(resolve(Point::new(12.0, 12.0), &zones, |r| *r), Some(1));
        assert_eq!(resolve(Point::new(7.0, 7.0), &zones, |r| *r), Some(0));
    }

    #[test]
    fn stale_candidates_never_match() {
        let zones = [None, zone(0.0, 0.0, 10.0, 10.0)];
        assert_eq!(resolve(Point::new(0.0, 0.0), &zones, |r| *r), Some(1));
        assert_eq!(resolve(Point::new(0.0, 0.0), &[None::<Rect>], |r| *r), None);
    }

    #[test]
    fn empty_candidates() {
        let zones: [Option<Rect>; 0] = [];
        assert_eq!(resolve(Point::ZERO, &zones, |r| *r), None);
    }
}
