// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate positions for each placement, relative to an anchor rectangle.

use kurbo::{Point, Rect, Size};

use crate::placement::{Alignment, Placement, Side};

/// Computes where a floating element of size `floating` goes when placed
/// against `anchor` with the given `placement` and gap `offset`.
///
/// The returned point is the floating element's top-left corner in the same
/// coordinate space as `anchor`. No viewport is consulted; see
/// [`compute_position`](crate::compute_position) for the full pipeline.
///
/// [`Placement::Auto`] is treated as [`Placement::Bottom`].
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_floating::{Placement, candidate_origin};
///
/// let anchor = Rect::new(100.0, 100.0, 200.0, 130.0);
/// let tip = Size::new(60.0, 20.0);
///
/// // Centered above, 8px gap.
/// let p = candidate_origin(anchor, tip, 8.0, Placement::Top);
/// assert_eq!(p, Point::new(120.0, 72.0));
///
/// // Below, pinned to the anchor's right edge.
/// let p = candidate_origin(anchor, tip, 8.0, Placement::BottomEnd);
/// assert_eq!(p, Point::new(140.0, 138.0));
/// ```
#[must_use]
pub fn candidate_origin(anchor: Rect, floating: Size, offset: f64, placement: Placement) -> Point {
    let side = placement.side().unwrap_or(Side::Bottom);
    let alignment = placement.alignment();
    match side {
        Side::Top => Point::new(
            cross_x(anchor, floating, alignment),
            anchor.y0 - floating.height - offset,
        ),
        Side::Bottom => Point::new(cross_x(anchor, floating, alignment), anchor.y1 + offset),
        Side::Left => Point::new(
            anchor.x0 - floating.width - offset,
            cross_y(anchor, floating, alignment),
        ),
        Side::Right => Point::new(anchor.x1 + offset, cross_y(anchor, floating, alignment)),
    }
}

fn cross_x(anchor: Rect, floating: Size, alignment: Alignment) -> f64 {
    match alignment {
        Alignment::Center => anchor.x0 + (anchor.width() - floating.width) / 2.0,
        Alignment::Start => anchor.x0,
        Alignment::End => anchor.x1 - floating.width,
    }
}

fn cross_y(anchor: Rect, floating: Size, alignment: Alignment) -> f64 {
    match alignment {
        Alignment::Center => anchor.y0 + (anchor.height() - floating.height) / 2.0,
        Alignment::Start => anchor.y0,
        Alignment::End => anchor.y1 - floating.height,
    }
}
