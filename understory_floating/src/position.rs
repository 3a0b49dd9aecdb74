// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clamping and the full positioning pipeline.

use kurbo::{Point, Rect, Size};

use crate::geometry::candidate_origin;
use crate::overflow::{detect_overflow, resolve_flip};
use crate::placement::Placement;

/// Minimum distance kept between a floating element and the viewport edges.
pub const VIEWPORT_MARGIN: f64 = 8.0;

/// Final position of a floating element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Positioned {
    /// Top-left corner of the floating element in viewport coordinates.
    pub origin: Point,
    /// Placement that produced `origin` before clamping.
    ///
    /// This is the requested placement, or its mirror when a flip happened.
    /// Clamping never changes it.
    pub placement: Placement,
}

impl Positioned {
    /// Returns the rectangle covered by an element of `size` at this position.
    #[must_use]
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin, size)
    }
}

/// Clamps `origin` so an element of `size` keeps [`VIEWPORT_MARGIN`] from
/// every viewport edge.
///
/// When the viewport is too small to honor both margins, the leading margin
/// wins and the element is pinned at `8.0` on that axis.
#[must_use]
pub fn clamp_to_viewport(origin: Point, size: Size, viewport: Size) -> Point {
    Point::new(
        clamp_axis(origin.x, size.width, viewport.width),
        clamp_axis(origin.y, size.height, viewport.height),
    )
}

fn clamp_axis(value: f64, extent: f64, available: f64) -> f64 {
    let max = (available - extent - VIEWPORT_MARGIN).max(VIEWPORT_MARGIN);
    value.max(VIEWPORT_MARGIN).min(max)
}

/// Picks a concrete placement for [`Placement::Auto`].
///
/// Sides are tried in the order bottom, top, right, left (each centered);
/// the first whose candidate stays fully inside the viewport wins. When none
/// fits, bottom is used and clamping takes over. Concrete placements are
/// returned unchanged.
#[must_use]
pub fn resolve_auto(
    anchor: Rect,
    floating: Size,
    offset: f64,
    placement: Placement,
    viewport: Size,
) -> Placement {
    if !placement.is_auto() {
        return placement;
    }
    [
        Placement::Bottom,
        Placement::Top,
        Placement::Right,
        Placement::Left,
    ]
    .into_iter()
    .find(|&p| {
        let origin = candidate_origin(anchor, floating, offset, p);
        detect_overflow(origin, floating, viewport).is_empty()
    })
    .unwrap_or(Placement::Bottom)
}

/// Positions a floating element of size `floating` next to `anchor`.
///
/// Runs the whole pipeline:
/// 1. resolve [`Placement::Auto`] ([`resolve_auto`]),
/// 2. compute the candidate origin ([`candidate_origin`]),
/// 3. flip to the opposite side on primary-axis overflow ([`resolve_flip`]),
/// 4. clamp into the viewport ([`clamp_to_viewport`]).
///
/// ```
/// use kurbo::{Point, Rect, Size};
/// use understory_floating::{Placement, compute_position};
///
/// // Anchor hugging the top of an 800x600 viewport: "top" has no room.
/// let anchor = Rect::new(10.0, 10.0, 110.0, 40.0);
/// let pos = compute_position(
///     anchor,
///     Size::new(120.0, 40.0),
///     8.0,
///     Placement::Top,
///     Size::new(800.0, 600.0),
/// );
/// assert_eq!(pos.placement, Placement::Bottom);
/// assert_eq!(pos.origin, Point::new(8.0, 48.0));
/// ```
#[must_use]
pub fn compute_position(
    anchor: Rect,
    floating: Size,
    offset: f64,
    placement: Placement,
    viewport: Size,
) -> Positioned {
    let placement = resolve_auto(anchor, floating, offset, placement, viewport);
    let candidate = candidate_origin(anchor, floating, offset, placement);
    let resolved = resolve_flip(candidate, floating, anchor, offset, placement, viewport)
        .unwrap_or(Positioned {
            origin: candidate,
            placement,
        });
    Positioned {
        origin: clamp_to_viewport(resolved.origin, floating, viewport),
        placement: resolved.placement,
    }
}
