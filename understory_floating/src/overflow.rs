// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport overflow detection and primary-axis flipping.
//!
//! Flipping only ever swaps the *side* of a placement. A `top-start` tooltip
//! that overflows on the right is not moved to `top-end`; the final clamp in
//! [`compute_position`](crate::compute_position) is what pulls it back in.

use kurbo::{Point, Rect, Size};

use crate::geometry::candidate_origin;
use crate::placement::{Placement, Side};
use crate::position::Positioned;

bitflags::bitflags! {
    /// Viewport edges crossed by a floating element.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Overflow: u8 {
        /// The element starts above the viewport.
        const TOP = 1 << 0;
        /// The element ends below the viewport.
        const BOTTOM = 1 << 1;
        /// The element starts left of the viewport.
        const LEFT = 1 << 2;
        /// The element ends right of the viewport.
        const RIGHT = 1 << 3;
    }
}

impl Overflow {
    /// Returns the flag for a single side.
    #[must_use]
    pub const fn for_side(side: Side) -> Self {
        match side {
            Side::Top => Self::TOP,
            Side::Bottom => Self::BOTTOM,
            Side::Left => Self::LEFT,
            Side::Right => Self::RIGHT,
        }
    }
}

/// Reports which viewport edges an element at `origin` with `size` crosses.
///
/// The viewport spans `(0, 0)` to `(viewport.width, viewport.height)`.
#[must_use]
pub fn detect_overflow(origin: Point, size: Size, viewport: Size) -> Overflow {
    let mut overflow = Overflow::empty();
    if origin.y < 0.0 {
        overflow |= Overflow::TOP;
    }
    if origin.y + size.height > viewport.height {
        overflow |= Overflow::BOTTOM;
    }
    if origin.x < 0.0 {
        overflow |= Overflow::LEFT;
    }
    if origin.x + size.width > viewport.width {
        overflow |= Overflow::RIGHT;
    }
    overflow
}

/// Decides whether `candidate` must flip to the opposite side.
///
/// A flip happens only when the element overflows the viewport edge on its
/// own side (`top` overflowing the top, `left` overflowing the left, ...).
/// The alignment suffix carries over. Returns the recomputed position and
/// its placement, or `None` when the candidate stays where it is.
///
/// The flipped position is not checked again; if both sides overflow the
/// caller's clamp decides.
#[must_use]
pub fn resolve_flip(
    candidate: Point,
    floating: Size,
    anchor: Rect,
    offset: f64,
    placement: Placement,
    viewport: Size,
) -> Option<Positioned> {
    let side = placement.side()?;
    let overflow = detect_overflow(candidate, floating, viewport);
    if !overflow.contains(Overflow::for_side(side)) {
        return None;
    }
    let flipped = placement.flipped();
    Some(Positioned {
        origin: candidate_origin(anchor, floating, offset, flipped),
        placement: flipped,
    })
}
