// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement vocabulary: which side of the anchor a floating element sits on,
//! and how it aligns along that side.
//!
//! Placements use the same string form as the `data-placement` attribute
//! commonly found on web tooltips (`"top"`, `"bottom-start"`, `"right-end"`,
//! `"auto"`):
//!
//! ```
//! use understory_floating::{Alignment, Placement, Side};
//!
//! let p: Placement = "top-start".parse().unwrap();
//! assert_eq!(p.side(), Some(Side::Top));
//! assert_eq!(p.alignment(), Alignment::Start);
//! assert_eq!(p.flipped(), Placement::BottomStart);
//! assert_eq!(p.flipped().as_str(), "bottom-start");
//! ```

use core::fmt;
use core::str::FromStr;

/// The side of the anchor a floating element is placed on.
///
/// This is the *primary axis* of a [`Placement`]; flipping swaps a side for
/// its [opposite](Side::opposite).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
    /// To the right of the anchor.
    Right,
}

impl Side {
    /// Returns the mirrored side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns `true` for [`Side::Top`] and [`Side::Bottom`].
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the floating element along the anchor edge it is placed on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Centered on the anchor's cross axis.
    #[default]
    Center,
    /// Pinned to the anchor's leading edge (left for vertical sides, top for
    /// horizontal sides).
    Start,
    /// Pinned to the anchor's trailing edge (right for vertical sides, bottom
    /// for horizontal sides).
    End,
}

/// Where a floating element should be placed relative to its anchor.
///
/// Twelve concrete variants combine a [`Side`] with an [`Alignment`];
/// [`Placement::Auto`] lets the positioner pick the first side that fits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Pick a side automatically (see [`resolve_auto`](crate::resolve_auto)).
    #[default]
    Auto,
    /// Above, centered.
    Top,
    /// Above, aligned to the anchor's left edge.
    TopStart,
    /// Above, aligned to the anchor's right edge.
    TopEnd,
    /// Below, centered.
    Bottom,
    /// Below, aligned to the anchor's left edge.
    BottomStart,
    /// Below, aligned to the anchor's right edge.
    BottomEnd,
    /// Left of the anchor, centered.
    Left,
    /// Left of the anchor, aligned to its top edge.
    LeftStart,
    /// Left of the anchor, aligned to its bottom edge.
    LeftEnd,
    /// Right of the anchor, centered.
    Right,
    /// Right of the anchor, aligned to its top edge.
    RightStart,
    /// Right of the anchor, aligned to its bottom edge.
    RightEnd,
}

impl Placement {
    /// All concrete placements, in `side × alignment` order.
    pub const CONCRETE: [Self; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
    ];

    /// Builds a concrete placement from its parts.
    #[must_use]
    pub const fn new(side: Side, alignment: Alignment) -> Self {
        match (side, alignment) {
            (Side::Top, Alignment::Center) => Self::Top,
            (Side::Top, Alignment::Start) => Self::TopStart,
            (Side::Top, Alignment::End) => Self::TopEnd,
            (Side::Bottom, Alignment::Center) => Self::Bottom,
            (Side::Bottom, Alignment::Start) => Self::BottomStart,
            (Side::Bottom, Alignment::End) => Self::BottomEnd,
            (Side::Left, Alignment::Center) => Self::Left,
            (Side::Left, Alignment::Start) => Self::LeftStart,
            (Side::Left, Alignment::End) => Self::LeftEnd,
            (Side::Right, Alignment::Center) => Self::Right,
            (Side::Right, Alignment::Start) => Self::RightStart,
            (Side::Right, Alignment::End) => Self::RightEnd,
        }
    }

    /// Returns the primary axis side, or `None` for [`Placement::Auto`].
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Auto => None,
            Self::Top | Self::TopStart | Self::TopEnd => Some(Side::Top),
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Some(Side::Bottom),
            Self::Left | Self::LeftStart | Self::LeftEnd => Some(Side::Left),
            Self::Right | Self::RightStart | Self::RightEnd => Some(Side::Right),
        }
    }

    /// Returns the alignment suffix. [`Placement::Auto`] is centered.
    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::TopStart | Self::BottomStart | Self::LeftStart | Self::RightStart => {
                Alignment::Start
            }
            Self::TopEnd | Self::BottomEnd | Self::LeftEnd | Self::RightEnd => Alignment::End,
            _ => Alignment::Center,
        }
    }

    /// Returns the placement on the opposite side with the same alignment.
    ///
    /// [`Placement::Auto`] has no side and is returned unchanged.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self.side() {
            Some(side) => Self::new(side.opposite(), self.alignment()),
            None => self,
        }
    }

    /// Returns `true` for [`Placement::Auto`].
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Returns the attribute string for this placement, e.g. `"left-end"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePlacementError {
    _private: (),
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown placement")
    }
}

impl core::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(Self::Auto);
        }
        Self::CONCRETE
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or(ParsePlacementError { _private: () })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_round_trip_through_new() {
        for p in Placement::CONCRETE {
            let side = p.side().unwrap();
            assert_eq!(Placement::new(side, p.alignment()), p);
        }
    }

    #[test]
    fn flip_preserves_alignment() {
        assert_eq!(Placement::Top.flipped(), Placement::Bottom);
        assert_eq!(Placement::TopStart.flipped(), Placement::BottomStart);
        assert_eq!(Placement::BottomEnd.flipped(), Placement::TopEnd);
        assert_eq!(Placement::LeftStart.flipped(), Placement::RightStart);
        assert_eq!(Placement::RightEnd.flipped(), Placement::LeftEnd);
        assert_eq!(Placement::Auto.flipped(), Placement::Auto);
    }

    #[test]
    fn flipping_twice_is_identity() {
        for p in Placement::CONCRETE {
            assert_eq!(p.flipped().flipped(), p);
        }
    }

    #[test]
    fn parses_attribute_strings() {
        assert_eq!("auto".parse::<Placement>(), Ok(Placement::Auto));
        assert_eq!("right-end".parse::<Placement>(), Ok(Placement::RightEnd));
        assert!("middle".parse::<Placement>().is_err());
        assert!("Top".parse::<Placement>().is_err());
    }

    #[test]
    fn auto_has_no_side() {
        assert_eq!(Placement::Auto.side(), None);
        assert_eq!(Placement::Auto.alignment(), Alignment::Center);
        assert!(Placement::default().is_auto());
    }
}
