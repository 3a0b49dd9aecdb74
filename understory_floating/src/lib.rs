// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_floating --heading-base-level=0

//! Understory Floating: positioning for tooltips, dropdowns, and popovers.
//!
//! This crate computes where a floating element goes relative to an anchor so
//! that it stays inside the viewport, and manages the small amount of state
//! around showing one. It is headless: callers own their elements, clock and
//! frame loop, and feed measurements in through the [`host`] traits.
//!
//! - **Placement** ([`Placement`], [`Side`], [`Alignment`]): twelve
//!   side/alignment combinations plus [`Placement::Auto`].
//! - **Geometry** ([`candidate_origin`]): where each placement lands next to
//!   an anchor rectangle.
//! - **Flipping** ([`detect_overflow`], [`resolve_flip`]): swap to the
//!   opposite side when the element overflows on its own side, keeping the
//!   alignment.
//! - **Clamping** ([`clamp_to_viewport`], [`compute_position`]): keep an
//!   8px margin ([`VIEWPORT_MARGIN`]) to every viewport edge.
//! - **Tooltips** ([`TooltipManager`]): per-anchor registration, show/hide
//!   delays, one shared [`TooltipSurface`].
//! - **Portals** ([`PortalTracker`]): re-track a moving anchor every animation
//!   frame, with point anchors and click-outside dismissal.
//!
//! ## Positioning
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_floating::{Placement, compute_position};
//!
//! let viewport = Size::new(800.0, 600.0);
//! let anchor = Rect::new(10.0, 10.0, 110.0, 40.0);
//! let tooltip = Size::new(120.0, 40.0);
//!
//! // "top" would leave the viewport, so the tooltip flips below the anchor;
//! // centering would put its left edge at 0, so it is clamped to the margin.
//! let pos = compute_position(anchor, tooltip, 8.0, Placement::Top, viewport);
//! assert_eq!(pos.placement, Placement::Bottom);
//! assert_eq!(pos.origin, Point::new(8.0, 48.0));
//! ```
//!
//! Flipping only swaps the side. An element that overflows across its side
//! (a `top-start` tooltip running off the right edge) is not realigned; the
//! clamp pulls it back in instead.
//!
//! ## Tooltips and portals
//!
//! [`TooltipManager`] and [`PortalTracker`] never read a clock or register
//! event listeners. Hosts forward their own events:
//!
//! - pointer enter/focus → [`TooltipManager::request_show`], pointer
//!   leave/blur → [`TooltipManager::request_hide`], timer expiry →
//!   [`TooltipManager::advance`];
//! - animation frames → [`PortalTracker::on_animation_frame`], pointer down →
//!   [`PortalTracker::on_pointer_down`].
//!
//! Anchors are identified by any `Copy + Eq + Hash` key. There is no garbage
//! collection of anchors: call [`TooltipManager::unregister`] and
//! [`PortalTracker::close`] when an anchor goes away.
//!
//! ## Diagnostics
//!
//! Misuse such as registering an anchor twice returns an error and also emits
//! a `tracing` warning. Lifecycle transitions are traced at debug level.
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the Rust standard library.
//! - `libm`: Use floating point implementations from [libm][].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! This crate is `no_std` compatible (with `alloc`).
//!
//! [libm]: https://crates.io/crates/libm

#![no_std]

extern crate alloc;

pub mod geometry;
pub mod host;
pub mod overflow;
pub mod placement;
pub mod portal;
pub mod position;
pub mod timer;
pub mod tooltip;

pub use geometry::candidate_origin;
pub use host::{FloatingHost, PortalHost, TooltipHost};
pub use overflow::{Overflow, detect_overflow, resolve_flip};
pub use placement::{Alignment, ParsePlacementError, Placement, Side};
pub use portal::{PortalAnchor, PortalOptions, PortalTracker, PortalUpdate, position_at_point};
pub use position::{
    Positioned, VIEWPORT_MARGIN, clamp_to_viewport, compute_position, resolve_auto,
};
pub use timer::{TimerId, TimerQueue};
pub use tooltip::{
    AnchorState, ResolvedOptions, TooltipDefaults, TooltipError, TooltipEvent, TooltipManager,
    TooltipOptions, TooltipSurface,
};
