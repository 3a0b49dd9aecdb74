// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portals: floating elements that follow a moving anchor every frame.
//!
//! Where [`TooltipManager`](crate::TooltipManager) positions once per show,
//! [`PortalTracker`] keeps every open portal in a frame queue and recomputes
//! its position on each animation frame until it is closed. This suits
//! dropdowns and popovers whose anchor can scroll, drag, or resize while open.
//!
//! ## Frame loop
//!
//! - [`PortalTracker::open`] and [`PortalTracker::request_reposition`] enqueue
//!   a portal and return `true` when the host must request a new animation
//!   frame (none is pending yet).
//! - On the frame, call [`PortalTracker::on_animation_frame`]. Open portals
//!   re-enqueue themselves, so check [`PortalTracker::frame_pending`] to keep
//!   the loop alive.
//! - Forward pointer-down events to [`PortalTracker::on_pointer_down`] to close
//!   portals on a click outside.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_floating::{
//!     FloatingHost, Placement, PortalAnchor, PortalHost, PortalOptions, PortalTracker,
//! };
//!
//! struct Host {
//!     button: Rect,
//! }
//!
//! impl FloatingHost<u32> for Host {
//!     fn anchor_rect(&self, _anchor: &u32) -> Option<Rect> {
//!         Some(self.button)
//!     }
//!     fn viewport_size(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//! }
//!
//! impl PortalHost<u32> for Host {
//!     fn floating_size(&self, _portal: &u32) -> Option<Size> {
//!         Some(Size::new(100.0, 40.0))
//!     }
//! }
//!
//! let mut host = Host { button: Rect::new(100.0, 100.0, 200.0, 130.0) };
//! let mut portals = PortalTracker::new();
//!
//! let options = PortalOptions::default().placement(Placement::BottomStart);
//! assert!(portals.open(10, PortalAnchor::Element(1), options));
//!
//! portals.on_animation_frame(&host);
//! assert_eq!(portals.position(&10).unwrap().origin, Point::new(100.0, 134.0));
//!
//! // The anchor scrolls; the next frame follows it.
//! host.button = Rect::new(100.0, 50.0, 200.0, 80.0);
//! assert!(portals.frame_pending());
//! portals.on_animation_frame(&host);
//! assert_eq!(portals.position(&10).unwrap().origin, Point::new(100.0, 84.0));
//! ```

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Size};

use crate::host::PortalHost;
use crate::placement::{Alignment, Placement, Side};
use crate::position::{Positioned, clamp_to_viewport, compute_position};

/// What a portal is attached to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PortalAnchor<K> {
    /// An element whose rectangle is read from the host each frame.
    Element(K),
    /// A fixed point in viewport coordinates, e.g. a context-menu position.
    Point(Point),
}

/// Options for an open portal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PortalOptions {
    /// Requested placement. Defaults to [`Placement::Bottom`].
    pub placement: Placement,
    /// Gap between anchor and portal in px. Defaults to `4.0`.
    pub offset: f64,
    /// Close the portal on a pointer-down outside it and its anchor.
    /// Defaults to `true`.
    pub close_on_click_outside: bool,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            offset: 4.0,
            close_on_click_outside: true,
        }
    }
}

impl PortalOptions {
    /// Sets the placement.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the gap in px.
    #[must_use]
    pub fn offset(mut self, px: f64) -> Self {
        self.offset = px;
        self
    }

    /// Sets whether a click outside closes the portal.
    #[must_use]
    pub fn close_on_click_outside(mut self, close: bool) -> Self {
        self.close_on_click_outside = close;
        self
    }
}

/// New position of a portal, produced by [`PortalTracker::on_animation_frame`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PortalUpdate<K> {
    /// The portal that moved.
    pub portal: K,
    /// Its position and effective placement.
    pub position: Positioned,
    /// Rectangle it now covers.
    pub rect: Rect,
}

#[derive(Clone, Debug)]
struct OpenPortal<K> {
    anchor: PortalAnchor<K>,
    options: PortalOptions,
    rect: Option<Rect>,
    position: Option<Positioned>,
}

/// Tracks open portals and repositions them once per animation frame.
#[derive(Clone, Debug)]
pub struct PortalTracker<K> {
    open: HashMap<K, OpenPortal<K>>,
    queue: HashSet<K>,
    frame_pending: bool,
}

impl<K> Default for PortalTracker<K> {
    fn default() -> Self {
        Self {
            open: HashMap::new(),
            queue: HashSet::new(),
            frame_pending: false,
        }
    }
}

impl<K> PortalTracker<K>
where
    K: Copy + Eq + Hash + core::fmt::Debug,
{
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `portal` against `anchor`, or re-targets it if already open.
    ///
    /// Re-targeting to a different anchor forgets the old geometry until the
    /// next frame measures the new one. Returns `true` when the host must
    /// request an animation frame.
    pub fn open(&mut self, portal: K, anchor: PortalAnchor<K>, options: PortalOptions) -> bool {
        let entry = self.open.entry(portal).or_insert(OpenPortal {
            anchor,
            options,
            rect: None,
            position: None,
        });
        if entry.anchor != anchor {
            entry.anchor = anchor;
            entry.rect = None;
            entry.position = None;
        }
        entry.options = options;
        tracing::debug!(?portal, "portal opened");
        self.request_reposition(portal)
    }

    /// Closes `portal` and drops its pending frame request.
    ///
    /// Returns `false` if it was not open.
    pub fn close(&mut self, portal: &K) -> bool {
        self.queue.remove(portal);
        let closed = self.open.remove(portal).is_some();
        if closed {
            tracing::debug!(?portal, "portal closed");
        }
        closed
    }

    /// Queues `portal` for the next frame.
    ///
    /// Requests within one frame coalesce. Returns `true` only when no frame
    /// was pending yet, i.e. when the host must call `requestAnimationFrame`
    /// (or its equivalent).
    pub fn request_reposition(&mut self, portal: K) -> bool {
        if !self.open.contains_key(&portal) {
            return false;
        }
        self.queue.insert(portal);
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Returns `true` while a frame has been requested and not yet delivered.
    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Repositions every queued portal.
    ///
    /// Portals that are still open are queued again for the following frame.
    /// A portal whose anchor or size cannot be measured keeps its previous
    /// position for this frame.
    pub fn on_animation_frame<H>(&mut self, host: &H) -> Vec<PortalUpdate<K>>
    where
        H: PortalHost<K> + ?Sized,
    {
        self.frame_pending = false;
        let batch: Vec<K> = self.queue.drain().collect();
        let viewport = host.viewport_size();
        let mut updates = Vec::with_capacity(batch.len());
        for portal in batch {
            let Some(entry) = self.open.get_mut(&portal) else {
                continue;
            };
            if let Some(size) = host.floating_size(&portal)
                && let Some(position) = locate(entry, size, viewport, host)
            {
                let rect = position.rect(size);
                entry.position = Some(position);
                entry.rect = Some(rect);
                updates.push(PortalUpdate {
                    portal,
                    position,
                    rect,
                });
            }
            self.queue.insert(portal);
        }
        self.frame_pending = !self.queue.is_empty();
        updates
    }

    /// Closes every portal that opted into click-outside dismissal and
    /// contains neither `point` nor has an element anchor containing it.
    ///
    /// Returns the closed portals.
    pub fn on_pointer_down<H>(&mut self, point: Point, host: &H) -> Vec<K>
    where
        H: PortalHost<K> + ?Sized,
    {
        let outside: Vec<K> = self
            .open
            .iter()
            .filter(|(_, entry)| entry.options.close_on_click_outside)
            .filter(|(_, entry)| {
                let in_portal = entry.rect.is_some_and(|r| r.contains(point));
                let in_anchor = match entry.anchor {
                    PortalAnchor::Element(anchor) => {
                        host.anchor_rect(&anchor).is_some_and(|r| r.contains(point))
                    }
                    PortalAnchor::Point(_) => false,
                };
                !in_portal && !in_anchor
            })
            .map(|(&portal, _)| portal)
            .collect();
        for portal in &outside {
            self.close(portal);
        }
        outside
    }

    /// Returns `true` if `portal` is open.
    #[must_use]
    pub fn is_open(&self, portal: &K) -> bool {
        self.open.contains_key(portal)
    }

    /// Anchor of an open portal.
    #[must_use]
    pub fn anchor(&self, portal: &K) -> Option<&PortalAnchor<K>> {
        self.open.get(portal).map(|e| &e.anchor)
    }

    /// Last computed position of `portal`.
    #[must_use]
    pub fn position(&self, portal: &K) -> Option<Positioned> {
        self.open.get(portal).and_then(|e| e.position)
    }

    /// Last computed rectangle of `portal`.
    #[must_use]
    pub fn rect(&self, portal: &K) -> Option<Rect> {
        self.open.get(portal).and_then(|e| e.rect)
    }

    /// Number of open portals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Returns `true` when nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

fn locate<K, H>(entry: &OpenPortal<K>, size: Size, viewport: Size, host: &H) -> Option<Positioned>
where
    H: PortalHost<K> + ?Sized,
{
    let PortalOptions {
        placement, offset, ..
    } = entry.options;
    match &entry.anchor {
        PortalAnchor::Element(anchor) => {
            let rect = host.anchor_rect(anchor)?;
            Some(compute_position(rect, size, offset, placement, viewport))
        }
        PortalAnchor::Point(point) => Some(position_at_point(
            *point, size, offset, placement, viewport,
        )),
    }
}

/// Positions a floating element of `size` next to a bare point.
///
/// There is no anchor rectangle, so offsets are applied to the point
/// directly. The requested side is kept when the element fits there or when
/// it has at least as much room as the opposite side; otherwise the opposite
/// side is used. The alignment centers the element on the point (`Center`),
/// starts it at the point (`Start`), or ends it there (`End`). The result is
/// clamped into the viewport. [`Placement::Auto`] behaves like
/// [`Placement::Bottom`].
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_floating::{Placement, position_at_point};
///
/// let viewport = Size::new(800.0, 600.0);
/// // Context menu near the bottom edge opens upwards.
/// let pos = position_at_point(
///     Point::new(300.0, 580.0),
///     Size::new(120.0, 200.0),
///     2.0,
///     Placement::BottomStart,
///     viewport,
/// );
/// assert_eq!(pos.placement, Placement::TopStart);
/// assert_eq!(pos.origin, Point::new(300.0, 378.0));
/// ```
#[must_use]
pub fn position_at_point(
    point: Point,
    size: Size,
    offset: f64,
    placement: Placement,
    viewport: Size,
) -> Positioned {
    let preferred = placement.side().unwrap_or(Side::Bottom);
    let alignment = placement.alignment();
    let (side, origin) = if preferred.is_vertical() {
        let below = viewport.height - point.y - offset;
        let above = point.y - offset;
        let side = choose_side(preferred, Side::Bottom, below, above, size.height);
        let y = match side {
            Side::Top => point.y - offset - size.height,
            _ => point.y + offset,
        };
        (side, Point::new(align_on(point.x, size.width, alignment), y))
    } else {
        let right = viewport.width - point.x - offset;
        let left = point.x - offset;
        let side = choose_side(preferred, Side::Right, right, left, size.width);
        let x = match side {
            Side::Left => point.x - offset - size.width,
            _ => point.x + offset,
        };
        (side, Point::new(x, align_on(point.y, size.height, alignment)))
    };
    Positioned {
        origin: clamp_to_viewport(origin, size, viewport),
        placement: Placement::new(side, alignment),
    }
}

/// `forward` is the side measured by `forward_space` (bottom or right).
fn choose_side(
    preferred: Side,
    forward: Side,
    forward_space: f64,
    backward_space: f64,
    extent: f64,
) -> Side {
    let (preferred_space, other_space) = if preferred == forward {
        (forward_space, backward_space)
    } else {
        (backward_space, forward_space)
    };
    if preferred_space >= extent || preferred_space >= other_space {
        preferred
    } else {
        preferred.opposite()
    }
}

fn align_on(coord: f64, extent: f64, alignment: Alignment) -> f64 {
    match alignment {
        Alignment::Center => coord - extent / 2.0,
        Alignment::Start => coord,
        Alignment::End => coord - extent,
    }
}
