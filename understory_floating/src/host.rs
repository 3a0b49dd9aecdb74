// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seams: how the positioner reads layout from the embedding UI.
//!
//! The positioner never owns elements. Anchors and floating elements are
//! identified by application keys, and their geometry is looked up through
//! these traits every time a position is computed, so the result always
//! reflects the current layout.

use kurbo::{Rect, Size};

/// Layout queries shared by the tooltip manager and the portal tracker.
pub trait FloatingHost<K> {
    /// Current rectangle of `anchor` in viewport coordinates.
    ///
    /// Return `None` when the anchor has no layout (detached, not yet laid
    /// out); the positioner then skips the update.
    fn anchor_rect(&self, anchor: &K) -> Option<Rect>;

    /// Size of the viewport. Its origin is `(0, 0)`.
    fn viewport_size(&self) -> Size;
}

/// Host for [`TooltipManager`](crate::TooltipManager).
pub trait TooltipHost<K>: FloatingHost<K> {
    /// Lays out the shared tooltip surface with `content` while it is still
    /// invisible and returns its size, or `None` if it cannot be measured.
    fn measure_tooltip(&mut self, content: &str) -> Option<Size>;
}

/// Host for [`PortalTracker`](crate::PortalTracker).
pub trait PortalHost<K>: FloatingHost<K> {
    /// Current size of the floating element for `portal`.
    fn floating_size(&self, portal: &K) -> Option<Size>;
}
