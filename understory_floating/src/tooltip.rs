// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip lifecycle: registration, delayed show/hide, and one shared surface.
//!
//! ## Usage
//!
//! 1) [`register`](TooltipManager::register) each anchor with its
//!    [`TooltipOptions`].
//! 2) Forward pointer-enter/focus to [`request_show`](TooltipManager::request_show)
//!    and pointer-leave/blur to [`request_hide`](TooltipManager::request_hide).
//! 3) Arm a platform timer for [`next_deadline`](TooltipManager::next_deadline)
//!    and call [`advance`](TooltipManager::advance) when it fires.
//! 4) Render the shared [`surface`](TooltipManager::surface).
//!
//! Each anchor moves through [`AnchorState`]: `Idle → ShowPending → Visible →
//! HidePending → Idle`. An anchor never has a show and a hide timer at the
//! same time; starting one cancels the other.
//!
//! All anchors share a single [`TooltipSurface`]. Showing a second anchor
//! while the first is visible moves the surface (last writer wins).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_floating::{
//!     AnchorState, FloatingHost, TooltipHost, TooltipManager, TooltipOptions,
//! };
//!
//! struct Host;
//!
//! impl FloatingHost<u32> for Host {
//!     fn anchor_rect(&self, _anchor: &u32) -> Option<Rect> {
//!         Some(Rect::new(100.0, 100.0, 180.0, 130.0))
//!     }
//!     fn viewport_size(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//! }
//!
//! impl TooltipHost<u32> for Host {
//!     fn measure_tooltip(&mut self, content: &str) -> Option<Size> {
//!         Some(Size::new(7.0 * content.len() as f64, 20.0))
//!     }
//! }
//!
//! let mut tooltips = TooltipManager::new();
//! tooltips
//!     .register(1, TooltipOptions::new("Save").show_delay(200))
//!     .unwrap();
//!
//! tooltips.request_show(1, 0);
//! assert_eq!(tooltips.state(&1), Some(AnchorState::ShowPending));
//! assert_eq!(tooltips.next_deadline(), Some(200));
//!
//! let events = tooltips.advance(200, &mut Host);
//! assert_eq!(events.len(), 1);
//! assert_eq!(tooltips.active_anchor(), Some(&1));
//! assert!(tooltips.surface().unwrap().is_visible());
//! ```

use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::host::TooltipHost;
use crate::placement::Placement;
use crate::position::{Positioned, compute_position};
use crate::timer::{TimerId, TimerQueue};

/// Manager-wide fallbacks for options an anchor leaves unset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TooltipDefaults {
    /// Placement used when an anchor does not request one.
    pub placement: Placement,
    /// Delay between a show request and the tooltip appearing, in ms.
    pub show_delay: u64,
    /// Delay between a hide request and the tooltip disappearing, in ms.
    pub hide_delay: u64,
    /// Gap between anchor and tooltip, in px.
    pub offset: f64,
}

impl Default for TooltipDefaults {
    fn default() -> Self {
        Self {
            placement: Placement::Auto,
            show_delay: 300,
            hide_delay: 100,
            offset: 8.0,
        }
    }
}

/// Per-anchor tooltip options. Unset fields fall back to [`TooltipDefaults`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipOptions {
    /// Tooltip text.
    pub content: String,
    /// Requested placement.
    pub placement: Option<Placement>,
    /// Show delay in ms.
    pub show_delay: Option<u64>,
    /// Hide delay in ms.
    pub hide_delay: Option<u64>,
    /// Gap between anchor and tooltip in px.
    pub offset: Option<f64>,
}

impl TooltipOptions {
    /// Options with the given content and every other field defaulted.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Sets the placement.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Sets the show delay in ms.
    #[must_use]
    pub fn show_delay(mut self, ms: u64) -> Self {
        self.show_delay = Some(ms);
        self
    }

    /// Sets the hide delay in ms.
    #[must_use]
    pub fn hide_delay(mut self, ms: u64) -> Self {
        self.hide_delay = Some(ms);
        self
    }

    /// Sets the anchor gap in px.
    #[must_use]
    pub fn offset(mut self, px: f64) -> Self {
        self.offset = Some(px);
        self
    }

    fn resolve(self, defaults: &TooltipDefaults) -> ResolvedOptions {
        ResolvedOptions {
            content: self.content,
            placement: self.placement.unwrap_or(defaults.placement),
            show_delay: self.show_delay.unwrap_or(defaults.show_delay),
            hide_delay: self.hide_delay.unwrap_or(defaults.hide_delay),
            offset: self.offset.unwrap_or(defaults.offset),
        }
    }
}

/// Options of a registered anchor after applying defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOptions {
    /// Tooltip text. The only field that changes after registration.
    pub content: String,
    /// Requested placement.
    pub placement: Placement,
    /// Show delay in ms.
    pub show_delay: u64,
    /// Hide delay in ms.
    pub hide_delay: u64,
    /// Gap between anchor and tooltip in px.
    pub offset: f64,
}

/// Lifecycle state of a registered anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnchorState {
    /// Nothing pending, tooltip not shown for this anchor.
    Idle,
    /// A show timer is pending.
    ShowPending,
    /// The shared surface is showing this anchor's tooltip.
    Visible,
    /// A hide timer is pending.
    HidePending,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    ShowPending(TimerId),
    Visible,
    HidePending(TimerId),
}

impl Phase {
    fn state(self) -> AnchorState {
        match self {
            Self::Idle => AnchorState::Idle,
            Self::ShowPending(_) => AnchorState::ShowPending,
            Self::Visible => AnchorState::Visible,
            Self::HidePending(_) => AnchorState::HidePending,
        }
    }

    fn timer(self) -> Option<TimerId> {
        match self {
            Self::ShowPending(id) | Self::HidePending(id) => Some(id),
            Self::Idle | Self::Visible => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimerKind {
    Show,
    Hide,
}

#[derive(Clone, Debug)]
struct Record {
    options: ResolvedOptions,
    phase: Phase,
}

/// The single floating element shared by every registered anchor.
///
/// Created on the first show and reused afterwards. Hosts mirror it into
/// their UI: `content` as text, `origin` as the element position,
/// [`placement_attr`](Self::placement_attr) as `data-placement`, and
/// [`is_aria_hidden`](Self::is_aria_hidden) as `aria-hidden`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipSurface {
    content: String,
    origin: Point,
    size: Size,
    placement: Placement,
    visible: bool,
}

impl TooltipSurface {
    /// Current text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Top-left corner in viewport coordinates.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Size measured on the last show.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Rectangle covered by the surface.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Placement actually used, after flipping.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// `data-placement` attribute value.
    #[must_use]
    pub fn placement_attr(&self) -> &'static str {
        self.placement.as_str()
    }

    /// Whether the surface is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `aria-hidden` state; the inverse of [`is_visible`](Self::is_visible).
    #[must_use]
    pub fn is_aria_hidden(&self) -> bool {
        !self.visible
    }
}

/// Visibility changes produced by [`TooltipManager::advance`].
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipEvent<K> {
    /// The surface now shows `anchor`'s tooltip at `position`.
    Shown {
        /// Anchor being described.
        anchor: K,
        /// Final position and effective placement.
        position: Positioned,
    },
    /// The surface was hidden after `anchor`'s hide delay.
    Hidden {
        /// Anchor that was being described.
        anchor: K,
    },
}

/// Non-fatal misuse of the tooltip API.
///
/// Every error is also logged as a warning, so callers that do not care may
/// drop it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TooltipError<K> {
    /// [`TooltipManager::register`] was called for an anchor that already
    /// has a record. The existing record is kept.
    AlreadyRegistered(K),
    /// The operation needs a registered anchor.
    NotRegistered(K),
}

impl<K: fmt::Debug> fmt::Display for TooltipError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered(anchor) => {
                write!(f, "tooltip anchor {anchor:?} is already registered")
            }
            Self::NotRegistered(anchor) => {
                write!(f, "tooltip anchor {anchor:?} is not registered")
            }
        }
    }
}

impl<K: fmt::Debug> core::error::Error for TooltipError<K> {}

/// Registry and state machine for delayed tooltips over a shared surface.
///
/// `K` identifies anchors. Records are kept until
/// [`unregister`](Self::unregister) is called; dropping an anchor from the UI
/// without unregistering leaks its record.
#[derive(Clone, Debug)]
pub struct TooltipManager<K> {
    defaults: TooltipDefaults,
    records: HashMap<K, Record>,
    timers: TimerQueue<(K, TimerKind)>,
    surface: Option<TooltipSurface>,
    active: Option<K>,
}

impl<K> Default for TooltipManager<K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::with_defaults(TooltipDefaults::default())
    }
}

impl<K> TooltipManager<K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Creates a manager with [`TooltipDefaults::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with custom defaults.
    #[must_use]
    pub fn with_defaults(defaults: TooltipDefaults) -> Self {
        Self {
            defaults,
            records: HashMap::new(),
            timers: TimerQueue::new(),
            surface: None,
            active: None,
        }
    }

    /// Manager-wide defaults.
    #[must_use]
    pub fn defaults(&self) -> &TooltipDefaults {
        &self.defaults
    }

    /// Registers `anchor`.
    ///
    /// Registering an anchor twice logs a warning and leaves the first
    /// registration untouched.
    pub fn register(
        &mut self,
        anchor: K,
        options: TooltipOptions,
    ) -> Result<(), TooltipError<K>> {
        if self.records.contains_key(&anchor) {
            tracing::warn!(?anchor, "tooltip anchor already registered");
            return Err(TooltipError::AlreadyRegistered(anchor));
        }
        let options = options.resolve(&self.defaults);
        self.records.insert(
            anchor,
            Record {
                options,
                phase: Phase::Idle,
            },
        );
        Ok(())
    }

    /// Removes `anchor`, cancelling its timers and hiding the surface if it
    /// was showing this anchor.
    ///
    /// Returns `false` (and does nothing) if the anchor was not registered.
    pub fn unregister(&mut self, anchor: &K) -> bool {
        let Some(record) = self.records.remove(anchor) else {
            return false;
        };
        if let Some(id) = record.phase.timer() {
            self.timers.cancel(id);
        }
        if self.active.as_ref() == Some(anchor) {
            self.release_active();
        }
        true
    }

    /// Returns `true` if `anchor` has a record.
    #[must_use]
    pub fn is_registered(&self, anchor: &K) -> bool {
        self.records.contains_key(anchor)
    }

    /// Lifecycle state of `anchor`, or `None` if it is not registered.
    #[must_use]
    pub fn state(&self, anchor: &K) -> Option<AnchorState> {
        self.records.get(anchor).map(|r| r.phase.state())
    }

    /// Resolved options of `anchor`.
    #[must_use]
    pub fn options(&self, anchor: &K) -> Option<&ResolvedOptions> {
        self.records.get(anchor).map(|r| &r.options)
    }

    /// Anchor currently shown on the surface.
    #[must_use]
    pub fn active_anchor(&self) -> Option<&K> {
        self.active.as_ref()
    }

    /// The shared surface, once it has been created by a first show.
    #[must_use]
    pub fn surface(&self) -> Option<&TooltipSurface> {
        self.surface.as_ref()
    }

    /// Earliest pending timer deadline, in ms.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Number of registered anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no anchor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pointer-enter/focus handler: schedules a show after the anchor's show
    /// delay, cancelling a pending hide.
    ///
    /// Unregistered anchors are ignored. An anchor that is already visible
    /// stays as it is. Returns `true` if a show timer is pending afterwards.
    pub fn request_show(&mut self, anchor: K, now: u64) -> bool {
        let Some(record) = self.records.get_mut(&anchor) else {
            tracing::debug!(?anchor, "show requested for unregistered anchor");
            return false;
        };
        match record.phase {
            Phase::Visible => false,
            Phase::ShowPending(_) => true,
            Phase::Idle | Phase::HidePending(_) => {
                if let Some(id) = record.phase.timer() {
                    self.timers.cancel(id);
                }
                let deadline = now.saturating_add(record.options.show_delay);
                let id = self.timers.schedule(deadline, (anchor, TimerKind::Show));
                record.phase = Phase::ShowPending(id);
                true
            }
        }
    }

    /// Pointer-leave/blur handler: schedules a hide after the anchor's hide
    /// delay, cancelling a pending show.
    ///
    /// Idle and unregistered anchors are ignored. Returns `true` if a hide
    /// timer is pending afterwards.
    pub fn request_hide(&mut self, anchor: K, now: u64) -> bool {
        let Some(record) = self.records.get_mut(&anchor) else {
            return false;
        };
        match record.phase {
            Phase::Idle => false,
            Phase::HidePending(_) => true,
            Phase::ShowPending(_) | Phase::Visible => {
                if let Some(id) = record.phase.timer() {
                    self.timers.cancel(id);
                }
                let deadline = now.saturating_add(record.options.hide_delay);
                let id = self.timers.schedule(deadline, (anchor, TimerKind::Hide));
                record.phase = Phase::HidePending(id);
                true
            }
        }
    }

    /// Shows `anchor`'s tooltip programmatically, honoring its show delay.
    ///
    /// Unlike [`request_show`](Self::request_show), an unregistered anchor is
    /// reported.
    pub fn show(&mut self, anchor: K, now: u64) -> Result<(), TooltipError<K>> {
        if !self.records.contains_key(&anchor) {
            tracing::warn!(?anchor, "cannot show tooltip for unregistered anchor");
            return Err(TooltipError::NotRegistered(anchor));
        }
        self.request_show(anchor, now);
        Ok(())
    }

    /// Hides `anchor`'s tooltip programmatically, honoring its hide delay.
    pub fn hide(&mut self, anchor: K, now: u64) {
        self.request_hide(anchor, now);
    }

    /// Hides the surface immediately and returns every anchor to
    /// [`AnchorState::Idle`], dropping all pending timers.
    pub fn hide_all(&mut self) {
        self.timers.clear();
        for record in self.records.values_mut() {
            record.phase = Phase::Idle;
        }
        self.active = None;
        if let Some(surface) = self.surface.as_mut() {
            surface.visible = false;
        }
    }

    /// Replaces `anchor`'s tooltip text.
    ///
    /// If the surface is currently showing this anchor its text changes in
    /// place; the position is not recomputed.
    pub fn update_content(
        &mut self,
        anchor: &K,
        content: impl Into<String>,
    ) -> Result<(), TooltipError<K>> {
        let Some(record) = self.records.get_mut(anchor) else {
            tracing::warn!(?anchor, "cannot update content of unregistered anchor");
            return Err(TooltipError::NotRegistered(*anchor));
        };
        record.options.content = content.into();
        if self.active.as_ref() == Some(anchor)
            && let Some(surface) = self.surface.as_mut()
            && surface.visible
        {
            surface.content.clone_from(&record.options.content);
        }
        Ok(())
    }

    /// Fires every timer due at or before `now`, in deadline order.
    pub fn advance<H>(&mut self, now: u64, host: &mut H) -> SmallVec<[TooltipEvent<K>; 2]>
    where
        H: TooltipHost<K> + ?Sized,
    {
        let mut events = SmallVec::new();
        while let Some((id, (anchor, kind))) = self.timers.pop_due(now) {
            let event = match kind {
                TimerKind::Show => self.fire_show(id, anchor, host),
                TimerKind::Hide => self.fire_hide(id, anchor),
            };
            events.extend(event);
        }
        events
    }

    /// Shows `anchor` if its show timer `id` is still the current one.
    ///
    /// When either the anchor rect or the tooltip size is unavailable the show
    /// fails the same way: the surface is hidden, the active anchor is
    /// released, and `anchor` returns to idle.
    fn fire_show<H>(&mut self, id: TimerId, anchor: K, host: &mut H) -> Option<TooltipEvent<K>>
    where
        H: TooltipHost<K> + ?Sized,
    {
        let record = self.records.get_mut(&anchor)?;
        if record.phase != Phase::ShowPending(id) {
            return None;
        }
        record.phase = Phase::Idle;
        let offset = record.options.offset;
        let placement = record.options.placement;

        let Some(anchor_rect) = host.anchor_rect(&anchor) else {
            tracing::debug!(?anchor, "anchor has no layout; tooltip not shown");
            self.release_active();
            return None;
        };

        let surface = self.surface.get_or_insert_with(TooltipSurface::default);
        surface.content.clone_from(&record.options.content);
        surface.visible = false;
        let Some(size) = host.measure_tooltip(&surface.content) else {
            tracing::debug!(?anchor, "tooltip could not be measured; left hidden");
            self.release_active();
            return None;
        };

        let position = compute_position(
            anchor_rect,
            size,
            offset,
            placement,
            host.viewport_size(),
        );
        surface.origin = position.origin;
        surface.size = size;
        surface.placement = position.placement;
        surface.visible = true;
        record.phase = Phase::Visible;

        if let Some(previous) = self.active.replace(anchor)
            && previous != anchor
            && let Some(prev) = self.records.get_mut(&previous)
            && prev.phase == Phase::Visible
        {
            prev.phase = Phase::Idle;
        }
        tracing::debug!(?anchor, placement = position.placement.as_str(), "tooltip shown");
        Some(TooltipEvent::Shown { anchor, position })
    }

    fn fire_hide(&mut self, id: TimerId, anchor: K) -> Option<TooltipEvent<K>> {
        let record = self.records.get_mut(&anchor)?;
        if record.phase != Phase::HidePending(id) {
            return None;
        }
        record.phase = Phase::Idle;
        if self.active != Some(anchor) {
            return None;
        }
        self.release_active();
        tracing::debug!(?anchor, "tooltip hidden");
        Some(TooltipEvent::Hidden { anchor })
    }

    /// Hides the surface and forgets the active anchor, returning it to idle
    /// if it was showing.
    fn release_active(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.visible = false;
        }
        if let Some(previous) = self.active.take()
            && let Some(record) = self.records.get_mut(&previous)
            && record.phase == Phase::Visible
        {
            record.phase = Phase::Idle;
        }
    }
}
