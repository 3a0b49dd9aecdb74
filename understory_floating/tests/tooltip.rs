// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `TooltipManager` as a host drives it: timers, the shared
//! surface, and the warnings emitted on misuse.

use std::sync::{Arc, Mutex};

use kurbo::{Rect, Size};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use understory_floating::{
    AnchorState, FloatingHost, Placement, TooltipError, TooltipHost, TooltipManager,
    TooltipOptions,
};

/// Records every event's level and message.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = capture.0.lock().unwrap().clone();
    (out, logs)
}

fn warnings(logs: &[(Level, String)]) -> Vec<&str> {
    logs.iter()
        .filter(|(level, _)| *level == Level::WARN)
        .map(|(_, msg)| msg.as_str())
        .collect()
}

#[derive(Default)]
struct Host {
    measured: usize,
}

impl FloatingHost<&'static str> for Host {
    fn anchor_rect(&self, _anchor: &&'static str) -> Option<Rect> {
        Some(Rect::new(300.0, 300.0, 400.0, 330.0))
    }

    fn viewport_size(&self) -> Size {
        Size::new(800.0, 600.0)
    }
}

impl TooltipHost<&'static str> for Host {
    fn measure_tooltip(&mut self, _content: &str) -> Option<Size> {
        self.measured += 1;
        Some(Size::new(80.0, 24.0))
    }
}

#[test]
fn hide_right_after_show_leaves_only_the_hide_timer() {
    let mut tooltips = TooltipManager::new();
    let mut host = Host::default();
    tooltips
        .register(
            "save",
            TooltipOptions::new("Save").show_delay(100).hide_delay(300),
        )
        .unwrap();

    tooltips.request_show("save", 0);
    tooltips.request_hide("save", 0);
    assert_eq!(tooltips.state(&"save"), Some(AnchorState::HidePending));
    assert_eq!(tooltips.next_deadline(), Some(300));

    // The cancelled show would have fired here.
    assert!(tooltips.advance(100, &mut host).is_empty());
    assert_eq!(tooltips.state(&"save"), Some(AnchorState::HidePending));

    assert!(tooltips.advance(300, &mut host).is_empty());
    assert_eq!(tooltips.state(&"save"), Some(AnchorState::Idle));
    assert_eq!(tooltips.next_deadline(), None);
    assert_eq!(host.measured, 0);
}

#[test]
fn unregister_twice_is_a_no_op() {
    let mut tooltips = TooltipManager::new();
    tooltips.register("save", TooltipOptions::new("Save")).unwrap();
    tooltips.request_show("save", 0);

    assert!(tooltips.unregister(&"save"));
    assert!(!tooltips.unregister(&"save"));
    assert!(tooltips.is_empty());
    assert_eq!(tooltips.next_deadline(), None);
}

#[test]
fn show_then_hide_before_delay_never_shows() {
    let mut tooltips = TooltipManager::new();
    let mut host = Host::default();
    tooltips.register("el", TooltipOptions::new("Hi")).unwrap();

    tooltips.show("el", 0).unwrap();
    tooltips.advance(10, &mut host);
    tooltips.hide("el", 10);

    let events = tooltips.advance(10_000, &mut host);
    assert!(events.is_empty());
    assert!(tooltips.surface().is_none_or(|s| !s.is_visible()));
    assert_eq!(tooltips.active_anchor(), None);
}

#[test]
fn update_content_of_unregistered_anchor_warns() {
    let mut tooltips = TooltipManager::<&'static str>::new();
    let (result, logs) = with_captured_logs(|| tooltips.update_content(&"ghost", "x"));

    assert_eq!(result, Err(TooltipError::NotRegistered("ghost")));
    assert_eq!(
        warnings(&logs),
        ["cannot update content of unregistered anchor"]
    );
    assert!(tooltips.surface().is_none());
    assert!(!tooltips.is_registered(&"ghost"));
}

#[test]
fn duplicate_registration_and_manual_show_warn() {
    let mut tooltips = TooltipManager::new();
    let (_, logs) = with_captured_logs(|| {
        tooltips.register("a", TooltipOptions::new("A")).unwrap();
        let dup = tooltips.register("a", TooltipOptions::new("again"));
        assert_eq!(dup, Err(TooltipError::AlreadyRegistered("a")));
        let missing = tooltips.show("b", 0);
        assert_eq!(missing, Err(TooltipError::NotRegistered("b")));
    });
    assert_eq!(
        warnings(&logs),
        [
            "tooltip anchor already registered",
            "cannot show tooltip for unregistered anchor",
        ]
    );
}

#[test]
fn placement_attribute_reflects_flip() {
    struct TopEdge;

    impl FloatingHost<u8> for TopEdge {
        fn anchor_rect(&self, _anchor: &u8) -> Option<Rect> {
            Some(Rect::new(10.0, 10.0, 110.0, 40.0))
        }

        fn viewport_size(&self) -> Size {
            Size::new(800.0, 600.0)
        }
    }

    impl TooltipHost<u8> for TopEdge {
        fn measure_tooltip(&mut self, _content: &str) -> Option<Size> {
            Some(Size::new(120.0, 40.0))
        }
    }

    let mut tooltips = TooltipManager::new();
    tooltips
        .register(
            0,
            TooltipOptions::new("Hi")
                .placement(Placement::Top)
                .offset(8.0)
                .show_delay(0),
        )
        .unwrap();
    tooltips.request_show(0, 0);
    tooltips.advance(0, &mut TopEdge);

    let surface = tooltips.surface().unwrap();
    assert_eq!(surface.placement_attr(), "bottom");
    assert_eq!(surface.origin(), kurbo::Point::new(8.0, 48.0));
    assert_eq!(surface.rect().size(), Size::new(120.0, 40.0));
}
