// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_floating::{
    FloatingHost, PortalAnchor, PortalHost, PortalOptions, PortalTracker, TooltipHost,
    TooltipManager, TooltipOptions,
};

struct GridHost;

impl FloatingHost<u32> for GridHost {
    fn anchor_rect(&self, anchor: &u32) -> Option<Rect> {
        let x = f64::from(anchor % 40) * 48.0;
        let y = f64::from(anchor / 40) * 24.0;
        Some(Rect::new(x, y, x + 40.0, y + 20.0))
    }

    fn viewport_size(&self) -> Size {
        Size::new(1920.0, 1080.0)
    }
}

impl TooltipHost<u32> for GridHost {
    fn measure_tooltip(&mut self, content: &str) -> Option<Size> {
        Some(Size::new(7.0 * content.len() as f64, 20.0))
    }
}

impl PortalHost<u32> for GridHost {
    fn floating_size(&self, _portal: &u32) -> Option<Size> {
        Some(Size::new(160.0, 240.0))
    }
}

fn registered(n: u32) -> TooltipManager<u32> {
    let mut tooltips = TooltipManager::new();
    for anchor in 0..n {
        tooltips
            .register(anchor, TooltipOptions::new("Tooltip text").show_delay(50))
            .unwrap();
    }
    tooltips
}

/// Pointer sweeping across a row of anchors: every enter cancels the
/// previous anchor's timer and every show moves the shared surface.
fn bench_hover_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("tooltip/hover_sweep");

    for n in [100u32, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || registered(n),
                |mut tooltips| {
                    let mut host = GridHost;
                    let mut now = 0;
                    for anchor in 0..n {
                        tooltips.request_show(anchor, now);
                        now += 60;
                        black_box(tooltips.advance(now, &mut host));
                        tooltips.request_hide(anchor, now);
                    }
                    black_box(tooltips);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_portal_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("portal/frame");

    for n in [1u32, 16, 128] {
        let mut portals = PortalTracker::new();
        for portal in 0..n {
            portals.open(portal, PortalAnchor::Element(portal), PortalOptions::default());
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(portals.on_animation_frame(&GridHost)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hover_sweep, bench_portal_frames);
criterion_main!(benches);
