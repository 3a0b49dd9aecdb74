// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_floating::{Placement, compute_position, position_at_point};

const VIEWPORT: Size = Size::new(1920.0, 1080.0);

/// Anchors spread over a grid covering the viewport and a band outside it,
/// so every edge case (flip, clamp, both) shows up.
fn anchors(n: usize) -> Vec<Rect> {
    let side = (n as f64).sqrt().ceil() as usize;
    let step_x = (VIEWPORT.width + 400.0) / side as f64;
    let step_y = (VIEWPORT.height + 400.0) / side as f64;
    (0..n)
        .map(|i| {
            let x = -200.0 + (i % side) as f64 * step_x;
            let y = -200.0 + (i / side) as f64 * step_y;
            Rect::new(x, y, x + 96.0, y + 28.0)
        })
        .collect()
}

fn bench_compute_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("positioning/compute_position");
    let floating = Size::new(180.0, 48.0);

    for n in [64usize, 1_024] {
        let anchors = anchors(n);
        group.throughput(Throughput::Elements(n as u64));
        for placement in [Placement::Top, Placement::RightEnd, Placement::Auto] {
            group.bench_with_input(
                BenchmarkId::new(placement.as_str(), n),
                &anchors,
                |b, anchors| {
                    b.iter(|| {
                        for &anchor in anchors {
                            black_box(compute_position(
                                anchor, floating, 8.0, placement, VIEWPORT,
                            ));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_point_anchor(c: &mut Criterion) {
    let mut group = c.benchmark_group("positioning/point");
    let floating = Size::new(220.0, 320.0);
    let points: Vec<Point> = anchors(1_024).iter().map(|r| r.center()).collect();
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("bottom_start", |b| {
        b.iter(|| {
            for &point in &points {
                black_box(position_at_point(
                    point,
                    floating,
                    2.0,
                    Placement::BottomStart,
                    VIEWPORT,
                ));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_compute_position, bench_point_anchor);
criterion_main!(benches);
