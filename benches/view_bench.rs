//! Per-frame cost of the camera path: composing the transform and folding
//! a drag into the arcball.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use femview::camera::{Arcball, CameraFrame, CameraPose, OrientationModel};
use femview::input::{DragMode, DragSample, Modifiers};
use femview::{Options, ViewComposer};
use glam::{Vec2, Vec3};

fn update_view_benchmark(c: &mut Criterion) {
    let mut composer = ViewComposer::new(
        &Options::default(),
        800,
        600,
        CameraPose::new(
            Vec3::new(75.0, 37.5, 110.0),
            Vec3::new(75.0, 37.5, -15.0),
            Vec3::NEG_Y,
        ),
    )
    .unwrap();
    composer.translate_world(Vec3::new(-0.5, -0.25, 0.1));
    composer.scale_world(150.0).unwrap();

    let _ = c.bench_function("update_view", |b| {
        b.iter(|| black_box(composer.update_view()))
    });
}

fn drag_benchmark(c: &mut Criterion) {
    let frame = CameraFrame {
        right: Vec3::X,
        up: Vec3::Y,
        back: Vec3::Z,
        world_up: Vec3::Y,
    };
    let sample = DragSample {
        mode: DragMode::Rotate,
        previous: Vec2::new(10.0, -20.0),
        current: Vec2::new(14.0, -17.0),
        delta: Vec2::new(4.0, 3.0),
        axis: Vec3::X,
        extent: Vec2::new(800.0, 600.0),
    };
    let mut arcball = Arcball::new(1000.0);
    let _ = c.bench_function("arcball_apply", |b| {
        b.iter(|| black_box(arcball.apply(black_box(&sample), &frame)))
    });

    let mut composer = ViewComposer::new(
        &Options::default(),
        800,
        600,
        CameraPose::default(),
    )
    .unwrap();
    composer.pointer_down(400.0, 300.0, Modifiers::default());
    let mut x = 400.0;
    let _ = c.bench_function("pointer_move_rotate", |b| {
        b.iter(|| {
            x = if x > 700.0 { 100.0 } else { x + 1.0 };
            composer.pointer_move(black_box(x), 300.0);
        })
    });
}

criterion_group!(benches, update_view_benchmark, drag_benchmark);
criterion_main!(benches);
