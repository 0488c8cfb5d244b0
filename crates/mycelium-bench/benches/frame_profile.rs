//! Criterion benchmarks for whole frames: step plus composite.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mycelium_bench::{
    reference_profile, stress_profile, warmed_engine, FRAME_DT, REFERENCE_DIMS, STRESS_DIMS,
};
use mycelium_engine::Engine;

fn bench_frame_reference(c: &mut Criterion) {
    let mut engine = warmed_engine(reference_profile(42), REFERENCE_DIMS, 200).unwrap();
    let mut time = 200.0 * FRAME_DT;
    let (w, h) = REFERENCE_DIMS;

    c.bench_function("frame_80x24", |b| {
        b.iter(|| {
            time += FRAME_DT;
            black_box(engine.render(w, h, time));
        });
    });
}

fn bench_frame_stress(c: &mut Criterion) {
    let mut engine = warmed_engine(stress_profile(42), STRESS_DIMS, 200).unwrap();
    let mut time = 200.0 * FRAME_DT;
    let (w, h) = STRESS_DIMS;

    c.bench_function("frame_320x96", |b| {
        b.iter(|| {
            time += FRAME_DT;
            black_box(engine.render(w, h, time));
        });
    });
}

fn bench_step_only(c: &mut Criterion) {
    let mut engine = warmed_engine(reference_profile(42), REFERENCE_DIMS, 200).unwrap();
    let mut time = 200.0 * FRAME_DT;
    let (w, h) = REFERENCE_DIMS;

    c.bench_function("step_80x24", |b| {
        b.iter(|| {
            time += FRAME_DT;
            black_box(engine.step(w, h, time).unwrap());
        });
    });
}

fn bench_resize_reset(c: &mut Criterion) {
    let mut engine = Engine::new(reference_profile(42)).unwrap();
    let mut flip = false;

    c.bench_function("resize_reset", |b| {
        b.iter(|| {
            flip = !flip;
            let (w, h) = if flip { (80, 24) } else { (81, 24) };
            black_box(engine.render(w, h, 0.0));
        });
    });
}

fn bench_1000_frames_reference(c: &mut Criterion) {
    c.bench_function("1000_frames_80x24", |b| {
        b.iter(|| {
            let engine = warmed_engine(reference_profile(42), REFERENCE_DIMS, 1000).unwrap();
            black_box(engine.current_tick());
        });
    });
}

criterion_group!(
    benches,
    bench_frame_reference,
    bench_frame_stress,
    bench_step_only,
    bench_resize_reset,
    bench_1000_frames_reference
);
criterion_main!(benches);
