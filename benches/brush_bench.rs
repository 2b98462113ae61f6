use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use scene_editor_core::app::tools::{BrushEngine, BrushSettings};
use scene_editor_core::SplatMap;
use std::hint::black_box;

fn build_stroke_path(count: usize, size: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            Vec2::new(
                size * 0.5 + (t * std::f32::consts::TAU).cos() * size * 0.35,
                size * 0.5 + (t * std::f32::consts::TAU).sin() * size * 0.35,
            )
        })
        .collect()
}

fn bench_brush_strokes(c: &mut Criterion) {
    let mut group = c.benchmark_group("brush_stroke");

    for &radius in &[4.0f32, 16.0f32] {
        let settings = BrushSettings {
            radius,
            smoothness: 0.5,
            opacity: 0.8,
        };
        let path = build_stroke_path(256, 512.0);

        group.bench_with_input(BenchmarkId::new("circle_512", radius as u32), &settings, |b, s| {
            b.iter(|| {
                let mut map = SplatMap::new(512, 512, 4);
                let mut engine = BrushEngine::new(*s);
                engine.begin_stroke(&map, path[0]);
                let mut changed = 0usize;
                for center in &path[1..] {
                    changed += engine.paint_at(&mut map, black_box(*center), 2);
                }
                black_box(engine.end_stroke());
                black_box(changed)
            })
        });
    }

    group.finish();
}

fn bench_intensity(c: &mut Criterion) {
    let settings = BrushSettings {
        radius: 20.0,
        smoothness: 0.5,
        opacity: 1.0,
    };

    c.bench_function("brush_intensity_falloff", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for step in 0..2000 {
                if let Some(value) = settings.intensity(black_box(step as f32 * 0.01)) {
                    sum += value;
                }
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_brush_strokes, bench_intensity);
criterion_main!(benches);
