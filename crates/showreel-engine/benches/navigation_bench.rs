//! Benchmarks for scene navigation hot paths.
//!
//! Measures the cost of committing cursor moves and rebuilding the grid
//! projection over a large catalogue (64 scenes, 12 media each).
//!
//! Run with: cargo bench -p showreel-engine --bench navigation_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use showreel_engine::cursor::BoundaryPolicy;
use showreel_engine::{EngineConfig, MediaAsset, Scene, SceneEngine};
use web_time::{Duration, Instant};

const SCENES: usize = 64;
const MEDIA_PER_SCENE: usize = 12;

fn catalogue(scenes: usize, media: usize) -> Vec<Scene> {
    (0..scenes)
        .map(|s| {
            (0..media).fold(
                Scene::new(format!("scene-{s}"), format!("Scene {s}")),
                |scene, m| scene.with_media(MediaAsset::new(format!("/media/{s}/{m}.webp"), "")),
            )
        })
        .collect()
}

fn engine(boundary: BoundaryPolicy) -> SceneEngine {
    let mut config = EngineConfig::default();
    config.navigation.boundary = boundary;
    config.navigation.transition_ms = 0;
    SceneEngine::builder(catalogue(SCENES, MEDIA_PER_SCENE))
        .with_config(config)
        .build()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_step_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation/step_walk");
    let total = SCENES * MEDIA_PER_SCENE;

    group.bench_function("next_full_cycle_wrap", |b| {
        let mut engine = engine(BoundaryPolicy::Wrap);
        let t = Instant::now();
        b.iter(|| {
            for _ in 0..total {
                black_box(engine.next(t));
            }
        })
    });

    group.bench_function("prev_full_cycle_wrap", |b| {
        let mut engine = engine(BoundaryPolicy::Wrap);
        let t = Instant::now();
        b.iter(|| {
            for _ in 0..total {
                black_box(engine.prev(t));
            }
        })
    });

    // Every call past the end reports AtBoundary without committing.
    group.bench_function("next_at_clamp_end", |b| {
        let mut engine = engine(BoundaryPolicy::Clamp);
        let t = Instant::now();
        engine.last(t);
        b.iter(|| black_box(engine.next(t)))
    });

    group.finish();
}

fn bench_suppressed_commits(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation/transition_window");
    let mut config = EngineConfig::carousel();
    config.navigation.transition_ms = 400;
    let mut engine = SceneEngine::builder(catalogue(SCENES, MEDIA_PER_SCENE))
        .with_config(config)
        .build();
    let t = Instant::now();
    engine.next(t);
    let inside = t + Duration::from_millis(10);

    group.bench_function("next_suppressed", |b| {
        b.iter(|| black_box(engine.next(inside)))
    });

    group.finish();
}

fn bench_grid_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation/grid_items");

    for &media in &[1usize, 12, 48] {
        let mut engine = SceneEngine::new(catalogue(SCENES, media));
        let favorites: Vec<String> = (0..SCENES)
            .step_by(3)
            .map(|s| format!("/media/{s}/0.webp"))
            .collect();
        engine.toggle_favorites(favorites.iter());

        group.bench_with_input(
            BenchmarkId::from_parameter(SCENES * media),
            &media,
            |b, _| b.iter(|| black_box(engine.grid_items().len())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_step_walk,
    bench_suppressed_commits,
    bench_grid_projection
);
criterion_main!(benches);
