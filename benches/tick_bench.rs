use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use thermofarm::core::types::Vec2;
use thermofarm::core::GameConfig;
use thermofarm::simulation::{Engine, GameState, HeatPoint, HeatSource};

/// Engine warmed up past the first tick, with `extra` drifting heat points
fn warmed(extra: usize) -> (Engine, GameState) {
    let mut engine = Engine::with_seed(GameConfig::default(), 0xBEEF).expect("default config");
    let initial = engine.initial_state();
    let mut state = engine.tick(&initial).state;
    for i in 0..extra {
        state.heat_points.push(HeatPoint {
            pos: Vec2::new(10.0 + i as f64 * 7.0, 50.0),
            strength: 5.0,
            source: HeatSource::Random,
            vel: state.wind,
        });
    }
    (engine, state)
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for &points in &[0usize, 4, 12] {
        group.bench_function(format!("heat_points_{}", points), |b| {
            b.iter_batched(
                || warmed(points),
                |(mut engine, state)| black_box(engine.tick(&state)),
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("run_600_ticks", |b| {
        b.iter_batched(
            || warmed(0),
            |(mut engine, state)| black_box(engine.run(state, 600)),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
