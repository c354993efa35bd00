//! Simulation throughput benchmarks
//!
//! Measures one `advance` call against fields of increasing hostile
//! counts, with the garrison and collectibles populated.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use goldwing::game::config::GameConfig;
use goldwing::game::input::FrameInput;
use goldwing::game::soldier;
use goldwing::game::state::GameState;
use goldwing::game::tick;
use goldwing::Vec2;

/// Build a field with `hostiles` stationary hostiles (so the population
/// stays constant across iterations) plus a ring of soldiers and a
/// scattering of collectibles.
fn populated_state(config: &GameConfig, hostiles: usize) -> GameState {
    let mut state = GameState::new(config, 42);

    for i in 0..hostiles {
        let x = 10.0 + (i % 20) as f64 * 20.0;
        let y = 10.0 + (i / 20) as f64 * 25.0;
        // Immortal and immobile: soldiers fire every cooldown but the
        // field never shrinks mid-benchmark.
        state.spawn_hostile(Vec2::new(x, y), f64::MAX, 0.0, config);
    }

    for i in 0..20 {
        state.spawn_collectible(Vec2::new(15.0 * i as f64, 580.0), 1.0);
    }

    soldier::sync_population(&mut state, config);
    state
}

fn bench_advance(c: &mut Criterion) {
    let config = GameConfig::keep_siege();
    let input = FrameInput::idle();
    let dt = 1.0 / 60.0;

    let mut group = c.benchmark_group("advance");
    for count in [8usize, 64, 256] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("hostiles", count), &count, |b, &count| {
            let mut state = populated_state(&config, count);
            b.iter(|| {
                let events = tick::advance(&mut state, &input, dt, &config);
                black_box(events);
            });
        });
    }
    group.finish();
}

fn bench_tap_resolution(c: &mut Criterion) {
    let config = GameConfig::war_tapper();
    let dt = 1.0 / 60.0;

    c.bench_function("advance/tap", |b| {
        let mut state = populated_state(&config, 64);
        let input = FrameInput::with_tap(Vec2::new(100.0, 100.0));
        b.iter(|| {
            let events = tick::advance(&mut state, &input, dt, &config);
            black_box(events);
        });
    });
}

criterion_group!(benches, bench_advance, bench_tap_resolution);
criterion_main!(benches);
