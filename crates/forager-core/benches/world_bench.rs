use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use forager_core::{ForagerConfig, World};
use std::time::Duration;

const DT: f32 = 1.0 / 60.0;

fn bench_world_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    // Longer measurement windows give more stable results; allow env overrides
    let samples: usize = std::env::var("FG_BENCH_SAMPLES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(30);
    let warm: u64 = std::env::var("FG_BENCH_WARMUP_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2);
    let measure: u64 = std::env::var("FG_BENCH_MEASURE_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10);
    group.sample_size(samples);
    group.warm_up_time(Duration::from_secs(warm));
    group.measurement_time(Duration::from_secs(measure));
    // Ticks per bench iteration (can override via FG_BENCH_STEPS)
    let steps: usize = std::env::var("FG_BENCH_STEPS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(64);
    let ants_list: Vec<usize> = std::env::var("FG_BENCH_ANTS")
        .ok()
        .map(|s| {
            s.split(',')
                .filter_map(|t| t.trim().parse::<usize>().ok())
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| vec![1000_usize, 5000, 20000]);
    for &ants in &ants_list {
        group.bench_function(format!("steps{}_ants{}", steps, ants), |b| {
            b.iter_batched(
                || {
                    let config = ForagerConfig {
                        // Smaller world to stress trail density
                        world_width: 800.0,
                        world_height: 800.0,
                        rng_seed: Some(0xBEEF_u64),
                        history_capacity: 1,
                        ..ForagerConfig::default()
                    };
                    let mut world = World::new(config).expect("world");
                    world.mark_colony(400.0, 400.0);
                    for seed in 0..16u32 {
                        let x = ((seed * 193) % 800) as f32;
                        let y = ((seed * 389) % 800) as f32;
                        world.place_food(x, y, 50.0);
                    }
                    for _ in 0..ants {
                        world.place_ant_random_heading(400.0, 400.0);
                    }
                    world
                },
                |mut world| {
                    for _ in 0..steps {
                        world.step(DT);
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_world_steps);
criterion_main!(benches);
