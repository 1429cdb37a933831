use anyhow::Result;
use forager_core::{ForagerConfig, World};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, warn};

const DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    init_tracing();
    let ants = env_parse("FORAGER_ANTS", 500_usize);
    let food = env_parse("FORAGER_FOOD", 12_usize);
    let ticks = env_parse("FORAGER_TICKS", 36_000_u64);
    let seed = env_parse("FORAGER_SEED", 0xF0CA_u64);
    let threads = env_parse("FORAGER_THREADS", 0_usize);

    let mut world = bootstrap_world(ants, food, seed, threads)?;
    info!(ants, food, ticks, seed, "starting forager run");
    run(&mut world, ticks);

    if let Some(summary) = world.history().last() {
        info!(
            tick = summary.tick.0,
            food_left = summary.food_count,
            intensity = summary.total_intensity,
            "run complete",
        );
    } else {
        warn!("run completed without any tick summaries");
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<T>().ok())
        .unwrap_or(default)
}

fn bootstrap_world(ants: usize, food: usize, seed: u64, threads: usize) -> Result<World> {
    let config = ForagerConfig {
        rng_seed: Some(seed),
        worker_threads: threads,
        history_capacity: 600,
        ..ForagerConfig::default()
    };
    let width = config.world_width;
    let height = config.world_height;
    let mut world = World::new(config)?;

    let colony = (width * 0.5, height * 0.5);
    world.mark_colony(colony.0, colony.1);
    for _ in 0..ants {
        world.place_ant_random_heading(colony.0, colony.1);
    }

    // Food scattered from a placement RNG kept separate from the world RNG
    // so tweaking the scatter does not perturb ant behavior per seed.
    let mut scatter = SmallRng::seed_from_u64(seed ^ 0x5EED_F00D);
    let mut placed = 0;
    while placed < food {
        let x = scatter.gen_range(0.0..width);
        let y = scatter.gen_range(0.0..height);
        let quantity = scatter.gen_range(20.0..80.0f32).floor();
        if world.place_food(x, y, quantity) {
            placed += 1;
        }
    }
    Ok(world)
}

fn run(world: &mut World, ticks: u64) {
    let mut pickups = 0u64;
    let mut deliveries = 0u64;
    for _ in 0..ticks {
        let events = world.step(DT);
        pickups += u64::from(events.pickups);
        deliveries += u64::from(events.deliveries);
        if events.tick.0 % 600 == 0 {
            info!(
                tick = events.tick.0,
                pickups,
                deliveries,
                food_left = world.food_count(),
                "progress",
            );
        }
        if world.food_count() == 0 {
            info!(tick = events.tick.0, pickups, deliveries, "all food collected");
            break;
        }
    }
}
