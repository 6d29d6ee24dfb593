//! Headless herd simulation.
//!
//! Builds rolling procedural terrain with a lake, scatters animals over it and
//! walks a player in a circle through the herd, logging how many animals are
//! in each state.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fauna::{
    init_logging, populate, AnimalBehaviourController, FaunaConfig, Heightmap, SpawnRules,
};
use glam::Vec3;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Terrain-aware animal behaviour demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of animals to scatter
    #[arg(short, long, default_value_t = 24)]
    animals: usize,
    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1800)]
    ticks: u32,
    /// Seconds per tick
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    delta: f32,
    /// Random seed for terrain placement and behaviour
    #[arg(short, long, default_value_t = 1)]
    seed: u64,
}

/// Hills with a lake in the north-east quadrant.
fn terrain_height(x: f32, z: f32) -> f32 {
    let hills = (x * 0.08).sin() * 2.0 + (z * 0.05).cos() * 1.5 + 3.0;
    let lake = (-((x - 40.0).powi(2) + (z - 40.0).powi(2)) / 400.0).exp() * 8.0;
    hills - lake
}

fn player_at(elapsed: f32, radius: f32) -> Vec3 {
    let angle = elapsed * 0.2;
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = FaunaConfig::load(args.config.as_deref()).context("loading configuration")?;
    let extent = config.world.bounds.half_extent;
    let terrain = Heightmap::from_fn(129, extent, terrain_height)
        .context("world extent too small for a heightmap")?;

    let mut herd = AnimalBehaviourController::seeded(
        terrain,
        &config.world,
        config.behaviour.clone(),
        args.seed,
    )
    .context("building behaviour controller")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(1));
    let ids = populate(&mut herd, args.animals, &mut rng, &SpawnRules::default())
        .context("populating the world")?;
    info!("simulating {} animals for {} ticks", ids.len(), args.ticks);

    let mut elapsed = 0.0_f32;
    for tick in 1..=args.ticks {
        elapsed += args.delta;
        let player = player_at(elapsed, extent * 0.3);
        herd.update(args.delta, player);

        if tick % 300 == 0 || tick == args.ticks {
            let census = herd.census();
            info!(
                "t={elapsed:.1}s player={player} idle={} wandering={} fleeing={}",
                census.idle, census.wandering, census.fleeing
            );
        }
    }
    Ok(())
}
