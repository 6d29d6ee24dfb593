//! Initial animal placement.
//!
//! Scatters animals over dry, gently sloped terrain and registers them with a
//! controller. This is the world-population side of the animal lifecycle: the
//! controller never creates animals on its own.

use glam::{Vec2, Vec3};
use log::{debug, info, warn};
use rand::Rng;
use thiserror::Error;

use crate::animal::AnimalId;
use crate::behaviour::AnimalBehaviourController;
use crate::terrain::{sample_height, TerrainHeightQuery};

/// Errors raised while populating the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// Terrain reported itself not ready.
    #[error("terrain is not ready for placement")]
    TerrainNotReady,
    /// No suitable location was found for any animal.
    #[error("no suitable location found after {attempts} attempts")]
    Exhausted {
        /// Total candidate points tried.
        attempts: usize,
    },
}

/// Placement rules for [`populate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRules {
    /// Distance kept from the world edge.
    pub edge_margin: f32,
    /// Largest height difference to any probe point.
    pub max_slope: f32,
    /// Planar distance of the four slope probes.
    pub probe_offset: f32,
    /// Candidate points tried per animal before giving up on it.
    pub attempts_per_animal: usize,
}

impl Default for SpawnRules {
    fn default() -> Self {
        Self {
            edge_margin: 5.0,
            max_slope: 1.0,
            probe_offset: 1.0,
            attempts_per_animal: 30,
        }
    }
}

fn probes(point: Vec2, offset: f32) -> [Vec2; 4] {
    [
        point + Vec2::new(offset, 0.0),
        point - Vec2::new(offset, 0.0),
        point + Vec2::new(0.0, offset),
        point - Vec2::new(0.0, offset),
    ]
}

/// Whether an animal may stand at `point`; returns the ground height when it
/// can.
fn suitable<T>(terrain: &T, point: Vec2, water_level: f32, rules: &SpawnRules) -> Option<f32>
where
    T: TerrainHeightQuery + ?Sized,
{
    let height = sample_height(terrain, point)?;
    if height < water_level {
        return None;
    }
    let flat_enough = probes(point, rules.probe_offset).into_iter().all(|probe| {
        sample_height(terrain, probe).is_some_and(|h| (h - height).abs() <= rules.max_slope)
    });
    flat_enough.then_some(height)
}

/// Scatters up to `count` animals and registers them with `controller`.
///
/// Each animal gets a random speed seed. Animals that cannot be placed within
/// [`SpawnRules::attempts_per_animal`] tries are skipped with a warning.
///
/// # Errors
/// Returns [`SpawnError::TerrainNotReady`] when the terrain is not ready and
/// [`SpawnError::Exhausted`] when `count > 0` but no animal could be placed.
pub fn populate<T, R, G>(
    controller: &mut AnimalBehaviourController<T, R>,
    count: usize,
    rng: &mut G,
    rules: &SpawnRules,
) -> Result<Vec<AnimalId>, SpawnError>
where
    T: TerrainHeightQuery,
    R: Rng,
    G: Rng + ?Sized,
{
    if !controller.terrain().is_ready() {
        return Err(SpawnError::TerrainNotReady);
    }
    let extent = (controller.bounds().half_extent - rules.edge_margin).max(0.0);
    let water_level = controller.water_level();
    let offset = controller.config().ground_offset;

    let mut placed = Vec::with_capacity(count);
    let mut attempts = 0;
    for _ in 0..count {
        let mut spot = None;
        for _ in 0..rules.attempts_per_animal {
            attempts += 1;
            let point = if extent > 0.0 {
                Vec2::new(
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                )
            } else {
                Vec2::ZERO
            };
            if let Some(height) = suitable(controller.terrain(), point, water_level, rules) {
                spot = Some(Vec3::new(point.x, height + offset, point.y));
                break;
            }
        }

        let Some(position) = spot else {
            warn!(
                "gave up placing an animal after {} attempts",
                rules.attempts_per_animal
            );
            continue;
        };
        match controller.register(position, rng.gen::<f32>()) {
            Ok(id) => placed.push(id),
            Err(e) => debug!("skipping spawn point: {e}"),
        }
    }

    if count > 0 && placed.is_empty() {
        return Err(SpawnError::Exhausted { attempts });
    }
    info!("placed {} of {count} animals", placed.len());
    Ok(placed)
}
