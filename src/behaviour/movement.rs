//! Terrain-validated movement shared by wandering and fleeing.

use glam::Vec3;
use log::{debug, trace};
use rand::Rng;

use crate::animal::{Animal, AnimalId, AnimalState};
use crate::numeric::turn_towards;
use crate::terrain::{sample_height, TerrainHeightQuery};
use crate::vector_math::{heading_of, planar, planar_direction};

use super::state_machine::Tick;

/// Fraction of the intended step the bounds clamp may leave before the step
/// counts as no movement.
const STALL_FRACTION: f32 = 0.01;

/// Result of attempting one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StepOutcome {
    /// Position and heading updated.
    Moved,
    /// Terrain unavailable; the animal holds position.
    Held,
    /// Water or slope blocked the step; the animal is now idle.
    Rejected,
    /// The world edge left nothing to move.
    Stalled,
}

impl<T, R> Tick<'_, T, R>
where
    T: TerrainHeightQuery + ?Sized,
    R: Rng + ?Sized,
{
    /// Moves `animal` towards `target` at `speed`, validating the terrain at
    /// the proposed position.
    pub(super) fn step(
        &mut self,
        id: AnimalId,
        animal: &mut Animal,
        target: Vec3,
        speed: f32,
    ) -> StepOutcome {
        let Some(direction) = planar_direction(animal.position, target) else {
            return StepOutcome::Stalled;
        };
        let current = planar(animal.position);
        let travel = (speed * self.dt).min(current.distance(planar(target)));
        let intended = current + direction * travel;
        let proposed = self.bounds.clamp(intended);
        if intended.distance(proposed) >= travel * (1.0 - STALL_FRACTION) {
            return StepOutcome::Stalled;
        }

        let Some(height) = sample_height(self.terrain, proposed) else {
            if self.startup {
                debug!("{id} holding position until terrain is ready");
            } else {
                trace!("{id} holding position: no terrain height at {proposed}");
            }
            return StepOutcome::Held;
        };

        if height < self.water_level {
            debug!("{id} refused to enter water at {proposed}");
            return self.reject(animal);
        }
        if (height - animal.ground).abs() > self.config.max_climb {
            debug!(
                "{id} refused slope from {:.2} to {height:.2}",
                animal.ground
            );
            return self.reject(animal);
        }

        animal.position = Vec3::new(proposed.x, height + self.config.ground_offset, proposed.y);
        animal.ground = height;
        animal.heading = turn_towards(
            animal.heading,
            heading_of(direction),
            self.config.turn_rate * self.dt,
        );
        StepOutcome::Moved
    }

    fn reject(&mut self, animal: &mut Animal) -> StepOutcome {
        animal.state = AnimalState::Idle {
            timer: self.retry_pause(),
        };
        StepOutcome::Rejected
    }
}
