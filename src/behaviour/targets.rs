//! Wander and flee target selection.
//!
//! Targets are clamped to the world bounds and given a terrain height so the
//! water rules can be applied before an animal commits to them.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use log::debug;
use rand::Rng;

use crate::animal::{Animal, AnimalId, AnimalState};
use crate::terrain::{sample_height, TerrainHeightQuery};
use crate::vector_math::{direction_from_heading, planar, planar_direction};

use super::state_machine::Tick;

/// A candidate target and whether it lies under water.
struct Candidate {
    target: Vec3,
    submerged: bool,
}

impl<T, R> Tick<'_, T, R>
where
    T: TerrainHeightQuery + ?Sized,
    R: Rng + ?Sized,
{
    fn random_direction(&mut self) -> Vec2 {
        direction_from_heading(self.rng.gen_range(-PI..PI))
    }

    /// Resolves a planar offset from the animal into a bounded target.
    ///
    /// When the terrain cannot be sampled the animal's own height is used and
    /// the candidate is treated as dry; movement validation re-checks every
    /// step anyway.
    fn candidate(&self, animal: &Animal, offset: Vec2) -> Candidate {
        let point = self.bounds.clamp(planar(animal.position) + offset);
        match sample_height(self.terrain, point) {
            Some(height) => Candidate {
                target: Vec3::new(point.x, height + self.config.ground_offset, point.y),
                submerged: height < self.water_level,
            },
            None => Candidate {
                target: Vec3::new(point.x, animal.position.y, point.y),
                submerged: false,
            },
        }
    }

    /// Switches the animal to fleeing from the player.
    pub(super) fn begin_flee(&mut self, id: AnimalId, animal: &mut Animal) {
        let away = planar_direction(self.player, animal.position)
            .unwrap_or_else(|| self.random_direction());
        let distance = self.config.flee_distance.sample(&mut *self.rng);
        let first = self.candidate(animal, away * distance);

        let target = if first.submerged {
            let retry = self.random_direction();
            let second = self.candidate(animal, retry * distance);
            if second.submerged {
                debug!("{id} found no dry escape; accepting {}", second.target);
            }
            second.target
        } else {
            first.target
        };

        let timer = self.config.flee_timer.sample(&mut *self.rng);
        debug!("{id} flees towards {target} for {timer:.1}s");
        animal.state = AnimalState::Fleeing { target, timer };
    }

    /// Picks a wander target or, when it lies under water, idles briefly.
    pub(super) fn begin_wander(&mut self, id: AnimalId, animal: &mut Animal) {
        let direction = self.random_direction();
        let distance = self.rng.gen_range(0.0..=self.config.wander_radius);
        let candidate = self.candidate(animal, direction * distance);

        if candidate.submerged {
            debug!("{id} skipped wander target under water");
            animal.state = AnimalState::Idle {
                timer: self.retry_pause(),
            };
            return;
        }

        debug!("{id} wanders towards {}", candidate.target);
        animal.state = AnimalState::Wandering {
            target: candidate.target,
            remaining: self.config.wander_timeout,
        };
    }
}
