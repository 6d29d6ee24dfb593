//! Per-tick state transitions.

use glam::Vec3;
use log::debug;
use rand::Rng;

use crate::animal::{Animal, AnimalId, AnimalState};
use crate::config::BehaviourConfig;
use crate::numeric::wrap_angle;
use crate::terrain::TerrainHeightQuery;
use crate::vector_math::planar_distance_squared;
use crate::world::WorldBounds;

use super::movement::StepOutcome;

/// Shared inputs for one controller tick.
///
/// The player position is read once per tick and animals never observe each
/// other; only the shared random source couples them.
pub(super) struct Tick<'a, T: ?Sized, R: ?Sized> {
    pub(super) terrain: &'a T,
    pub(super) config: &'a BehaviourConfig,
    pub(super) bounds: WorldBounds,
    pub(super) water_level: f32,
    pub(super) rng: &'a mut R,
    pub(super) player: Vec3,
    pub(super) dt: f32,
    /// Terrain has not yet been observed ready.
    pub(super) startup: bool,
}

impl<T, R> Tick<'_, T, R>
where
    T: TerrainHeightQuery + ?Sized,
    R: Rng + ?Sized,
{
    pub(super) fn advance(&mut self, id: AnimalId, animal: &mut Animal) {
        if !animal.state.is_fleeing() && self.threatened(animal) {
            self.begin_flee(id, animal);
        }

        match animal.state {
            AnimalState::Idle { timer } => self.idle(id, animal, timer),
            AnimalState::Wandering { target, remaining } => {
                self.wander(id, animal, target, remaining);
            }
            AnimalState::Fleeing { target, timer } => self.flee(id, animal, target, timer),
        }
    }

    fn threatened(&self, animal: &Animal) -> bool {
        planar_distance_squared(animal.position, self.player)
            < self.config.flee_trigger_radius_sq()
    }

    fn reached(&self, animal: &Animal, target: Vec3) -> bool {
        planar_distance_squared(animal.position, target) < self.config.arrive_epsilon_sq
    }

    pub(super) fn idle_pause(&mut self) -> f32 {
        self.config.idle_timer.sample(&mut *self.rng)
    }

    pub(super) fn retry_pause(&mut self) -> f32 {
        self.config.retry_idle.sample(&mut *self.rng)
    }

    fn recovery_pause(&mut self) -> f32 {
        self.idle_pause() + self.config.flee_recovery_bonus
    }

    fn idle(&mut self, id: AnimalId, animal: &mut Animal, timer: f32) {
        if self.rng.gen_bool(self.config.look_around_chance) {
            let limit = self.config.look_around_max_angle;
            if limit > 0.0 {
                let nudge = self.rng.gen_range(-limit..=limit);
                animal.heading = wrap_angle(animal.heading + nudge);
            }
        }

        let remaining = timer - self.dt;
        if remaining > 0.0 {
            animal.state = AnimalState::Idle { timer: remaining };
        } else if self.rng.gen_bool(self.config.wander_chance) {
            self.begin_wander(id, animal);
        } else {
            animal.state = AnimalState::Idle {
                timer: self.idle_pause(),
            };
        }
    }

    fn wander(&mut self, id: AnimalId, animal: &mut Animal, target: Vec3, remaining: f32) {
        if self.reached(animal, target) {
            debug!("{id} reached wander target");
            animal.state = AnimalState::Idle {
                timer: self.idle_pause(),
            };
            return;
        }
        let left = remaining - self.dt;
        if left <= 0.0 {
            debug!("{id} abandoned wander target {target}");
            animal.state = AnimalState::Idle {
                timer: self.idle_pause(),
            };
            return;
        }

        animal.state = AnimalState::Wandering {
            target,
            remaining: left,
        };
        let speed = animal.speed;
        if self.step(id, animal, target, speed) == StepOutcome::Stalled {
            animal.state = AnimalState::Idle {
                timer: self.idle_pause(),
            };
        }
    }

    fn flee(&mut self, id: AnimalId, animal: &mut Animal, target: Vec3, timer: f32) {
        let left = timer - self.dt;
        if left <= 0.0 || self.reached(animal, target) {
            debug!("{id} stopped fleeing");
            animal.state = AnimalState::Idle {
                timer: self.recovery_pause(),
            };
            return;
        }

        animal.state = AnimalState::Fleeing {
            target,
            timer: left,
        };
        let speed = animal.speed * self.config.flee_speed_multiplier;
        if self.step(id, animal, target, speed) == StepOutcome::Stalled {
            debug!("{id} cornered against the world edge");
            animal.state = AnimalState::Idle {
                timer: self.recovery_pause(),
            };
        }
    }
}
