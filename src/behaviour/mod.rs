//! Animal behaviour controller.
//!
//! [`AnimalBehaviourController`] owns the live animal population and advances
//! each animal's idle/wander/flee state machine once per frame. Terrain and
//! world parameters are injected at construction; the controller never
//! reaches for global state.
//!
//! # Examples
//! ```
//! use fauna::prelude::*;
//! use glam::Vec3;
//!
//! let world = WorldParams::new(50.0, -1.0);
//! let mut herd = AnimalBehaviourController::seeded(
//!     FlatTerrain::new(0.0),
//!     &world,
//!     BehaviourConfig::default(),
//!     7,
//! )
//! .unwrap();
//! let deer = herd.register(Vec3::ZERO, 0.5).unwrap();
//! herd.update(0.016, Vec3::new(40.0, 0.0, 40.0));
//! assert!(herd.position(deer).is_some());
//! ```

mod movement;
mod state_machine;
mod targets;

use std::collections::hash_map::DefaultHasher;
use std::hash::BuildHasherDefault;

use glam::Vec3;
use hashbrown::HashMap;
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::animal::{Animal, AnimalId, Census};
#[cfg(any(test, feature = "test-support"))]
use crate::animal::AnimalState;
use crate::config::{validate_world, BehaviourConfig, ConfigError};
use crate::terrain::{sample_height, TerrainHeightQuery};
use crate::vector_math::planar;
use crate::world::{WorldBounds, WorldCollaborator, WorldParams};

use state_machine::Tick;

/// Errors raised when registering an animal.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RegisterError {
    /// The initial position contained NaN or infinity.
    #[error("initial position {0} is not finite")]
    NonFinitePosition(Vec3),
}

/// Animal store with fixed hash keys, so iteration order and therefore the
/// order animals draw random numbers depends only on registration history.
type AnimalMap = HashMap<AnimalId, Animal, BuildHasherDefault<DefaultHasher>>;

/// Drives the behaviour of a population of animals.
///
/// `T` supplies terrain heights; `R` is the random source used for timers,
/// targets and idle flavour.
#[derive(Debug)]
pub struct AnimalBehaviourController<T, R = ChaCha8Rng> {
    terrain: T,
    world: WorldParams,
    config: BehaviourConfig,
    animals: AnimalMap,
    next_id: u64,
    rng: R,
    terrain_seen_ready: bool,
}

impl<T: TerrainHeightQuery> AnimalBehaviourController<T, ChaCha8Rng> {
    /// Creates a controller seeded from system entropy.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the behaviour configuration or
    /// the world parameters are out of range.
    pub fn new<W>(terrain: T, world: &W, config: BehaviourConfig) -> Result<Self, ConfigError>
    where
        W: WorldCollaborator + ?Sized,
    {
        Self::with_rng(terrain, world, config, ChaCha8Rng::from_entropy())
    }

    /// Creates a controller with a deterministic random sequence.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the behaviour configuration or
    /// the world parameters are out of range.
    pub fn seeded<W>(
        terrain: T,
        world: &W,
        config: BehaviourConfig,
        seed: u64,
    ) -> Result<Self, ConfigError>
    where
        W: WorldCollaborator + ?Sized,
    {
        Self::with_rng(terrain, world, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<T: TerrainHeightQuery, R: Rng> AnimalBehaviourController<T, R> {
    /// Creates a controller drawing randomness from `rng`.
    ///
    /// Bounds and water level are read from `world` once.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when the behaviour configuration or
    /// the world parameters are out of range.
    pub fn with_rng<W>(
        terrain: T,
        world: &W,
        config: BehaviourConfig,
        rng: R,
    ) -> Result<Self, ConfigError>
    where
        W: WorldCollaborator + ?Sized,
    {
        let params = WorldParams {
            bounds: world.world_bounds(),
            water_level: world.water_level(),
        };
        config.validate()?;
        validate_world(&params)?;
        Ok(Self {
            terrain,
            world: params,
            config,
            animals: AnimalMap::default(),
            next_id: 1,
            rng,
            terrain_seen_ready: false,
        })
    }

    /// Adds an animal in the idle state and returns its handle.
    ///
    /// `speed_seed` in `[0, 1]` selects the animal's base speed within the
    /// configured band; out-of-range seeds are clamped. Positions outside the
    /// world are clamped onto its edge, and when terrain is available the
    /// animal is snapped onto it.
    ///
    /// # Errors
    /// Returns [`RegisterError::NonFinitePosition`] when `position` contains
    /// NaN or infinity.
    pub fn register(&mut self, position: Vec3, speed_seed: f32) -> Result<AnimalId, RegisterError> {
        if !position.is_finite() {
            return Err(RegisterError::NonFinitePosition(position));
        }
        let offset = self.config.ground_offset;
        let inside = self.world.bounds.clamp(planar(position));
        let (placed, ground) = sample_height(&self.terrain, inside).map_or(
            (Vec3::new(inside.x, position.y, inside.y), position.y - offset),
            |height| (Vec3::new(inside.x, height + offset, inside.y), height),
        );
        let speed = self.config.speed.lerp(speed_seed);
        let idle = self.config.idle_timer.sample(&mut self.rng);

        let id = AnimalId::from_raw(self.next_id);
        self.next_id += 1;
        self.animals
            .insert(id, Animal::new(placed, ground, speed, idle));
        debug!("registered {id} at {placed} with speed {speed:.2}");
        Ok(id)
    }

    /// Removes an animal. Unknown handles are ignored.
    ///
    /// Returns whether an animal was removed.
    pub fn unregister(&mut self, id: AnimalId) -> bool {
        let removed = self.animals.remove(&id).is_some();
        if removed {
            debug!("unregistered {id}");
        } else {
            trace!("ignoring unregister of unknown {id}");
        }
        removed
    }

    /// Advances every animal by one tick.
    ///
    /// Non-finite or non-positive deltas are ignored; deltas above the
    /// configured maximum are clamped.
    pub fn update(&mut self, delta_seconds: f32, player_position: Vec3) {
        if !(delta_seconds.is_finite() && delta_seconds > 0.0) {
            trace!("skipping tick with delta {delta_seconds}");
            return;
        }
        let dt = delta_seconds.min(self.config.max_delta);
        let startup = !self.terrain_seen_ready;
        if self.terrain.is_ready() {
            self.terrain_seen_ready = true;
        }

        let mut tick = Tick {
            terrain: &self.terrain,
            config: &self.config,
            bounds: self.world.bounds,
            water_level: self.world.water_level,
            rng: &mut self.rng,
            player: player_position,
            dt,
            startup,
        };
        for (&id, animal) in &mut self.animals {
            tick.advance(id, animal);
        }
    }

    /// Current position of an animal.
    #[must_use]
    pub fn position(&self, id: AnimalId) -> Option<Vec3> {
        self.animals.get(&id).map(|animal| animal.position)
    }

    /// Current heading of an animal in radians; `0` faces +Z.
    #[must_use]
    pub fn heading(&self, id: AnimalId) -> Option<f32> {
        self.animals.get(&id).map(|animal| animal.heading)
    }

    /// Whether `id` refers to a registered animal.
    #[must_use]
    pub fn contains(&self, id: AnimalId) -> bool {
        self.animals.contains_key(&id)
    }

    /// Number of registered animals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animals.len()
    }

    /// Whether no animals are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Handle, position and heading of every animal, in no particular order.
    pub fn poses(&self) -> impl Iterator<Item = (AnimalId, Vec3, f32)> + '_ {
        self.animals
            .iter()
            .map(|(&id, animal)| (id, animal.position, animal.heading))
    }

    /// Number of animals in each state.
    #[must_use]
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for animal in self.animals.values() {
            census.count(&animal.state);
        }
        census
    }

    /// Injected terrain.
    pub const fn terrain(&self) -> &T {
        &self.terrain
    }

    /// Active configuration.
    pub const fn config(&self) -> &BehaviourConfig {
        &self.config
    }

    /// World bounds read at construction.
    pub const fn bounds(&self) -> WorldBounds {
        self.world.bounds
    }

    /// Water level read at construction.
    pub const fn water_level(&self) -> f32 {
        self.world.water_level
    }
}

#[cfg(any(test, feature = "test-support"))]
impl<T: TerrainHeightQuery, R: Rng> AnimalBehaviourController<T, R> {
    /// Current behaviour state of an animal.
    #[must_use]
    pub fn state(&self, id: AnimalId) -> Option<AnimalState> {
        self.animals.get(&id).map(|animal| animal.state)
    }

    /// Base speed of an animal.
    #[must_use]
    pub fn speed(&self, id: AnimalId) -> Option<f32> {
        self.animals.get(&id).map(|animal| animal.speed)
    }

    /// Overrides an animal's state. Returns `false` for unknown handles.
    pub fn set_state(&mut self, id: AnimalId, state: AnimalState) -> bool {
        self.animals
            .get_mut(&id)
            .map(|animal| animal.state = state)
            .is_some()
    }
}
