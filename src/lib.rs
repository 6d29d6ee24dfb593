#![cfg_attr(docsrs, feature(doc_cfg))]
//! Terrain-aware animal behaviour for survival games.
//!
//! Animals idle, wander and flee from the player across a height-field
//! terrain while refusing to enter water or climb steep ground. The
//! [`AnimalBehaviourController`] owns the population; terrain and world
//! parameters are injected collaborators.
pub mod animal;
pub mod behaviour;
pub mod config;
pub mod constants;
pub mod logging;
pub mod numeric;
pub mod plugin;
pub mod spawn;
pub mod terrain;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use animal::{AnimalId, AnimalState, Census};
pub use behaviour::{AnimalBehaviourController, RegisterError};
pub use config::{Band, BehaviourConfig, ConfigError, FaunaConfig};
pub use logging::init as init_logging;
pub use plugin::{AnimalBehaviourPlugin, AnimalHandle, Herd, Player};
pub use spawn::{populate, SpawnError, SpawnRules};
pub use terrain::{sample_height, FlatTerrain, Heightmap, TerrainHeightQuery};
pub use vector_math::{planar, planar_direction, planar_distance_squared};
pub use world::{WorldBounds, WorldCollaborator, WorldParams};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use fauna::prelude::*;
    //! ```

    pub use crate::AnimalBehaviourController;
    pub use crate::AnimalId;
    pub use crate::AnimalState;
    pub use crate::BehaviourConfig;
    pub use crate::FlatTerrain;
    pub use crate::TerrainHeightQuery;
    pub use crate::WorldCollaborator;
    pub use crate::WorldParams;
}
