//! Shared fixtures for `fauna` integration tests.
//!
//! Stub terrains here are `Send + Sync` so they can back a Bevy resource or an
//! rspec environment.
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use fauna::{AnimalBehaviourController, BehaviourConfig, TerrainHeightQuery, WorldParams};
use glam::Vec3;

/// Far enough from every test animal to never trigger a flight.
pub const FAR_AWAY: Vec3 = Vec3::new(1_000.0, 0.0, 1_000.0);

type HeightFn = dyn Fn(f32, f32) -> Option<f32> + Send + Sync;

/// Terrain answering from a closure, with a switchable readiness flag.
pub struct StubTerrain {
    ready: AtomicBool,
    height: Box<HeightFn>,
}

impl StubTerrain {
    /// Terrain whose heights come from `height`.
    pub fn new(height: impl Fn(f32, f32) -> Option<f32> + Send + Sync + 'static) -> Self {
        Self {
            ready: AtomicBool::new(true),
            height: Box::new(height),
        }
    }

    /// Flat terrain at `height`.
    pub fn flat(height: f32) -> Self {
        Self::new(move |_, _| Some(height))
    }

    /// Flips the readiness flag.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for StubTerrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubTerrain")
            .field("ready", &self.ready.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl TerrainHeightQuery for StubTerrain {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        (self.height)(x, z)
    }
}

/// Terrain that misbehaves on a fixed rhythm.
///
/// Every `fail_every`-th query returns `None` and every `nan_every`-th returns
/// NaN; all other queries report a gentle slope along X.
#[derive(Debug)]
pub struct FlakyTerrain {
    calls: AtomicU32,
    fail_every: u32,
    nan_every: u32,
}

impl FlakyTerrain {
    /// Creates flaky terrain; zero disables the corresponding failure.
    pub const fn new(fail_every: u32, nan_every: u32) -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_every,
            nan_every,
        }
    }
}

impl TerrainHeightQuery for FlakyTerrain {
    fn is_ready(&self) -> bool {
        true
    }

    fn height_at(&self, x: f32, _z: f32) -> Option<f32> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_every > 0 && call % self.fail_every == 0 {
            None
        } else if self.nan_every > 0 && call % self.nan_every == 0 {
            Some(f32::NAN)
        } else {
            Some(x * 0.02)
        }
    }
}

/// Default behaviour with the random idle flavour removed and wandering
/// guaranteed whenever an idle timer expires.
pub fn calm_config() -> BehaviourConfig {
    BehaviourConfig {
        wander_chance: 1.0,
        look_around_chance: 0.0,
        ..BehaviourConfig::default()
    }
}

/// Seeded controller over `terrain` using [`calm_config`].
///
/// # Panics
/// Panics if `world` is invalid.
pub fn herd<T: TerrainHeightQuery>(terrain: T, world: WorldParams) -> AnimalBehaviourController<T> {
    AnimalBehaviourController::seeded(terrain, &world, calm_config(), 0x5eed)
        .unwrap_or_else(|e| panic!("test controller rejected configuration: {e}"))
}
