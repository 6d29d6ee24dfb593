//! Behaviour configuration.
//!
//! [`BehaviourConfig`] gathers every tunable of the animal state machine.
//! [`FaunaConfig`] pairs it with [`WorldParams`] and layers defaults, an
//! optional TOML file and `FAUNA_` environment variables via `figment`.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::WorldParams;
use crate::{
    ARRIVE_EPSILON_SQ, FLEE_DISTANCE_MAX, FLEE_DISTANCE_MIN, FLEE_RECOVERY_BONUS,
    FLEE_SPEED_MULTIPLIER, FLEE_TIMER_MAX, FLEE_TIMER_MIN, FLEE_TRIGGER_RADIUS, GROUND_OFFSET,
    IDLE_TIMER_MAX, IDLE_TIMER_MIN, LOOK_AROUND_CHANCE, LOOK_AROUND_MAX_ANGLE, MAX_CLIMB,
    MAX_DELTA, RETRY_IDLE_MAX, RETRY_IDLE_MIN, SPEED_MAX, SPEED_MIN, TURN_RATE, WANDER_CHANCE,
    WANDER_RADIUS, WANDER_TIMEOUT,
};

/// Prefix for environment overrides, e.g. `FAUNA_BEHAVIOUR__WANDER_RADIUS`.
pub const ENV_PREFIX: &str = "FAUNA_";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or the merged data did not deserialise.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    /// A value is outside its permitted range.
    #[error("invalid configuration value `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Closed interval `[min, max]` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Band {
    /// Creates a band.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draws a value uniformly from the band.
    ///
    /// # Examples
    /// ```
    /// use fauna::config::Band;
    /// use rand::SeedableRng;
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
    /// let value = Band::new(2.0, 6.0).sample(&mut rng);
    /// assert!((2.0..=6.0).contains(&value));
    /// assert_eq!(Band::new(3.0, 3.0).sample(&mut rng), 3.0);
    /// ```
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    /// Linear interpolation across the band; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, t: f32) -> f32 {
        let clamped = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
        self.min + (self.max - self.min) * clamped
    }

    fn validate(&self, field: &'static str, allow_zero: bool) -> Result<(), ConfigError> {
        let lower_ok = if allow_zero {
            self.min >= 0.0
        } else {
            self.min > 0.0
        };
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(ConfigError::Invalid {
                field,
                reason: "bounds must be finite",
            });
        }
        if !lower_ok {
            return Err(ConfigError::Invalid {
                field,
                reason: "lower bound is out of range",
            });
        }
        if self.max < self.min {
            return Err(ConfigError::Invalid {
                field,
                reason: "max is below min",
            });
        }
        Ok(())
    }
}

/// Tunables for the animal state machine and movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviourConfig {
    /// Planar radius around the player that triggers fleeing.
    pub flee_trigger_radius: f32,
    /// Planned flee distance.
    pub flee_distance: Band,
    /// Multiplier applied to base speed while fleeing.
    pub flee_speed_multiplier: f32,
    /// Seconds spent fleeing.
    pub flee_timer: Band,
    /// Extra idle seconds after fleeing ends.
    pub flee_recovery_bonus: f32,
    /// Seconds spent idle.
    pub idle_timer: Band,
    /// Idle seconds after a rejected target or move.
    pub retry_idle: Band,
    /// Per-tick probability of an idle look around.
    pub look_around_chance: f64,
    /// Largest heading nudge for a look around.
    pub look_around_max_angle: f32,
    /// Probability that an expired idle timer starts a wander.
    pub wander_chance: f64,
    /// Furthest wander target distance.
    pub wander_radius: f32,
    /// Seconds before an unreached wander target is abandoned.
    pub wander_timeout: f32,
    /// Squared planar distance that counts as reaching a target.
    pub arrive_epsilon_sq: f32,
    /// Base speed band mapped from each animal's speed seed.
    pub speed: Band,
    /// Largest per-step height change an animal can climb or descend.
    pub max_climb: f32,
    /// Heading turn rate in radians per second.
    pub turn_rate: f32,
    /// Height kept between terrain and animal position.
    pub ground_offset: f32,
    /// Longest accepted tick in seconds.
    pub max_delta: f32,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            flee_trigger_radius: FLEE_TRIGGER_RADIUS,
            flee_distance: Band::new(FLEE_DISTANCE_MIN, FLEE_DISTANCE_MAX),
            flee_speed_multiplier: FLEE_SPEED_MULTIPLIER,
            flee_timer: Band::new(FLEE_TIMER_MIN, FLEE_TIMER_MAX),
            flee_recovery_bonus: FLEE_RECOVERY_BONUS,
            idle_timer: Band::new(IDLE_TIMER_MIN, IDLE_TIMER_MAX),
            retry_idle: Band::new(RETRY_IDLE_MIN, RETRY_IDLE_MAX),
            look_around_chance: LOOK_AROUND_CHANCE,
            look_around_max_angle: LOOK_AROUND_MAX_ANGLE,
            wander_chance: WANDER_CHANCE,
            wander_radius: WANDER_RADIUS,
            wander_timeout: WANDER_TIMEOUT,
            arrive_epsilon_sq: ARRIVE_EPSILON_SQ,
            speed: Band::new(SPEED_MIN, SPEED_MAX),
            max_climb: MAX_CLIMB,
            turn_rate: TURN_RATE,
            ground_offset: GROUND_OFFSET,
            max_delta: MAX_DELTA,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite and positive",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite and non-negative",
        })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must lie within [0, 1]",
        })
    }
}

impl BehaviourConfig {
    /// Checks every value is usable by the controller.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("flee_trigger_radius", self.flee_trigger_radius)?;
        self.flee_distance.validate("flee_distance", false)?;
        positive("flee_speed_multiplier", self.flee_speed_multiplier)?;
        self.flee_timer.validate("flee_timer", false)?;
        non_negative("flee_recovery_bonus", self.flee_recovery_bonus)?;
        self.idle_timer.validate("idle_timer", true)?;
        self.retry_idle.validate("retry_idle", true)?;
        probability("look_around_chance", self.look_around_chance)?;
        non_negative("look_around_max_angle", self.look_around_max_angle)?;
        probability("wander_chance", self.wander_chance)?;
        positive("wander_radius", self.wander_radius)?;
        positive("wander_timeout", self.wander_timeout)?;
        positive("arrive_epsilon_sq", self.arrive_epsilon_sq)?;
        self.speed.validate("speed", false)?;
        non_negative("max_climb", self.max_climb)?;
        positive("turn_rate", self.turn_rate)?;
        non_negative("ground_offset", self.ground_offset)?;
        positive("max_delta", self.max_delta)?;
        Ok(())
    }

    /// Squared flee trigger radius compared against squared distances.
    #[must_use]
    pub fn flee_trigger_radius_sq(&self) -> f32 {
        self.flee_trigger_radius * self.flee_trigger_radius
    }
}

/// Complete configuration: behaviour tunables plus world parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaunaConfig {
    /// State machine tunables.
    pub behaviour: BehaviourConfig,
    /// World bounds and water level.
    pub world: WorldParams,
}

impl FaunaConfig {
    /// Loads configuration from defaults, an optional TOML file and the
    /// environment, in increasing precedence.
    ///
    /// Nested keys are separated by `__` in variable names, so
    /// `FAUNA_WORLD__WATER_LEVEL=1.5` overrides `world.water_level`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a provider fails or the merged data
    /// does not match the schema, and [`ConfigError::Invalid`] when a value is
    /// out of range.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = path {
            figment = figment.merge(Toml::file_exact(file));
        }
        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates behaviour tunables and world parameters.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.behaviour.validate()?;
        validate_world(&self.world)
    }
}

/// Validates world parameters.
///
/// # Errors
/// Returns [`ConfigError::Invalid`] when the half-extent is not positive or
/// the water level is not finite.
pub fn validate_world(world: &WorldParams) -> Result<(), ConfigError> {
    positive("world.bounds.half_extent", world.bounds.half_extent)?;
    if world.water_level.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: "world.water_level",
            reason: "must be finite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        assert!(FaunaConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case::zero_radius(BehaviourConfig { flee_trigger_radius: 0.0, ..BehaviourConfig::default() }, "flee_trigger_radius")]
    #[case::inverted_band(BehaviourConfig { idle_timer: Band::new(5.0, 1.0), ..BehaviourConfig::default() }, "idle_timer")]
    #[case::bad_probability(BehaviourConfig { wander_chance: 1.5, ..BehaviourConfig::default() }, "wander_chance")]
    #[case::nan_speed(BehaviourConfig { speed: Band::new(f32::NAN, 2.0), ..BehaviourConfig::default() }, "speed")]
    #[case::zero_speed(BehaviourConfig { speed: Band::new(0.0, 2.0), ..BehaviourConfig::default() }, "speed")]
    fn validate_names_offending_field(#[case] config: BehaviourConfig, #[case] expected: &str) {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }

    #[rstest]
    #[case::low(-1.0, 2.0)]
    #[case::high(7.0, 4.0)]
    #[case::mid(0.5, 3.0)]
    #[case::nan(f32::NAN, 3.0)]
    fn lerp_clamps_seed(#[case] t: f32, #[case] expected: f32) {
        assert!((Band::new(2.0, 4.0).lerp(t) - expected).abs() < 1e-6);
    }

    #[test]
    fn negative_world_extent_is_rejected() {
        let world = WorldParams::new(-1.0, 0.0);
        assert!(matches!(
            validate_world(&world),
            Err(ConfigError::Invalid { field: "world.bounds.half_extent", .. })
        ));
    }
}
