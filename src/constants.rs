//! Default behaviour tunables.
//!
//! These seed [`BehaviourConfig::default`](crate::config::BehaviourConfig) and
//! can be overridden through configuration files or the environment.

/// Planar radius around the player inside which animals bolt.
pub const FLEE_TRIGGER_RADIUS: f32 = 15.0;
/// Shortest distance an animal plans to flee.
pub const FLEE_DISTANCE_MIN: f32 = 20.0;
/// Longest distance an animal plans to flee.
pub const FLEE_DISTANCE_MAX: f32 = 30.0;
/// Speed boost applied while fleeing.
pub const FLEE_SPEED_MULTIPLIER: f32 = 1.5;
/// Minimum seconds spent fleeing.
pub const FLEE_TIMER_MIN: f32 = 8.0;
/// Maximum seconds spent fleeing.
pub const FLEE_TIMER_MAX: f32 = 12.0;
/// Extra idle seconds added after a flight ends.
pub const FLEE_RECOVERY_BONUS: f32 = 2.0;

/// Minimum seconds an animal stays idle.
pub const IDLE_TIMER_MIN: f32 = 2.0;
/// Maximum seconds an animal stays idle.
pub const IDLE_TIMER_MAX: f32 = 6.0;
/// Short idle pause after a rejected move or target.
pub const RETRY_IDLE_MIN: f32 = 0.5;
/// Upper bound of the short retry pause.
pub const RETRY_IDLE_MAX: f32 = 1.5;
/// Per-tick probability that an idle animal looks around.
pub const LOOK_AROUND_CHANCE: f64 = 0.01;
/// Largest heading nudge in radians for a look around.
pub const LOOK_AROUND_MAX_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

/// Probability that an expired idle timer leads to wandering. Lower values
/// let idle spells chain.
pub const WANDER_CHANCE: f64 = 1.0;
/// Furthest a wander target may lie from the animal.
pub const WANDER_RADIUS: f32 = 15.0;
/// Seconds before an animal gives up on an unreached wander target.
pub const WANDER_TIMEOUT: f32 = 15.0;
/// Squared planar distance at which a target counts as reached.
pub const ARRIVE_EPSILON_SQ: f32 = 1.0;

/// Slowest base speed in units per second.
pub const SPEED_MIN: f32 = 2.0;
/// Fastest base speed in units per second.
pub const SPEED_MAX: f32 = 4.0;
/// Largest height change an animal may take in a single step.
pub const MAX_CLIMB: f32 = 0.5;
/// Heading turn rate in radians per second.
pub const TURN_RATE: f32 = 4.0;
/// Height kept between terrain and an animal's position.
pub const GROUND_OFFSET: f32 = 0.1;
/// Longest tick accepted; larger deltas are clamped.
pub const MAX_DELTA: f32 = 0.25;

/// Default half-extent of the square world.
pub const WORLD_HALF_EXTENT: f32 = 100.0;
/// Default water level.
pub const WATER_LEVEL: f32 = 0.0;
