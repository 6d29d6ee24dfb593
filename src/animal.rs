//! Animal records managed by the behaviour controller.
//!
//! Each animal carries its pose, base speed and a tagged [`AnimalState`] so
//! that only the data meaningful to the current state exists.
use std::fmt;

use glam::Vec3;

/// Opaque handle to a registered animal.
///
/// Handles are assigned monotonically and never reused by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimalId(u64);

impl AnimalId {
    /// Wraps a raw handle value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animal#{}", self.0)
    }
}

/// Behaviour state of one animal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimalState {
    /// Standing still until `timer` seconds elapse.
    Idle {
        /// Seconds before the animal reconsiders.
        timer: f32,
    },
    /// Walking towards `target` at base speed.
    Wandering {
        /// Destination.
        target: Vec3,
        /// Seconds before the target is abandoned.
        remaining: f32,
    },
    /// Running towards `target` at boosted speed.
    Fleeing {
        /// Destination away from the threat.
        target: Vec3,
        /// Seconds before the animal calms down.
        timer: f32,
    },
}

impl AnimalState {
    /// Current movement target, if the state has one.
    #[must_use]
    pub const fn target(&self) -> Option<Vec3> {
        match self {
            Self::Idle { .. } => None,
            Self::Wandering { target, .. } | Self::Fleeing { target, .. } => Some(*target),
        }
    }

    /// Whether the animal is idle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle { .. })
    }

    /// Whether the animal is wandering.
    #[must_use]
    pub const fn is_wandering(&self) -> bool {
        matches!(self, Self::Wandering { .. })
    }

    /// Whether the animal is fleeing.
    #[must_use]
    pub const fn is_fleeing(&self) -> bool {
        matches!(self, Self::Fleeing { .. })
    }

    /// Short state name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle { .. } => "idle",
            Self::Wandering { .. } => "wandering",
            Self::Fleeing { .. } => "fleeing",
        }
    }
}

/// Number of animals in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    /// Idle animals.
    pub idle: usize,
    /// Wandering animals.
    pub wandering: usize,
    /// Fleeing animals.
    pub fleeing: usize,
}

impl Census {
    /// Adds one animal in `state`.
    pub const fn count(&mut self, state: &AnimalState) {
        match state {
            AnimalState::Idle { .. } => self.idle += 1,
            AnimalState::Wandering { .. } => self.wandering += 1,
            AnimalState::Fleeing { .. } => self.fleeing += 1,
        }
    }

    /// Total animals counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.idle + self.wandering + self.fleeing
    }
}

/// One managed animal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Animal {
    pub(crate) position: Vec3,
    pub(crate) heading: f32,
    pub(crate) state: AnimalState,
    pub(crate) speed: f32,
    /// Last valid terrain height below the animal.
    pub(crate) ground: f32,
}

impl Animal {
    pub(crate) const fn new(position: Vec3, ground: f32, speed: f32, idle_timer: f32) -> Self {
        Self {
            position,
            heading: 0.0,
            state: AnimalState::Idle { timer: idle_timer },
            speed,
            ground,
        }
    }
}
