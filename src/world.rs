//! World parameters supplied to the behaviour controller.
//!
//! The world owns bounds and water level; the controller only reads them.
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{WATER_LEVEL, WORLD_HALF_EXTENT};

/// Square world bounds centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Distance from the origin to each edge on both axes.
    pub half_extent: f32,
}

impl WorldBounds {
    /// Creates bounds with the given half-extent.
    #[must_use]
    pub const fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    /// Clamps a planar point into the bounds.
    ///
    /// # Examples
    /// ```
    /// use fauna::world::WorldBounds;
    /// use glam::Vec2;
    /// let bounds = WorldBounds::new(10.0);
    /// assert_eq!(bounds.clamp(Vec2::new(15.0, -12.0)), Vec2::new(10.0, -10.0));
    /// ```
    #[must_use]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        let extent = Vec2::splat(self.half_extent);
        point.clamp(-extent, extent)
    }

    /// Whether a planar point lies inside the bounds, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.abs().cmple(Vec2::splat(self.half_extent)).all()
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(WORLD_HALF_EXTENT)
    }
}

/// Source of world-level parameters.
pub trait WorldCollaborator {
    /// Bounds animals must stay within.
    fn world_bounds(&self) -> WorldBounds;

    /// Height below which terrain is water.
    fn water_level(&self) -> f32;
}

/// Plain-data world parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    /// World bounds.
    pub bounds: WorldBounds,
    /// Water level.
    pub water_level: f32,
}

impl WorldParams {
    /// Creates world parameters from a half-extent and water level.
    #[must_use]
    pub const fn new(half_extent: f32, water_level: f32) -> Self {
        Self {
            bounds: WorldBounds::new(half_extent),
            water_level,
        }
    }
}

impl Default for WorldParams {
    fn default() -> Self {
        Self::new(WORLD_HALF_EXTENT, WATER_LEVEL)
    }
}

impl WorldCollaborator for WorldParams {
    fn world_bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn water_level(&self) -> f32 {
        self.water_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::inside(Vec2::new(3.0, -4.0), true)]
    #[case::edge(Vec2::new(10.0, -10.0), true)]
    #[case::outside_x(Vec2::new(10.5, 0.0), false)]
    #[case::outside_z(Vec2::new(0.0, -11.0), false)]
    fn contains_checks_both_axes(#[case] point: Vec2, #[case] expected: bool) {
        assert_eq!(WorldBounds::new(10.0).contains(point), expected);
    }

    #[test]
    fn clamped_points_are_contained() {
        let bounds = WorldBounds::new(5.0);
        let clamped = bounds.clamp(Vec2::new(-40.0, 7.0));
        assert!(bounds.contains(clamped));
    }
}
