//! Terrain height queries consumed by the behaviour controller.
//!
//! The controller never owns terrain; hosts inject any type implementing
//! [`TerrainHeightQuery`]. Two simple implementations are provided for hosts
//! and tests: [`FlatTerrain`] and the grid-backed [`Heightmap`].

use std::sync::Arc;

use glam::Vec2;

use crate::numeric::finite;

/// Read-only source of ground heights.
///
/// Implementations must be pure with respect to world state at call time.
pub trait TerrainHeightQuery {
    /// Whether height queries are currently meaningful.
    fn is_ready(&self) -> bool;

    /// Ground height at a planar coordinate, or `None` when unavailable.
    fn height_at(&self, x: f32, z: f32) -> Option<f32>;
}

impl<T: TerrainHeightQuery + ?Sized> TerrainHeightQuery for &T {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        (**self).height_at(x, z)
    }
}

impl<T: TerrainHeightQuery + ?Sized> TerrainHeightQuery for Box<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        (**self).height_at(x, z)
    }
}

impl<T: TerrainHeightQuery + ?Sized> TerrainHeightQuery for Arc<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        (**self).height_at(x, z)
    }
}

/// Samples terrain height, folding every failure mode into `None`.
///
/// A query against terrain that is not ready, a missing result, and a
/// non-finite result are indistinguishable to callers.
pub fn sample_height<T: TerrainHeightQuery + ?Sized>(terrain: &T, point: Vec2) -> Option<f32> {
    if !terrain.is_ready() || !point.is_finite() {
        return None;
    }
    terrain.height_at(point.x, point.y).and_then(finite)
}

/// Terrain with the same height everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTerrain {
    /// Ground height.
    pub height: f32,
}

impl FlatTerrain {
    /// Creates flat terrain at `height`.
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self { height }
    }
}

impl TerrainHeightQuery for FlatTerrain {
    fn is_ready(&self) -> bool {
        true
    }

    fn height_at(&self, _x: f32, _z: f32) -> Option<f32> {
        Some(self.height)
    }
}

/// Regular grid of height samples centred on the origin.
///
/// Heights between samples are bilinearly interpolated. Queries outside the
/// grid report `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    resolution: usize,
    half_extent: f32,
    spacing: f32,
    heights: Vec<f32>,
}

impl Heightmap {
    /// Builds a `resolution` × `resolution` grid spanning
    /// `[-half_extent, half_extent]` on both axes, sampling `f(x, z)` at every
    /// vertex.
    ///
    /// Returns `None` when the grid would be degenerate (fewer than two
    /// samples per axis or a non-positive extent).
    ///
    /// # Examples
    /// ```
    /// use fauna::terrain::{Heightmap, TerrainHeightQuery};
    /// let map = Heightmap::from_fn(3, 1.0, |x, _z| x).unwrap();
    /// let h = map.height_at(0.5, 0.0).unwrap();
    /// assert!((h - 0.5).abs() < 1e-6);
    /// assert!(map.height_at(2.0, 0.0).is_none());
    /// ```
    pub fn from_fn(
        resolution: usize,
        half_extent: f32,
        mut f: impl FnMut(f32, f32) -> f32,
    ) -> Option<Self> {
        if resolution < 2 || !(half_extent.is_finite() && half_extent > 0.0) {
            return None;
        }
        let cells = f32::from(u16::try_from(resolution - 1).ok()?);
        let spacing = 2.0 * half_extent / cells;
        let mut heights = Vec::with_capacity(resolution * resolution);
        let mut row = -half_extent;
        for _ in 0..resolution {
            let mut column = -half_extent;
            for _ in 0..resolution {
                heights.push(f(column, row));
                column += spacing;
            }
            row += spacing;
        }
        Some(Self {
            resolution,
            half_extent,
            spacing,
            heights,
        })
    }

    /// Half-extent covered by the grid.
    #[must_use]
    pub const fn half_extent(&self) -> f32 {
        self.half_extent
    }

    fn sample(&self, column: usize, row: usize) -> Option<f32> {
        self.heights.get(row * self.resolution + column).copied()
    }

    /// Converts a world coordinate into a cell index and the fractional
    /// offset within that cell.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The coordinate is validated to lie inside the grid before the cast."
    )]
    fn locate(&self, coordinate: f32) -> Option<(usize, f32)> {
        let local = (coordinate + self.half_extent) / self.spacing;
        let last = self.resolution - 1;
        if !local.is_finite() || local < 0.0 || local > f32::from(u16::try_from(last).ok()?) {
            return None;
        }
        let cell = (local.floor() as usize).min(last - 1);
        #[expect(
            clippy::cast_precision_loss,
            reason = "Cell indices are bounded by a u16 resolution."
        )]
        let fraction = local - cell as f32;
        Some((cell, fraction))
    }
}

impl TerrainHeightQuery for Heightmap {
    fn is_ready(&self) -> bool {
        true
    }

    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let (column, fx) = self.locate(x)?;
        let (row, fz) = self.locate(z)?;
        let h00 = self.sample(column, row)?;
        let h10 = self.sample(column + 1, row)?;
        let h01 = self.sample(column, row + 1)?;
        let h11 = self.sample(column + 1, row + 1)?;
        let near = h00 + (h10 - h00) * fx;
        let far = h01 + (h11 - h01) * fx;
        Some(near + (far - near) * fz)
    }
}
