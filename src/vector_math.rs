//! Planar vector helpers.
//! Animals move on the XZ plane; heights come from the terrain.
use glam::{Vec2, Vec3};

/// Projects a world position onto the XZ plane.
///
/// # Examples
/// ```
/// use fauna::vector_math::planar;
/// let p = planar(glam::Vec3::new(1.0, 5.0, -2.0));
/// assert_eq!(p, glam::Vec2::new(1.0, -2.0));
/// ```
#[must_use]
pub const fn planar(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

/// Squared XZ distance between two world positions.
///
/// Used on the per-tick hot path to avoid a square root.
#[must_use]
pub fn planar_distance_squared(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance_squared(planar(b))
}

/// Unit XZ direction from `from` towards `to`.
///
/// Returns `None` when the points coincide on the plane or the input is not
/// finite.
///
/// # Examples
/// ```
/// use fauna::vector_math::planar_direction;
/// use glam::{Vec2, Vec3};
/// let dir = planar_direction(Vec3::ZERO, Vec3::new(3.0, 9.0, 4.0)).unwrap();
/// assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
/// assert!(planar_direction(Vec3::ZERO, Vec3::Y).is_none());
/// ```
#[must_use]
pub fn planar_direction(from: Vec3, to: Vec3) -> Option<Vec2> {
    let delta = planar(to) - planar(from);
    if !delta.is_finite() {
        return None;
    }
    delta.try_normalize()
}

/// Unit XZ vector for a heading angle.
///
/// Headings are yaw angles about +Y where `0` faces +Z, matching
/// [`heading_of`].
#[must_use]
pub fn direction_from_heading(heading: f32) -> Vec2 {
    let (sin, cos) = heading.sin_cos();
    Vec2::new(sin, cos)
}

/// Heading angle of a planar direction.
#[must_use]
pub fn heading_of(direction: Vec2) -> f32 {
    direction.x.atan2(direction.y)
}
