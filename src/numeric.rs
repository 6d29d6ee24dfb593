//! Numeric helpers used across the project.
//!
//! These guard against non-finite values leaking into entity state and keep
//! angle arithmetic in a single canonical range.

use std::f32::consts::{PI, TAU};

/// Returns `value` when it is finite.
///
/// # Examples
/// ```
/// use fauna::numeric::finite;
/// assert_eq!(finite(1.5), Some(1.5));
/// assert_eq!(finite(f32::NAN), None);
/// assert_eq!(finite(f32::INFINITY), None);
/// ```
#[must_use]
pub fn finite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

/// Wraps an angle into `(-PI, PI]`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Rotates `current` towards `target` along the shortest arc, turning by at
/// most `max_step` radians.
///
/// # Examples
/// ```
/// use fauna::numeric::turn_towards;
/// // Crossing the +/-PI seam takes the short way round.
/// let next = turn_towards(3.0, -3.0, 0.1);
/// assert!((next - 3.1).abs() < 1e-5);
/// ```
#[must_use]
pub fn turn_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let difference = wrap_angle(target - current);
    let step = max_step.max(0.0);
    if difference.abs() <= step {
        wrap_angle(target)
    } else {
        wrap_angle(current + step.copysign(difference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0, 0.0)]
    #[case::full_turn(TAU, 0.0)]
    #[case::past_pi(PI + 0.5, -PI + 0.5)]
    #[case::negative_pi(-PI, PI)]
    #[case::many_turns(5.0 * TAU + 1.0, 1.0)]
    fn wrap_angle_stays_in_range(#[case] input: f32, #[case] expected: f32) {
        assert_relative_eq!(wrap_angle(input), expected, epsilon = 1e-4);
    }

    #[rstest]
    #[case::within_step(0.0, 0.05, 0.1, 0.05)]
    #[case::clamped_positive(0.0, 1.0, 0.1, 0.1)]
    #[case::clamped_negative(0.0, -1.0, 0.1, -0.1)]
    #[case::negative_step_holds(0.5, 1.0, -1.0, 0.5)]
    fn turn_towards_is_bounded(
        #[case] current: f32,
        #[case] target: f32,
        #[case] step: f32,
        #[case] expected: f32,
    ) {
        assert_relative_eq!(turn_towards(current, target, step), expected, epsilon = 1e-5);
    }
}
