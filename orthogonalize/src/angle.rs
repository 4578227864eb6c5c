//! Angle utilities. All angles are in radians.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use nalgebra::Vector2;

const WRAP_EPSILON: f64 = 1e-12;

/// Normalizes a line direction into `[0, π)`. A direction and its opposite give the same value.
#[inline]
pub fn normalize_half_turn(angle: f64) -> f64 {
    wrap(angle, PI)
}

/// Normalizes an angle into `[0, π/2)`, the period of an orthogonal grid.
#[inline]
pub fn normalize_quarter_turn(angle: f64) -> f64 {
    wrap(angle, FRAC_PI_2)
}

fn wrap(angle: f64, period: f64) -> f64 {
    let norm = angle.rem_euclid(period);
    if norm >= period - WRAP_EPSILON {
        0.0
    } else {
        norm
    }
}

/// Direction of a vector as a line angle in `[0, π)`.
#[inline]
pub fn line_angle(v: &Vector2<f64>) -> f64 {
    normalize_half_turn(v.y.atan2(v.x))
}

/// Smallest unsigned difference between two line directions, treating opposite directions as equal.
/// Returns a value in `[0, π/2]`.
#[inline]
pub fn line_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Signed deviation of a line direction from the nearest world axis, in `[-π/4, π/4)`.
#[inline]
pub fn cardinal_deviation(angle: f64) -> f64 {
    let quarter = normalize_quarter_turn(angle);
    if quarter >= FRAC_PI_4 {
        quarter - FRAC_PI_2
    } else {
        quarter
    }
}

/// Unsigned angle by which the direction changes when going along `a` and then along `b`. Zero for
/// a straight continuation, `π/2` for a square corner, `π` for a reversal. Returns `None` for zero
/// length vectors.
#[inline]
pub fn turning_angle(a: &Vector2<f64>, b: &Vector2<f64>) -> Option<f64> {
    let norm = a.norm() * b.norm();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }

    Some((a.dot(b) / norm).clamp(-1.0, 1.0).acos())
}

/// Unit vector pointing in the `angle` direction.
#[inline]
pub fn direction(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), angle.sin())
}
