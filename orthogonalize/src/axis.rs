//! Estimation of the orthogonal axis pair of a ring.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;

use crate::angle::{
    cardinal_deviation, direction, line_difference, normalize_half_turn, normalize_quarter_turn,
};
use crate::config::{AxisMethod, OrthogonalizeConfig};
use crate::edges::{AnalyzedRing, Edge};

/// One of the two axes of an [`AxisPair`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The reference axis.
    A,
    /// The axis perpendicular to [`Axis::A`].
    B,
}

impl Axis {
    /// The other axis of the pair.
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::A => Axis::B,
            Axis::B => Axis::A,
        }
    }
}

/// Two perpendicular line directions used as the reference grid of a ring.
///
/// Axis A is stored normalized into `[0, π/2)`, axis B is always exactly `A + π/2`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisPair {
    a: f64,
}

impl AxisPair {
    /// Creates an axis pair with axis A at `angle` (radians, any value).
    pub fn new(angle: f64) -> Self {
        Self {
            a: normalize_quarter_turn(angle),
        }
    }

    /// Line angle of the given axis in `[0, π)`.
    pub fn angle(&self, axis: Axis) -> f64 {
        match axis {
            Axis::A => self.a,
            Axis::B => normalize_half_turn(self.a + FRAC_PI_2),
        }
    }

    /// Unit direction vector of the given axis.
    ///
    /// Axis B is obtained by rotating axis A by 90°, so the two directions are exactly perpendicular.
    pub fn direction(&self, axis: Axis) -> Vector2<f64> {
        let a = direction(self.a);
        match axis {
            Axis::A => a,
            Axis::B => Vector2::new(-a.y, a.x),
        }
    }

    /// Unsigned deviation of a line angle from the given axis, in `[0, π/2]`.
    pub fn deviation(&self, angle: f64, axis: Axis) -> f64 {
        line_difference(angle, self.angle(axis))
    }

    /// Axis closest to the line angle and the deviation from it.
    pub fn nearest(&self, angle: f64) -> (Axis, f64) {
        let dev_a = self.deviation(angle, Axis::A);
        let dev_b = self.deviation(angle, Axis::B);
        if dev_a <= dev_b {
            (Axis::A, dev_a)
        } else {
            (Axis::B, dev_b)
        }
    }
}

/// Estimates the axis pair of a ring.
///
/// The first estimate uses every edge. It is then recomputed once from the edges that lie within the
/// skew tolerance of the first estimate, so deliberately skewed walls do not tilt the grid of the
/// remaining ones.
pub fn estimate(ring: &AnalyzedRing, config: &OrthogonalizeConfig) -> AxisPair {
    let edges = ring.edges();
    let first = AxisPair::new(axis_angle(edges.iter(), config.axis_method).unwrap_or(0.0));

    let tolerance = config.skew_tolerance();
    let inliers: Vec<&Edge> = edges
        .iter()
        .filter(|e| first.nearest(e.angle).1 <= tolerance)
        .collect();

    let refined = if inliers.is_empty() || inliers.len() == edges.len() {
        first
    } else {
        axis_angle(inliers.into_iter(), config.axis_method)
            .map(AxisPair::new)
            .unwrap_or(first)
    };

    let snap = config.cardinal_snap();
    if snap > 0.0 && cardinal_deviation(refined.a).abs() <= snap {
        AxisPair::new(0.0)
    } else {
        refined
    }
}

fn axis_angle<'a>(edges: impl Iterator<Item = &'a Edge>, method: AxisMethod) -> Option<f64> {
    match method {
        AxisMethod::WeightedMean => weighted_mean(edges),
        AxisMethod::Median => median(edges),
    }
}

/// Length-weighted circular mean of the edge angles with a period of 90°.
///
/// Quadrupling the angles maps the 90° period onto the full circle, so angles close to 0° and close
/// to 90° average to 0° instead of 45°.
fn weighted_mean<'a>(edges: impl Iterator<Item = &'a Edge>) -> Option<f64> {
    let mut sin_sum = 0.0;
    let mut cos_sum = 0.0;
    let mut weight_sum = 0.0;
    let mut longest: Option<&Edge> = None;

    for edge in edges {
        let quad = 4.0 * edge.angle;
        sin_sum += edge.length * quad.sin();
        cos_sum += edge.length * quad.cos();
        weight_sum += edge.length;

        if longest.map_or(true, |l| edge.length > l.length) {
            longest = Some(edge);
        }
    }

    if weight_sum <= 0.0 {
        return None;
    }

    // Edges cancel each other out (e.g. a regular octagon); the longest wall decides.
    if sin_sum.hypot(cos_sum) <= 1e-9 * weight_sum {
        return longest.map(|e| e.angle);
    }

    Some(sin_sum.atan2(cos_sum) / 4.0)
}

/// Median of the signed deviations of the edges from the nearest world axis.
fn median<'a>(edges: impl Iterator<Item = &'a Edge>) -> Option<f64> {
    let mut deviations: Vec<f64> = edges.map(|e| cardinal_deviation(e.angle)).collect();
    if deviations.is_empty() {
        return None;
    }

    deviations.sort_by(f64::total_cmp);
    let mid = deviations.len() / 2;
    if deviations.len() % 2 == 0 {
        Some((deviations[mid - 1] + deviations[mid]) / 2.0)
    } else {
        Some(deviations[mid])
    }
}
