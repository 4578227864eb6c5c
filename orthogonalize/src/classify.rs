//! Assignment of ring edges to the axes of the ring.

use crate::angle::turning_angle;
use crate::axis::{Axis, AxisPair};
use crate::config::OrthogonalizeConfig;
use crate::edges::AnalyzedRing;

/// Axis an edge is snapped to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AxisAssignment {
    /// Edge is snapped to axis A.
    AxisA,
    /// Edge is snapped to axis B.
    AxisB,
    /// Edge deviates from both axes more than the skew tolerance and is kept as is.
    Skewed,
}

impl AxisAssignment {
    /// Axis of the assignment, `None` for skewed edges.
    pub fn axis(self) -> Option<Axis> {
        match self {
            AxisAssignment::AxisA => Some(Axis::A),
            AxisAssignment::AxisB => Some(Axis::B),
            AxisAssignment::Skewed => None,
        }
    }

    /// Returns true for skewed edges.
    pub fn is_skewed(self) -> bool {
        self == AxisAssignment::Skewed
    }
}

impl From<Axis> for AxisAssignment {
    fn from(value: Axis) -> Self {
        match value {
            Axis::A => AxisAssignment::AxisA,
            Axis::B => AxisAssignment::AxisB,
        }
    }
}

/// Ring with every edge assigned to an axis or marked as skewed.
#[derive(Debug, Clone)]
pub struct ClassifiedRing {
    ring: AnalyzedRing,
    axes: AxisPair,
    assignments: Vec<AxisAssignment>,
}

impl ClassifiedRing {
    /// The analyzed ring.
    pub fn ring(&self) -> &AnalyzedRing {
        &self.ring
    }

    /// Axis pair of the ring.
    pub fn axes(&self) -> AxisPair {
        self.axes
    }

    /// Assignment of every edge, indexed like [`AnalyzedRing::edges`].
    pub fn assignments(&self) -> &[AxisAssignment] {
        &self.assignments
    }

    /// Number of skewed edges.
    pub fn skewed_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_skewed()).count()
    }
}

/// Assigns the edges of the ring to the axes.
///
/// Every edge first goes to the nearest axis, or is marked skewed if it is further than the skew
/// tolerance from both. Then the turns between consecutive edges are checked, starting from the edge
/// closest to its axis and going around the ring:
/// * a turn outside the configured range is a straight wall drawn with an extra vertex, so the edge
///   gets the axis of the previous edge;
/// * a turn inside the range is a corner, so the edge gets the axis perpendicular to the previous one.
///
/// Skewed edges are never reassigned, and a skewed previous edge imposes nothing on the next one.
pub fn classify(ring: AnalyzedRing, axes: AxisPair, config: &OrthogonalizeConfig) -> ClassifiedRing {
    let tolerance = config.skew_tolerance();
    let (min_turn, max_turn) = config.turn_range();
    let edges = ring.edges();

    let raw: Vec<(AxisAssignment, f64)> = edges
        .iter()
        .map(|edge| {
            let (axis, deviation) = axes.nearest(edge.angle);
            if deviation > tolerance {
                (AxisAssignment::Skewed, deviation)
            } else {
                (axis.into(), deviation)
            }
        })
        .collect();

    let mut assignments: Vec<AxisAssignment> = raw.iter().map(|(a, _)| *a).collect();

    let anchor = raw
        .iter()
        .enumerate()
        .filter(|(_, (a, _))| !a.is_skewed())
        .min_by(|(_, (_, d1)), (_, (_, d2))| d1.total_cmp(d2))
        .map(|(index, _)| index);

    if let Some(anchor) = anchor {
        let count = edges.len();
        for step in 1..count {
            let index = (anchor + step) % count;
            let prev = (index + count - 1) % count;

            let (Some(prev_axis), Some(raw_axis)) = (assignments[prev].axis(), raw[index].0.axis())
            else {
                continue;
            };
            let Some(turn) = turning_angle(&edges[prev].vector, &edges[index].vector) else {
                continue;
            };

            let is_corner = turn >= min_turn && turn <= max_turn;
            let axis = if !is_corner {
                prev_axis
            } else if raw_axis == prev_axis {
                prev_axis.perpendicular()
            } else {
                raw_axis
            };

            assignments[index] = axis.into();
        }
    }

    ClassifiedRing {
        ring,
        axes,
        assignments,
    }
}
