//! Validation of reconstructed rings and recombination of rings into polygons.

use orthogonalize_types::cartesian::{
    CartesianClosedContour, CartesianPoint2d, CartesianPoint2dFloat, NewCartesianPoint2d, Point2,
};
use orthogonalize_types::impls::{ClosedContour, Polygon};

use crate::config::OrthogonalizeConfig;
use crate::error::RingError;
use crate::reconstruct::ReconstructedRing;

/// Reconstructed rings with area below this fraction of the input area are collapsed.
const COLLAPSE_RATIO: f64 = 1e-6;
/// Edges closer to antiparallel than this (sine of the angle) double back at their shared vertex.
const SPIKE_EPSILON: f64 = 1e-9;

/// Final state of a single ring.
#[derive(Debug, Clone, PartialEq)]
pub enum RingOutcome<P> {
    /// The ring was orthogonalized.
    Assembled(ClosedContour<P>),
    /// The ring could not be orthogonalized and is returned unchanged.
    Rejected {
        /// Copy of the input ring.
        original: ClosedContour<P>,
        /// Reason of the rejection.
        error: RingError,
    },
}

impl<P> RingOutcome<P> {
    /// Returns true if the ring was orthogonalized.
    pub fn is_assembled(&self) -> bool {
        matches!(self, RingOutcome::Assembled(_))
    }

    /// Reason of the rejection, if the ring was rejected.
    pub fn error(&self) -> Option<&RingError> {
        match self {
            RingOutcome::Assembled(_) => None,
            RingOutcome::Rejected { error, .. } => Some(error),
        }
    }

    /// The ring to put into the output geometry.
    pub fn into_ring(self) -> ClosedContour<P> {
        match self {
            RingOutcome::Assembled(ring) => ring,
            RingOutcome::Rejected { original, .. } => original,
        }
    }
}

/// Position of a ring inside a polygon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RingRole {
    /// Outer boundary.
    Exterior,
    /// Hole with the given index.
    Interior(usize),
}

/// Report of a ring that was returned unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RingDiagnostic {
    /// Index of the polygon in a multipolygon, `0` for a single polygon.
    pub part: usize,
    /// Which ring of the polygon.
    pub role: RingRole,
    /// Why the ring was not orthogonalized.
    pub error: RingError,
}

/// Output geometry together with reports about the rings that were left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Orthogonalized<G> {
    /// Geometry with the same structure as the input.
    pub geometry: G,
    /// One entry per rejected ring, in input order.
    pub diagnostics: Vec<RingDiagnostic>,
}

impl<G> Orthogonalized<G> {
    /// Returns true if every ring was orthogonalized.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Converts the geometry keeping the diagnostics.
    pub fn map<T>(self, f: impl FnOnce(G) -> T) -> Orthogonalized<T> {
        Orthogonalized {
            geometry: f(self.geometry),
            diagnostics: self.diagnostics,
        }
    }
}

/// Closes and validates a reconstructed ring.
///
/// The ring is accepted if it has enough vertices, all of them finite, encloses a non-negligible
/// area with the same winding as the input ring and never doubles back on itself.
pub fn assemble<P>(
    reconstructed: &ReconstructedRing,
    config: &OrthogonalizeConfig,
) -> Result<ClosedContour<P>, RingError>
where
    P: NewCartesianPoint2d<f64>,
{
    let vertices = reconstructed.vertices();
    if vertices.len() < config.min_ring_vertices {
        return Err(RingError::Degenerate {
            vertices: vertices.len(),
            required: config.min_ring_vertices,
        });
    }

    if let Some(vertex) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(RingError::SingularIntersection { vertex });
    }

    let input = reconstructed.classified().ring();
    let output = ClosedContour::<Point2>::new(vertices.to_vec());
    let area = output.area_signed();
    if !area.is_finite() || area.abs() < COLLAPSE_RATIO * input.area().abs() {
        return Err(RingError::Collapsed { area });
    }

    if output.winding() != input.contour().winding() {
        return Err(RingError::WindingFlipped);
    }

    if let Some(vertex) = find_spike(vertices) {
        return Err(RingError::Spike { vertex });
    }

    Ok(ClosedContour::new(
        output.points.iter().map(|v| P::new(v.x(), v.y())).collect(),
    ))
}

/// First vertex where the ring turns back along the line it came from.
fn find_spike(vertices: &[Point2]) -> Option<usize> {
    let count = vertices.len();
    if count < 3 {
        return None;
    }

    (0..count).find(|&index| {
        let prev = &vertices[(index + count - 1) % count];
        let next = &vertices[(index + 1) % count];
        let incoming = vertices[index].sub(prev);
        let outgoing = next.sub(&vertices[index]);

        incoming.perp(&outgoing).abs() <= SPIKE_EPSILON * incoming.norm() * outgoing.norm()
            && incoming.dot(&outgoing) < 0.0
    })
}

/// Puts the outcomes of the rings of one polygon back together.
///
/// `interior` must be in the order of the input holes. Rejected rings are reported with the given
/// part index.
pub fn assemble_polygon<P>(
    part: usize,
    exterior: RingOutcome<P>,
    interior: impl IntoIterator<Item = RingOutcome<P>>,
    diagnostics: &mut Vec<RingDiagnostic>,
) -> Polygon<P> {
    let mut take = |role: RingRole, outcome: RingOutcome<P>| {
        if let RingOutcome::Rejected { error, .. } = &outcome {
            log::warn!("Ring {role:?} of part {part} is left unchanged: {error}");
            diagnostics.push(RingDiagnostic {
                part,
                role,
                error: error.clone(),
            });
        }

        outcome.into_ring()
    };

    let outer_contour = take(RingRole::Exterior, exterior);
    let inner_contours = interior
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| take(RingRole::Interior(index), outcome))
        .collect();

    Polygon::new(outer_contour, inner_contours)
}
