//! Error types used by the crate.

use orthogonalize_types::GeometryKind;
use thiserror::Error;

/// Reason why a single ring could not be orthogonalized.
///
/// These errors never abort processing of a geometry: the ring is returned unchanged and the error is
/// reported as a [`RingDiagnostic`](crate::RingDiagnostic).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RingError {
    /// Too few distinct vertices, non-finite coordinates or zero enclosed area.
    #[error("degenerate ring: {vertices} distinct vertices, at least {required} required")]
    Degenerate {
        /// Number of distinct vertices left after removing duplicates.
        vertices: usize,
        /// Configured minimum.
        required: usize,
    },
    /// Constrained lines around a vertex have no stable intersection, and projecting the vertex on
    /// them failed as well.
    #[error("no stable position for vertex {vertex}")]
    SingularIntersection {
        /// Index of the vertex in the deduplicated ring.
        vertex: usize,
    },
    /// Constrained lines of neighbouring walls cross in the wrong order, so the edge would point
    /// backwards after reconstruction.
    #[error("edge {edge} would be reversed")]
    EdgeReversed {
        /// Index of the edge in the deduplicated ring.
        edge: usize,
    },
    /// The ring would double back on itself at a vertex, leaving a needle of zero width. This
    /// happens when the input has a spike, whose two edges end up on the same wall.
    #[error("ring doubles back at vertex {vertex}")]
    Spike {
        /// Index of the vertex in the reconstructed ring.
        vertex: usize,
    },
    /// The reconstructed ring encloses (almost) no area.
    #[error("reconstructed ring collapsed to area {area}")]
    Collapsed {
        /// Signed area of the reconstructed ring.
        area: f64,
    },
    /// The reconstructed ring goes around its area in the opposite direction to the input ring.
    #[error("reconstructed ring has opposite winding")]
    WindingFlipped,
}

/// Error that prevents processing of a whole geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrthogonalizeError {
    /// Only polygons and multipolygons can be orthogonalized.
    #[error("cannot orthogonalize geometry of type {0}, expected Polygon or MultiPolygon")]
    InvalidGeometryType(GeometryKind),
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
