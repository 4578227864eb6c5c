//! Edge analysis: the first stage of the ring pipeline.

use nalgebra::Vector2;
use orthogonalize_types::cartesian::{
    CartesianClosedContour, CartesianPoint2d, CartesianPoint2dFloat, Point2,
};
use orthogonalize_types::impls::ClosedContour;
use orthogonalize_types::Contour;

use crate::angle::line_angle;
use crate::config::OrthogonalizeConfig;
use crate::error::RingError;

/// Rings with area below this fraction of the squared perimeter are treated as flat.
const FLAT_RING_RATIO: f64 = 1e-12;

/// Edge of a ring, from vertex `start` to vertex `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Index of the start vertex.
    pub start: usize,
    /// Index of the end vertex.
    pub end: usize,
    /// Vector from the start to the end vertex.
    pub vector: Vector2<f64>,
    /// Length of the edge.
    pub length: f64,
    /// Direction of the edge as a line angle in `[0, π)`.
    pub angle: f64,
    /// Middle point of the edge.
    pub midpoint: Point2,
}

/// Ring with duplicate vertices removed and its edges measured.
#[derive(Debug, Clone)]
pub struct AnalyzedRing {
    ring: ClosedContour<Point2>,
    edges: Vec<Edge>,
    area: f64,
}

impl AnalyzedRing {
    /// Distinct vertices of the ring.
    pub fn vertices(&self) -> &[Point2] {
        &self.ring.points
    }

    /// The deduplicated ring.
    pub fn contour(&self) -> &ClosedContour<Point2> {
        &self.ring
    }

    /// Edges of the ring. Edge `i` goes from vertex `i` to vertex `i + 1` (wrapping around).
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Signed area of the ring.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Edge ending at vertex `index`.
    pub fn incoming_edge(&self, index: usize) -> &Edge {
        &self.edges[(index + self.edges.len() - 1) % self.edges.len()]
    }
}

/// Removes repeated vertices from the ring and computes its edges.
///
/// Vertices closer than `vertex_epsilon` to the previously kept one are dropped, including the last
/// vertex if it repeats the first one.
pub fn analyze<P>(
    ring: &ClosedContour<P>,
    config: &OrthogonalizeConfig,
) -> Result<AnalyzedRing, RingError>
where
    P: CartesianPoint2d<Num = f64>,
{
    let epsilon_sq = config.vertex_epsilon * config.vertex_epsilon;
    let degenerate = |vertices: usize| RingError::Degenerate {
        vertices,
        required: config.min_ring_vertices,
    };

    let mut points: Vec<Point2> = Vec::with_capacity(ring.len());
    for p in Contour::iter_points(ring) {
        if !p.is_finite() {
            return Err(degenerate(0));
        }

        let point = Point2::new(p.x(), p.y());
        match points.last() {
            Some(last) if last.distance_sq(&point) <= epsilon_sq => {}
            _ => points.push(point),
        }
    }

    while points.len() > 1 {
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if first.distance_sq(last) <= epsilon_sq => {
                points.pop();
            }
            _ => break,
        }
    }

    if points.len() < config.min_ring_vertices {
        return Err(degenerate(points.len()));
    }

    let ring = ClosedContour::new(points);
    let count = ring.len();
    let edges: Vec<Edge> = ring
        .iter_segments()
        .enumerate()
        .map(|(start, segment)| {
            let vector = segment.vector();
            Edge {
                start,
                end: (start + 1) % count,
                length: segment.length(),
                angle: line_angle(&vector),
                midpoint: segment.midpoint(),
                vector,
            }
        })
        .collect();

    let perimeter: f64 = edges.iter().map(|e| e.length).sum();
    let area = ring.area_signed();
    if !area.is_finite() || area.abs() <= FLAT_RING_RATIO * perimeter * perimeter {
        return Err(degenerate(count));
    }

    Ok(AnalyzedRing { ring, edges, area })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    fn ring(points: &[(f64, f64)]) -> ClosedContour<Point2> {
        ClosedContour::new(points.iter().map(|&p| Point2::from(p)).collect())
    }

    #[test]
    fn measures_edges() {
        let analyzed = analyze(
            &ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)]),
            &OrthogonalizeConfig::default(),
        )
        .expect("valid ring");

        assert_eq!(analyzed.edges().len(), 4);
        assert_abs_diff_eq!(analyzed.area(), 12.0);

        let edges = analyzed.edges();
        assert_abs_diff_eq!(edges[0].length, 4.0);
        assert_abs_diff_eq!(edges[0].angle, 0.0);
        assert_abs_diff_eq!(edges[1].angle, FRAC_PI_2);
        assert_abs_diff_eq!(edges[2].angle, 0.0);
        assert_abs_diff_eq!(edges[3].angle, FRAC_PI_2);
        assert_abs_diff_eq!(edges[1].midpoint, Point2::new(4.0, 1.5));
        assert_eq!((edges[3].start, edges[3].end), (3, 0));
        assert_eq!(analyzed.incoming_edge(0).start, 3);
    }

    #[test]
    fn drops_repeated_vertices() {
        let analyzed = analyze(
            &ring(&[
                (0.0, 0.0),
                (0.0, 0.0),
                (4.0, 0.0),
                (4.0, 3.0),
                (4.0, 3.0 + 1e-12),
                (0.0, 3.0),
                (0.0, 0.0),
            ]),
            &OrthogonalizeConfig::default(),
        )
        .expect("valid ring");

        assert_eq!(analyzed.vertices().len(), 4);
    }

    #[test]
    fn too_few_vertices_is_degenerate() {
        let result = analyze(
            &ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 0.0)]),
            &OrthogonalizeConfig::default(),
        );
        assert_matches!(
            result,
            Err(RingError::Degenerate {
                vertices: 2,
                required: 3
            })
        );

        let result = analyze(
            &ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            &OrthogonalizeConfig::default().with_min_ring_vertices(5),
        );
        assert_matches!(result, Err(RingError::Degenerate { vertices: 4, .. }));
    }

    #[test]
    fn flat_ring_is_degenerate() {
        let result = analyze(
            &ring(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]),
            &OrthogonalizeConfig::default(),
        );
        assert_matches!(result, Err(RingError::Degenerate { vertices: 3, .. }));
    }

    #[test]
    fn non_finite_coordinates_are_degenerate() {
        let result = analyze(
            &ring(&[(0.0, 0.0), (1.0, f64::NAN), (1.0, 1.0)]),
            &OrthogonalizeConfig::default(),
        );
        assert_matches!(result, Err(RingError::Degenerate { .. }));
    }
}
