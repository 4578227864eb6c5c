//! Reconstruction of ring vertices from constrained lines.

use nalgebra::{Matrix2, Vector2};
use orthogonalize_types::cartesian::{
    CartesianPoint2d, CartesianPoint2dFloat, NewCartesianPoint2d, Point2,
};

use crate::classify::ClassifiedRing;
use crate::config::OrthogonalizeConfig;
use crate::error::RingError;

/// Lines with directions closer to parallel than this (sine of the angle) do not intersect.
const PARALLEL_EPSILON: f64 = 1e-12;
/// Vertices whose edges turn by less than this (sine of the angle) are collinear.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// Infinite line a reconstructed edge must lie on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConstrainedLine {
    /// A point of the line.
    pub point: Point2,
    /// Unit direction of the line.
    pub direction: Vector2<f64>,
}

impl ConstrainedLine {
    /// Creates a line through `point` along `direction`. The direction is normalized; `None` is
    /// returned for a zero vector.
    pub fn new(point: Point2, direction: Vector2<f64>) -> Option<Self> {
        let direction = direction.try_normalize(0.0)?;
        Some(Self { point, direction })
    }

    /// Perpendicular projection of the point onto the line.
    pub fn project(&self, point: &Point2) -> Point2 {
        let offset = point.sub(&self.point).dot(&self.direction);
        self.point.add(self.direction * offset)
    }

    /// Intersection point of the two lines, `None` if they are parallel.
    pub fn intersect(&self, other: &ConstrainedLine) -> Option<Point2> {
        // self.point + t * self.direction == other.point + s * other.direction
        let m = Matrix2::new(
            self.direction.x,
            -other.direction.x,
            self.direction.y,
            -other.direction.y,
        );
        if m.determinant().abs() < PARALLEL_EPSILON {
            return None;
        }

        let rhs = other.point.sub(&self.point);
        let solution = m.lu().solve(&rhs)?;
        Some(self.point.add(self.direction * solution.x))
    }
}

/// Ring with vertices rebuilt on the constrained lines.
#[derive(Debug, Clone)]
pub struct ReconstructedRing {
    classified: ClassifiedRing,
    walls: Vec<ConstrainedLine>,
    vertices: Vec<Point2>,
}

impl ReconstructedRing {
    /// The classified ring the vertices were rebuilt from.
    pub fn classified(&self) -> &ClassifiedRing {
        &self.classified
    }

    /// Constrained lines, one per wall.
    pub fn walls(&self) -> &[ConstrainedLine] {
        &self.walls
    }

    /// Rebuilt vertices, without the closing point.
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }
}

/// Rebuilds the vertices of the ring.
///
/// Consecutive edges sharing an axis form one wall. The line of a wall goes along its axis through the
/// length-weighted mean of its edges' midpoints, so a single-edge wall turns around its midpoint. A
/// skewed edge keeps its own line. A vertex between two walls moves to the intersection of their lines,
/// and a vertex inside a wall is projected onto the wall line.
///
/// Vertices that end up at the same place are merged afterwards.
pub fn reconstruct(
    ring: ClassifiedRing,
    config: &OrthogonalizeConfig,
) -> Result<ReconstructedRing, RingError> {
    let (walls, wall_of) = build_walls(&ring)?;

    let analyzed = ring.ring();
    let original = analyzed.vertices();
    let count = original.len();

    let mut vertices = Vec::with_capacity(count);
    for (index, vertex) in original.iter().enumerate() {
        let prev_wall = &walls[wall_of[(index + count - 1) % count]];
        let next_wall = &walls[wall_of[index]];

        let position = if wall_of[(index + count - 1) % count] == wall_of[index] {
            next_wall.project(vertex)
        } else {
            match prev_wall.intersect(next_wall) {
                Some(point) => point,
                None => {
                    let a = prev_wall.project(vertex);
                    let b = next_wall.project(vertex);
                    Point2::new((a.x() + b.x()) / 2.0, (a.y() + b.y()) / 2.0)
                }
            }
        };

        if !position.is_finite() {
            return Err(RingError::SingularIntersection { vertex: index });
        }

        vertices.push(position);
    }

    for (index, edge) in analyzed.edges().iter().enumerate() {
        let new_vector = vertices[edge.end].sub(&vertices[edge.start]);
        if new_vector.dot(&edge.vector) < 0.0 {
            return Err(RingError::EdgeReversed { edge: index });
        }
    }

    let mut vertices = merge_coincident(vertices, config.vertex_epsilon);
    if config.remove_collinear_vertices {
        vertices = remove_collinear(vertices);
    }

    Ok(ReconstructedRing {
        classified: ring,
        walls,
        vertices,
    })
}

/// Groups edges into walls and builds the constrained line of every wall. Returns the lines and the
/// wall index of every edge.
fn build_walls(ring: &ClassifiedRing) -> Result<(Vec<ConstrainedLine>, Vec<usize>), RingError> {
    let edges = ring.ring().edges();
    let assignments = ring.assignments();
    let axes = ring.axes();
    let count = edges.len();

    let same_wall = |index: usize| {
        let prev = (index + count - 1) % count;
        !assignments[index].is_skewed() && assignments[index] == assignments[prev]
    };

    // Start at the beginning of a wall, so a wall that wraps around the first vertex stays whole.
    let start = (0..count).find(|&i| !same_wall(i)).unwrap_or(0);

    let mut groups: Vec<Vec<usize>> = vec![];
    let mut wall_of = vec![0; count];
    for step in 0..count {
        let index = (start + step) % count;
        match groups.last_mut() {
            Some(group) if same_wall(index) => group.push(index),
            _ => groups.push(vec![index]),
        }
        wall_of[index] = groups.len() - 1;
    }

    let walls = groups
        .iter()
        .map(|group| {
            let first = &edges[group[0]];
            let line = match assignments[group[0]].axis() {
                None => ConstrainedLine::new(ring.ring().vertices()[first.start], first.vector),
                Some(axis) => {
                    let mut weight = 0.0;
                    let mut x = 0.0;
                    let mut y = 0.0;
                    for edge in group.iter().map(|&i| &edges[i]) {
                        weight += edge.length;
                        x += edge.length * edge.midpoint.x();
                        y += edge.length * edge.midpoint.y();
                    }

                    ConstrainedLine::new(Point2::new(x / weight, y / weight), axes.direction(axis))
                }
            };

            line.ok_or(RingError::SingularIntersection { vertex: first.start })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((walls, wall_of))
}

fn merge_coincident(vertices: Vec<Point2>, epsilon: f64) -> Vec<Point2> {
    let epsilon_sq = epsilon * epsilon;
    let mut merged: Vec<Point2> = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        match merged.last() {
            Some(last) if last.distance_sq(&vertex) <= epsilon_sq => {}
            _ => merged.push(vertex),
        }
    }

    while merged.len() > 1 {
        match (merged.first(), merged.last()) {
            (Some(first), Some(last)) if first.distance_sq(last) <= epsilon_sq => {
                merged.pop();
            }
            _ => break,
        }
    }

    merged
}

fn remove_collinear(vertices: Vec<Point2>) -> Vec<Point2> {
    let count = vertices.len();
    if count <= 3 {
        return vertices;
    }

    let mut kept: Vec<Point2> = Vec::with_capacity(count);
    for (index, vertex) in vertices.iter().enumerate() {
        let prev = kept.last().unwrap_or(&vertices[count - 1]);
        let next = &vertices[(index + 1) % count];

        let incoming = vertex.sub(prev);
        let outgoing = next.sub(vertex);
        let cross = incoming.perp(&outgoing);
        let is_straight = cross.abs() <= COLLINEAR_EPSILON * incoming.norm() * outgoing.norm()
            && incoming.dot(&outgoing) > 0.0;

        if !is_straight {
            kept.push(*vertex);
        }
    }

    kept
}
