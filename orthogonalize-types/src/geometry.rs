//! Geometry of any supported kind.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::impls::{ClosedContour, Contour, MultiPolygon, Polygon};

/// Geometry of one of the supported kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom<P> {
    /// Single point.
    Point(P),
    /// Open or closed line.
    Contour(Contour<P>),
    /// Polygon with holes.
    Polygon(Polygon<P>),
    /// Set of polygons.
    MultiPolygon(MultiPolygon<P>),
}

/// Kind of a [`Geom`], used in diagnostics and errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// [`Geom::Point`].
    Point,
    /// [`Geom::Contour`].
    Contour,
    /// [`Geom::Polygon`].
    Polygon,
    /// [`Geom::MultiPolygon`].
    MultiPolygon,
    /// Geometry type that has no counterpart in [`Geom`], e.g. a geometry collection of a foreign crate.
    Other,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::Contour => "Contour",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::Other => "Other",
        };
        f.write_str(name)
    }
}

impl<P> Geom<P> {
    /// Kind of the geometry.
    pub fn geometry_kind(&self) -> GeometryKind {
        match self {
            Geom::Point(_) => GeometryKind::Point,
            Geom::Contour(_) => GeometryKind::Contour,
            Geom::Polygon(_) => GeometryKind::Polygon,
            Geom::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }
}

impl<P> From<Contour<P>> for Geom<P> {
    fn from(value: Contour<P>) -> Self {
        Self::Contour(value)
    }
}

impl<P> From<ClosedContour<P>> for Geom<P> {
    fn from(value: ClosedContour<P>) -> Self {
        Self::Contour(value.into())
    }
}

impl<P> From<Polygon<P>> for Geom<P> {
    fn from(value: Polygon<P>) -> Self {
        Self::Polygon(value)
    }
}

impl<P> From<MultiPolygon<P>> for Geom<P> {
    fn from(value: MultiPolygon<P>) -> Self {
        Self::MultiPolygon(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2;

    #[test]
    fn geometry_kind() {
        let ring = ClosedContour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ]);

        assert_eq!(Geom::Point(Point2::new(0.0, 0.0)).geometry_kind(), GeometryKind::Point);
        assert_eq!(Geom::from(ring.clone()).geometry_kind(), GeometryKind::Contour);
        assert_eq!(
            Geom::from(Polygon::from(ring.clone())).geometry_kind(),
            GeometryKind::Polygon
        );
        assert_eq!(
            Geom::from(MultiPolygon::from(vec![Polygon::from(ring)])).geometry_kind(),
            GeometryKind::MultiPolygon
        );
        assert_eq!(GeometryKind::MultiPolygon.to_string(), "MultiPolygon");
    }
}
