//! Integration with the [`geo-types`](https://docs.rs/geo-types) crate.
//!
//! [`Coord`] implements the cartesian point traits, so `geo-types` coordinates can be used by the
//! crate algorithms without copying them into another point type. Polygonal `geo-types` geometries
//! convert into the crate types and back. Rings of `geo-types` repeat the first point at the end; the
//! repeated point is dropped on the way in and restored on the way out.

use ::geo_types::{coord, Coord, CoordNum, Geometry, LineString};
use nalgebra::Scalar;
use num_traits::{Bounded, FromPrimitive};

use crate::cartesian::{CartesianPoint2d, NewCartesianPoint2d};
use crate::error::TypesError;
use crate::geometry::{Geom, GeometryKind};
use crate::impls::{ClosedContour, Contour, MultiPolygon, Polygon};

impl<T: CoordNum + Bounded + Scalar + FromPrimitive> CartesianPoint2d for Coord<T> {
    type Num = T;

    fn x(&self) -> Self::Num {
        self.x
    }

    fn y(&self) -> Self::Num {
        self.y
    }
}

impl<T: CoordNum + Bounded + Scalar + FromPrimitive> NewCartesianPoint2d<T> for Coord<T> {
    fn new(x: T, y: T) -> Self {
        coord!(x: x, y: y)
    }
}

impl<T: CoordNum> From<&LineString<T>> for ClosedContour<Coord<T>> {
    fn from(value: &LineString<T>) -> Self {
        ClosedContour::from_closed_sequence(value.0.clone())
    }
}

impl<T: CoordNum> From<ClosedContour<Coord<T>>> for LineString<T> {
    fn from(value: ClosedContour<Coord<T>>) -> Self {
        let mut points = value.points;
        if let Some(first) = points.first().copied() {
            points.push(first);
        }

        LineString(points)
    }
}

impl<T: CoordNum> From<&::geo_types::Polygon<T>> for Polygon<Coord<T>> {
    fn from(value: &::geo_types::Polygon<T>) -> Self {
        Polygon::new(
            value.exterior().into(),
            value.interiors().iter().map(ClosedContour::from).collect(),
        )
    }
}

impl<T: CoordNum> From<Polygon<Coord<T>>> for ::geo_types::Polygon<T> {
    fn from(value: Polygon<Coord<T>>) -> Self {
        ::geo_types::Polygon::new(
            value.outer_contour.into(),
            value.inner_contours.into_iter().map(LineString::from).collect(),
        )
    }
}

impl<T: CoordNum> From<&::geo_types::MultiPolygon<T>> for MultiPolygon<Coord<T>> {
    fn from(value: &::geo_types::MultiPolygon<T>) -> Self {
        MultiPolygon::from(value.0.iter().map(Polygon::from).collect::<Vec<_>>())
    }
}

impl<T: CoordNum> From<MultiPolygon<Coord<T>>> for ::geo_types::MultiPolygon<T> {
    fn from(value: MultiPolygon<Coord<T>>) -> Self {
        ::geo_types::MultiPolygon(
            value
                .parts
                .into_iter()
                .map(::geo_types::Polygon::from)
                .collect(),
        )
    }
}

impl<T: CoordNum> TryFrom<&Geometry<T>> for Geom<Coord<T>> {
    type Error = TypesError;

    fn try_from(value: &Geometry<T>) -> Result<Self, Self::Error> {
        Ok(match value {
            Geometry::Point(p) => Geom::Point(p.0),
            Geometry::Line(line) => Geom::Contour(Contour::open(vec![line.start, line.end])),
            Geometry::LineString(ls) => {
                if ls.is_closed() && ls.0.len() > 1 {
                    Geom::Contour(ClosedContour::from(ls).into())
                } else {
                    Geom::Contour(Contour::open(ls.0.clone()))
                }
            }
            Geometry::Polygon(polygon) => Geom::Polygon(polygon.into()),
            Geometry::MultiPolygon(mp) => Geom::MultiPolygon(mp.into()),
            Geometry::Rect(rect) => Geom::Polygon((&rect.to_polygon()).into()),
            Geometry::Triangle(triangle) => Geom::Polygon((&triangle.to_polygon()).into()),
            other => {
                return Err(TypesError::Conversion(format!(
                    "geometry {} has no counterpart in Geom",
                    geo_types_kind_name(other)
                )))
            }
        })
    }
}

impl<T: CoordNum> From<Geom<Coord<T>>> for Geometry<T> {
    fn from(value: Geom<Coord<T>>) -> Self {
        match value {
            Geom::Point(p) => Geometry::Point(p.into()),
            Geom::Contour(contour) => {
                let is_closed = crate::contour::Contour::is_closed(&contour);
                let mut points = contour.to_vec();
                if is_closed {
                    if let Some(first) = points.first().copied() {
                        points.push(first);
                    }
                }
                Geometry::LineString(LineString(points))
            }
            Geom::Polygon(polygon) => Geometry::Polygon(polygon.into()),
            Geom::MultiPolygon(mp) => Geometry::MultiPolygon(mp.into()),
        }
    }
}

/// Kind of the `geo-types` geometry in terms of [`GeometryKind`].
pub fn geometry_kind<T: CoordNum>(geometry: &Geometry<T>) -> GeometryKind {
    match geometry {
        Geometry::Point(_) => GeometryKind::Point,
        Geometry::Line(_) | Geometry::LineString(_) => GeometryKind::Contour,
        Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => GeometryKind::Polygon,
        Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        _ => GeometryKind::Other,
    }
}

fn geo_types_kind_name<T: CoordNum>(geometry: &Geometry<T>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
