//! Trait based 2d geometries for polygon orthogonalization.
//!
//! The crate defines the geometry vocabulary the `orthogonalize` engine works with: points in
//! cartesian coordinates, closed contours (rings), polygons with holes and multipolygons. Point and
//! contour algorithms are written against the traits
//! ([`CartesianPoint2d`](cartesian::CartesianPoint2d), [`ClosedContour`]), and the [`impls`] module
//! provides simple owned geometries built from them.
//!
//! With the `geo-types` feature (enabled by default) the types of the
//! [`geo-types`](https://docs.rs/geo-types) crate can be converted to and from the crate types.

pub mod cartesian;
pub mod contour;
pub mod error;
pub mod geometry;
pub mod impls;
pub mod segment;

#[cfg(feature = "geo-types")]
pub mod geo_types;

pub use contour::{ClosedContour, Contour};
pub use geometry::{Geom, GeometryKind};
pub use segment::Segment;
