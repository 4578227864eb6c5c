//! Types and functions on geometries in cartesian coordinates.

mod point;
mod traits;

pub use point::Point2;
pub use traits::*;
