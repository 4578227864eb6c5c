mod cartesian_point;
mod contour;

pub use cartesian_point::{CartesianPoint2d, CartesianPoint2dFloat, NewCartesianPoint2d};
pub use contour::{CartesianClosedContour, Winding};
