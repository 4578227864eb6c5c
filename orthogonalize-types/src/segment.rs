use nalgebra::Vector2;
use num_traits::Float;

use crate::cartesian::{CartesianPoint2d, NewCartesianPoint2d};

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<P: CartesianPoint2d> Segment<'_, P> {
    /// Vector from the start to the end of the segment.
    pub fn vector(&self) -> Vector2<P::Num> {
        self.1.sub(self.0)
    }
}

impl<N: Float, P: CartesianPoint2d<Num = N>> Segment<'_, P> {
    /// Length of the segment.
    pub fn length(&self) -> N {
        self.0.distance_sq(self.1).sqrt()
    }

    /// Point in the middle of the segment.
    pub fn midpoint<Out: NewCartesianPoint2d<N>>(&self) -> Out {
        let two = N::one() + N::one();
        Out::new(
            (self.0.x() + self.1.x()) / two,
            (self.0.y() + self.1.y()) / two,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::cartesian::Point2;

    #[test]
    fn length_and_midpoint() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(4.0, 5.0);
        let segment = Segment(&a, &b);

        assert_abs_diff_eq!(segment.length(), 5.0);
        assert_abs_diff_eq!(segment.midpoint::<Point2>(), Point2::new(2.5, 3.0));
        assert_eq!(segment.vector(), Vector2::new(3.0, 4.0));
    }
}
