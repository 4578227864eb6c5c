use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::cartesian::traits::cartesian_point::CartesianPoint2d;
use crate::contour::{ClosedContour, Contour};

/// Closed contour in 2d cartesian coordinates. This trait is auto-implemented for all eligible types.
pub trait CartesianClosedContour {
    /// Type of the points of the contour.
    type Point: CartesianPoint2d;

    /// Signed area enclosed by the contour. The value is positive for counter-clockwise contours and
    /// negative for clockwise ones.
    fn area_signed(&self) -> <Self::Point as CartesianPoint2d>::Num
    where
        Self: Sized;

    /// Direction in which the contour goes around its area.
    fn winding(&self) -> Winding
    where
        Self: Sized;
}

impl<P, T> CartesianClosedContour for T
where
    P: CartesianPoint2d,
    T: ClosedContour<Point = P>,
{
    type Point = P;

    fn area_signed(&self) -> P::Num
    where
        Self: Sized,
    {
        let mut iter = self.iter_points_closing();
        let Some(mut prev) = iter.next() else {
            return P::Num::zero();
        };

        let mut aggr = P::Num::zero();
        for p in iter {
            aggr = aggr + prev.x() * p.y() - p.x() * prev.y();
            prev = p;
        }

        aggr / (P::Num::one() + P::Num::one())
    }

    fn winding(&self) -> Winding
    where
        Self: Sized,
    {
        if self.area_signed() <= P::Num::zero() {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }
}

/// Direction of a closed contour.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Winding {
    /// Clockwise.
    Clockwise,
    /// Counterclockwise.
    CounterClockwise,
}
