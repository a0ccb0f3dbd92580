//! Integer pixel positions.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A 2D integer point in pixel space, (0, 0) being the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Scales both coordinates, rounding half away from zero.
    #[inline]
    pub fn scale(self, x_ratio: f64, y_ratio: f64) -> Self {
        Self {
            x: (f64::from(self.x) * x_ratio).round() as i32,
            y: (f64::from(self.y) * y_ratio).round() as i32,
        }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}
