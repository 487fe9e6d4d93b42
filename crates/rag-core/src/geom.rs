use core::ops::Sub;

use serde::{Deserialize, Serialize};

/// Real-valued image position. `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_row_col(row: f64, col: f64) -> Self {
        Self { x: col, y: row }
    }

    /// Nearest pixel center as `(x, y)`, or `None` for non-finite points.
    pub fn to_pixel(self) -> Option<(i64, i64)> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        Some((self.x.round() as i64, self.y.round() as i64))
    }
}

impl Vec2d {
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }
}

impl Sub<Point2d> for Point2d {
    type Output = Vec2d;

    fn sub(self, rhs: Point2d) -> Self::Output {
        Vec2d {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
