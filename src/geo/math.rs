use serde::{Deserialize, Serialize};
use std::fmt;

/// A position inside the map area, as percentages of its height (`top`)
/// and width (`left`). Values are expected in `0.0..=100.0` but not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub top: f64,
    pub left: f64,
}

impl Point {
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.top - self.top).hypot(other.left - self.left)
    }

    #[cfg(test)]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.top + other.top) / 2.0, (self.left + other.left) / 2.0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "top {:.1}%, left {:.1}%", self.top, self.left)
    }
}
