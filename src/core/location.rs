//! Plane coordinates.

use serde::{Deserialize, Serialize};

/// A location in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    /// Create a new location.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another location.
    #[must_use]
    pub fn distance_squared(self, other: Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another location.
    #[must_use]
    pub fn distance(self, other: Location) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Linear interpolation towards `other` (`t = 0` is `self`).
    #[must_use]
    pub fn lerp(self, other: Location, t: f64) -> Location {
        Location::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Check if two locations coincide within `epsilon`.
    #[must_use]
    pub fn approx_eq(self, other: Location, epsilon: f64) -> bool {
        self.distance_squared(other) <= epsilon * epsilon
    }
}

impl From<(f64, f64)> for Location {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
