//! Point and edge records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EdgeId, Location, PointId, RegionId};

/// Maximum number of edge ends a point can carry.
pub const MAX_DEGREE: usize = 3;

/// A point ("spot") on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,

    pub location: Location,

    /// True while the point can still take another edge.
    pub active: bool,

    /// The region this point is an interior point of.
    pub region: RegionId,

    /// Incident edges in creation order. A self loop appears twice.
    pub edges: SmallVec<[EdgeId; MAX_DEGREE]>,
}

impl Point {
    /// Create a fresh point with no edges.
    #[must_use]
    pub fn new(id: PointId, location: Location, region: RegionId) -> Self {
        Self {
            id,
            location,
            active: true,
            region,
            edges: SmallVec::new(),
        }
    }

    /// Number of edge ends at this point.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// How many more edge ends this point can take.
    #[must_use]
    pub fn remaining_degree(&self) -> usize {
        MAX_DEGREE.saturating_sub(self.edges.len())
    }

    /// Check if the point has reached the degree cap.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.edges.len() >= MAX_DEGREE
    }
}

/// An edge between two points, carrying a handle to its drawn path.
///
/// The path runs from `start` to `end`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<P> {
    pub id: EdgeId,
    pub start: PointId,
    pub end: PointId,
    pub path: P,

    /// Set once a point has been placed on this edge. Retired edges stay in
    /// the arena so ids remain stable, but belong to no point.
    pub retired: bool,
}

impl<P> Edge<P> {
    /// The endpoint opposite `from`. For a self loop this is `from` itself.
    #[must_use]
    pub fn other(&self, from: PointId) -> PointId {
        if self.start == from {
            self.end
        } else {
            self.start
        }
    }

    /// Check if the edge touches `point`.
    #[must_use]
    pub fn touches(&self, point: PointId) -> bool {
        self.start == point || self.end == point
    }

    /// Check if both ends are the same point.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }
}
