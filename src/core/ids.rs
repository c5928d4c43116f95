//! Arena identifiers for points, edges and regions.
//!
//! Every object the engine tracks lives in a flat arena and is referenced by
//! index. Relationships (point owner, region parent, edge endpoints) are
//! stored as these ids rather than as links, so re-parenting a region or
//! retiring an edge is a plain index update.
//!
//! ## Usage
//!
//! ```
//! use sprouts_engine::core::{PointId, RegionId};
//!
//! let p = PointId::new(3);
//! assert_eq!(p.index(), 3);
//! assert_eq!(format!("{}", p), "Point(3)");
//!
//! assert!(RegionId::ROOT.is_root());
//! assert!(!RegionId::new(2).is_root());
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a point (a "spot" in Sprouts terms).
///
/// Points are never destroyed, so a `PointId` stays valid for the lifetime
/// of the game that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(pub u32);

impl PointId {
    /// Create a new point ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index for this point.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PointId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point({})", self.0)
    }
}

/// Identifier of an edge.
///
/// Edges that get split by a mid-edge point are retired, not removed, so
/// ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new edge ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index for this edge.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

/// Identifier of a region in the region tree.
///
/// The root region (the whole plane) is always `RegionId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl RegionId {
    /// The root region covering the whole plane.
    pub const ROOT: RegionId = RegionId(0);

    /// Create a new region ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index for this region.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is the root region.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Region({})", self.0)
    }
}
