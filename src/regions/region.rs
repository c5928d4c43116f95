//! Region records.

use serde::{Deserialize, Serialize};

use crate::core::{EdgeId, PointId, RegionId};

/// A node of the region tree.
///
/// `boundary_points` and `boundary_edges` describe the loop in order:
/// `boundary_edges[i]` joins `boundary_points[i]` to the next point, the
/// last edge wrapping around to the first point. The root region has an
/// empty boundary and no path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region<P> {
    pub id: RegionId,

    pub parent: Option<RegionId>,

    /// Points owned by this region.
    pub inner_points: Vec<PointId>,

    pub boundary_points: Vec<PointId>,

    pub boundary_edges: Vec<EdgeId>,

    /// Child regions nested directly inside this one.
    pub inner_regions: Vec<RegionId>,

    /// Closed path outlining the region.
    pub boundary_path: Option<P>,
}

impl<P> Region<P> {
    /// Create the root region holding `points`.
    #[must_use]
    pub fn root(points: Vec<PointId>) -> Self {
        Self {
            id: RegionId::ROOT,
            parent: None,
            inner_points: points,
            boundary_points: Vec::new(),
            boundary_edges: Vec::new(),
            inner_regions: Vec::new(),
            boundary_path: None,
        }
    }

    /// Check if this region has no children and no interior points.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.inner_regions.is_empty() && self.inner_points.is_empty()
    }

    /// Check if `point` lies on this region's loop.
    #[must_use]
    pub fn has_boundary_point(&self, point: PointId) -> bool {
        self.boundary_points.contains(&point)
    }

    /// Position of `edge` in the boundary loop.
    #[must_use]
    pub fn boundary_edge_index(&self, edge: EdgeId) -> Option<usize> {
        self.boundary_edges.iter().position(|e| *e == edge)
    }
}
