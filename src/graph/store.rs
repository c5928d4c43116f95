//! Arena storage for points and edges.
//!
//! Uses `im` persistent vectors so a whole graph can be snapshotted in
//! O(1) before a commit and restored if the commit is abandoned.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::point::{Edge, Point, MAX_DEGREE};
use crate::core::{EdgeId, Location, PointId, RegionId, SproutsError};

/// Result of placing a point on an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSplit {
    /// The new point.
    pub point: PointId,
    /// The retired edge.
    pub retired: EdgeId,
    /// New edge from the old start to the new point.
    pub first: EdgeId,
    /// New edge from the new point to the old end.
    pub second: EdgeId,
}

/// Points and edges of one game.
///
/// ## Usage
///
/// ```
/// use sprouts_engine::core::{Location, RegionId};
/// use sprouts_engine::graph::Graph;
///
/// let mut graph: Graph<u32> = Graph::new();
/// let a = graph.add_point(Location::new(0.0, 0.0), RegionId::ROOT);
/// let b = graph.add_point(Location::new(1.0, 0.0), RegionId::ROOT);
///
/// let edge = graph.add_edge(a, b, 7).unwrap();
/// assert_eq!(graph.degree(a).unwrap(), 1);
/// assert_eq!(graph.live_edge(edge).unwrap().path, 7);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Graph<P: Clone> {
    points: Vector<Point>,
    edges: Vector<Edge<P>>,
}

impl<P: Clone> Default for Graph<P> {
    fn default() -> Self {
        Self {
            points: Vector::new(),
            edges: Vector::new(),
        }
    }
}

impl<P: Clone> Graph<P> {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Points ===

    /// Add an isolated point owned by `region`.
    pub fn add_point(&mut self, location: Location, region: RegionId) -> PointId {
        let id = PointId(self.points.len() as u32);
        self.points.push_back(Point::new(id, location, region));
        id
    }

    /// Get a point.
    pub fn point(&self, id: PointId) -> Result<&Point, SproutsError> {
        self.points.get(id.index()).ok_or(SproutsError::UnknownPoint(id))
    }

    pub(crate) fn point_mut(&mut self, id: PointId) -> Result<&mut Point, SproutsError> {
        self.points.get_mut(id.index()).ok_or(SproutsError::UnknownPoint(id))
    }

    /// Iterate over all points in id order.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Current degree of a point.
    pub fn degree(&self, id: PointId) -> Result<usize, SproutsError> {
        Ok(self.point(id)?.degree())
    }

    /// The point across `edge` from `from`.
    pub fn neighbor(&self, from: PointId, edge: EdgeId) -> Result<PointId, SproutsError> {
        Ok(self.live_edge(edge)?.other(from))
    }

    /// Move a point into another region.
    pub(crate) fn set_region(&mut self, id: PointId, region: RegionId) -> Result<(), SproutsError> {
        self.point_mut(id)?.region = region;
        Ok(())
    }

    /// Mark a point inactive once it has no degree left.
    ///
    /// Returns true if the point was active and is now inactive. The
    /// transition is one-way.
    pub(crate) fn deactivate_if_saturated(&mut self, id: PointId) -> Result<bool, SproutsError> {
        let point = self.point_mut(id)?;
        if point.active && point.is_saturated() {
            point.active = false;
            return Ok(true);
        }
        Ok(false)
    }

    // === Edges ===

    /// Get an edge, including retired ones.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<P>> {
        self.edges.get(id.index())
    }

    /// Get an edge that has not been retired.
    pub fn live_edge(&self, id: EdgeId) -> Result<&Edge<P>, SproutsError> {
        self.edges
            .get(id.index())
            .filter(|e| !e.retired)
            .ok_or(SproutsError::UnknownEdge(id))
    }

    /// Iterate over edges that have not been retired.
    pub fn live_edges(&self) -> impl Iterator<Item = &Edge<P>> {
        self.edges.iter().filter(|e| !e.retired)
    }

    /// Total edges ever created, retired ones included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Connect two points with a new edge.
    ///
    /// The edge is appended to `from`'s list, then to `to`'s. A self loop
    /// (`from == to`) is appended twice and needs two free degree.
    pub fn add_edge(&mut self, from: PointId, to: PointId, path: P) -> Result<EdgeId, SproutsError> {
        let from_free = self.point(from)?.remaining_degree();
        let to_free = self.point(to)?.remaining_degree();
        if from == to {
            if from_free < 2 {
                return Err(SproutsError::DegreeExceeded { point: from });
            }
        } else if from_free == 0 {
            return Err(SproutsError::DegreeExceeded { point: from });
        } else if to_free == 0 {
            return Err(SproutsError::DegreeExceeded { point: to });
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push_back(Edge {
            id,
            start: from,
            end: to,
            path,
            retired: false,
        });
        self.point_mut(from)?.edges.push(id);
        self.point_mut(to)?.edges.push(id);
        trace!(%id, %from, %to, "edge added");
        Ok(id)
    }

    /// Place a new point on `edge`, replacing it with two halves.
    ///
    /// `halves` are the paths from the old start to `location` and from
    /// `location` to the old end. The endpoints drop the retired edge and
    /// gain the half that touches them; the new point gets both halves and
    /// starts at degree 2.
    pub fn split_edge(
        &mut self,
        edge: EdgeId,
        location: Location,
        halves: (P, P),
        region: RegionId,
    ) -> Result<EdgeSplit, SproutsError> {
        let (start, end) = {
            let old = self.live_edge(edge)?;
            (old.start, old.end)
        };
        if let Some(old) = self.edges.get_mut(edge.index()) {
            old.retired = true;
        }

        let point = self.add_point(location, region);
        let first = EdgeId(self.edges.len() as u32);
        let second = EdgeId(first.0 + 1);
        self.edges.push_back(Edge {
            id: first,
            start,
            end: point,
            path: halves.0,
            retired: false,
        });
        self.edges.push_back(Edge {
            id: second,
            start: point,
            end,
            path: halves.1,
            retired: false,
        });

        self.point_mut(start)?.edges.retain(|e| *e != edge);
        if end != start {
            self.point_mut(end)?.edges.retain(|e| *e != edge);
        }
        self.point_mut(start)?.edges.push(first);
        self.point_mut(end)?.edges.push(second);

        let p = self.point_mut(point)?;
        p.edges.push(first);
        p.edges.push(second);
        debug_assert!(p.edges.len() <= MAX_DEGREE);

        trace!(%edge, %point, %first, %second, "edge split");
        Ok(EdgeSplit {
            point,
            retired: edge,
            first,
            second,
        })
    }
}
