//! Iterative depth-first loop search.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{EdgeId, PointId, SproutsError};
use crate::graph::Graph;

/// A closed walk found by the detector.
///
/// `points` runs from the candidate to the origin; `edges[i]` joins
/// `points[i]` and `points[i + 1]`. The new connecting edge (origin back to
/// candidate) is not included.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    pub edges: Vec<EdgeId>,
    pub points: Vec<PointId>,
}

impl Boundary {
    /// Number of points on the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the boundary has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check if this is a loop from a point straight back to itself.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.edges.is_empty() && self.points.len() == 1
    }
}

/// Outcome of one search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopSearch {
    /// Every closed walk found, in discovery order.
    pub boundaries: Vec<Boundary>,

    /// Number of edges examined. Bounded by the number of edge ends in the
    /// component, since each point is expanded at most once.
    pub steps: usize,
}

impl LoopSearch {
    /// Check if any loop was found.
    #[must_use]
    pub fn closes_loop(&self) -> bool {
        !self.boundaries.is_empty()
    }
}

/// One level of the explicit DFS stack.
#[derive(Clone, Copy, Debug)]
struct Frame {
    point: PointId,
    next_edge: usize,
}

/// Depth-first loop search over a graph.
///
/// Points are marked visited the first time they are expanded and never
/// expanded again. The origin is never marked, so every branch that reaches
/// it records its own boundary.
pub struct LoopDetector<'a, P: Clone> {
    graph: &'a Graph<P>,
}

impl<'a, P: Clone> LoopDetector<'a, P> {
    /// Create a detector over `graph`.
    #[must_use]
    pub fn new(graph: &'a Graph<P>) -> Self {
        Self { graph }
    }

    /// Find every walk from `candidate` back to `origin` over existing edges.
    pub fn search(&self, origin: PointId, candidate: PointId) -> Result<LoopSearch, SproutsError> {
        self.graph.point(origin)?;
        self.graph.point(candidate)?;

        if origin == candidate {
            return Ok(LoopSearch {
                boundaries: vec![Boundary {
                    edges: Vec::new(),
                    points: vec![origin],
                }],
                steps: 0,
            });
        }

        let mut result = LoopSearch::default();
        let mut visited: FxHashSet<PointId> = FxHashSet::default();
        let mut path: Vec<EdgeId> = Vec::new();
        let mut stack = vec![Frame {
            point: candidate,
            next_edge: 0,
        }];
        visited.insert(candidate);

        while let Some(frame) = stack.last().copied() {
            let point = self.graph.point(frame.point)?;
            let Some(&edge_id) = point.edges.get(frame.next_edge) else {
                stack.pop();
                path.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.next_edge += 1;
            }
            result.steps += 1;

            let neighbor = self.graph.neighbor(frame.point, edge_id)?;
            if neighbor == origin {
                let mut edges = path.clone();
                edges.push(edge_id);
                trace!(%origin, %candidate, len = edges.len(), "loop found");
                result.boundaries.push(self.boundary_from(candidate, edges)?);
                continue;
            }
            if !visited.insert(neighbor) {
                continue;
            }
            path.push(edge_id);
            stack.push(Frame {
                point: neighbor,
                next_edge: 0,
            });
        }

        Ok(result)
    }

    fn boundary_from(&self, candidate: PointId, edges: Vec<EdgeId>) -> Result<Boundary, SproutsError> {
        let mut points = Vec::with_capacity(edges.len() + 1);
        let mut current = candidate;
        points.push(current);
        for &edge in &edges {
            current = self.graph.neighbor(current, edge)?;
            points.push(current);
        }
        Ok(Boundary { edges, points })
    }
}

/// Find the loops a new edge from `origin` to `candidate` would close.
///
/// Returns an empty list when the two points are not yet connected.
pub fn detect_loops<P: Clone>(
    graph: &Graph<P>,
    origin: PointId,
    candidate: PointId,
) -> Result<Vec<Boundary>, SproutsError> {
    Ok(LoopDetector::new(graph).search(origin, candidate)?.boundaries)
}
