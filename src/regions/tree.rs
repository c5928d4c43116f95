//! Arena-based region tree.
//!
//! Regions are stored in a flat `im::Vector` and refer to each other by
//! `RegionId`. Re-parenting a subtree is a parent-id update plus two list
//! edits, and the whole tree can be snapshotted in O(1).

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::region::Region;
use crate::core::{EdgeId, Location, PointId, PointMap, RegionId, SproutsError, TerminationRule};
use crate::geometry::GeometryProvider;
use crate::graph::{EdgeSplit, Graph, MAX_DEGREE};
use crate::loops::Boundary;

/// What a carve did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarveOutcome {
    /// The new region.
    pub region: RegionId,
    /// Interior points moved from the parent into the new region.
    pub moved_points: Vec<PointId>,
    /// Existing regions moved under the new region.
    pub reparented: Vec<RegionId>,
}

/// The tree of nested regions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionTree<P: Clone> {
    regions: Vector<Region<P>>,
}

impl<P: Clone> RegionTree<P> {
    /// Create a tree with a single root region owning `points`.
    #[must_use]
    pub fn new(points: Vec<PointId>) -> Self {
        let mut regions = Vector::new();
        regions.push_back(Region::root(points));
        Self { regions }
    }

    /// The root region.
    #[must_use]
    pub fn root(&self) -> &Region<P> {
        &self.regions[RegionId::ROOT.index()]
    }

    /// Get a region.
    pub fn region(&self, id: RegionId) -> Result<&Region<P>, SproutsError> {
        self.regions.get(id.index()).ok_or(SproutsError::UnknownRegion(id))
    }

    fn region_mut(&mut self, id: RegionId) -> Result<&mut Region<P>, SproutsError> {
        self.regions.get_mut(id.index()).ok_or(SproutsError::UnknownRegion(id))
    }

    /// Iterate over all regions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Region<P>> {
        self.regions.iter()
    }

    /// Number of regions, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Always false: the root region exists from the start.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Distance from the root (the root has depth 0).
    pub fn depth(&self, id: RegionId) -> Result<usize, SproutsError> {
        let mut depth = 0;
        let mut current = self.region(id)?;
        while let Some(parent) = current.parent {
            depth += 1;
            if depth > self.regions.len() {
                return Err(SproutsError::InvariantViolation(format!(
                    "parent chain of {} does not reach the root",
                    id
                )));
            }
            current = self.region(parent)?;
        }
        Ok(depth)
    }

    /// Regions from `id` up to the root, `id` first.
    pub fn parent_chain(&self, id: RegionId) -> Result<Vec<RegionId>, SproutsError> {
        let mut chain = vec![id];
        let mut current = self.region(id)?;
        while let Some(parent) = current.parent {
            if chain.len() > self.regions.len() {
                return Err(SproutsError::InvariantViolation(format!(
                    "parent chain of {} does not reach the root",
                    id
                )));
            }
            chain.push(parent);
            current = self.region(parent)?;
        }
        Ok(chain)
    }

    /// Check if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: RegionId, id: RegionId) -> Result<bool, SproutsError> {
        let mut current = Some(id);
        let mut hops = 0;
        while let Some(region) = current {
            if region == ancestor {
                return Ok(true);
            }
            hops += 1;
            if hops > self.regions.len() {
                return Err(SproutsError::InvariantViolation(format!(
                    "parent chain of {} does not reach the root",
                    id
                )));
            }
            current = self.region(region)?.parent;
        }
        Ok(false)
    }

    /// The deepest region whose loop encloses `location`.
    pub fn face_containing<G>(&self, geometry: &G, location: Location) -> Result<RegionId, SproutsError>
    where
        G: GeometryProvider<Path = P>,
        P: Copy,
    {
        let mut current = RegionId::ROOT;
        'descend: loop {
            for &child in &self.region(current)?.inner_regions {
                if let Some(path) = self.region(child)?.boundary_path {
                    if geometry.path_contains(path, location) {
                        current = child;
                        continue 'descend;
                    }
                }
            }
            return Ok(current);
        }
    }

    /// Pick the region a boundary should be carved from.
    ///
    /// Starts at `face` and steps into any region from `created` (regions
    /// carved earlier in the same move) that already owns one of the
    /// boundary's points.
    pub fn carve_parent(
        &self,
        graph: &Graph<P>,
        face: RegionId,
        boundary: &Boundary,
        created: &[RegionId],
    ) -> Result<RegionId, SproutsError> {
        let mut owners = FxHashSet::default();
        for &point in &boundary.points {
            owners.insert(graph.point(point)?.region);
        }

        let mut current = face;
        'descend: loop {
            for &child in &self.region(current)?.inner_regions {
                if created.contains(&child) && owners.contains(&child) {
                    current = child;
                    continue 'descend;
                }
            }
            return Ok(current);
        }
    }

    /// Carve a new region out of `parent`, bounded by `boundary` plus the
    /// edge that closed it.
    ///
    /// Every boundary point must be owned by `parent` or one of its
    /// ancestors; otherwise the loop straddles regions and nothing is
    /// changed.
    pub fn carve<G>(
        &mut self,
        graph: &mut Graph<P>,
        geometry: &G,
        parent: RegionId,
        boundary: &Boundary,
        closing_edge: EdgeId,
        closed_path: P,
    ) -> Result<CarveOutcome, SproutsError>
    where
        G: GeometryProvider<Path = P>,
        P: Copy,
    {
        if boundary.is_empty() {
            return Err(SproutsError::InvariantViolation("empty boundary".to_string()));
        }
        for &point in &boundary.points {
            let owner = graph.point(point)?.region;
            if !self.is_ancestor_or_self(owner, parent)? {
                return Err(SproutsError::InvariantViolation(format!(
                    "boundary {} is owned by {}, outside {}",
                    point, owner, parent
                )));
            }
        }

        let parent_region = self.region(parent)?.clone();
        let on_boundary: FxHashSet<PointId> = boundary.points.iter().copied().collect();

        // Boundary point -> child regions whose loop passes through it.
        let mut children_at: FxHashMap<PointId, Vec<RegionId>> = FxHashMap::default();
        for &child in &parent_region.inner_regions {
            for &point in &self.region(child)?.boundary_points {
                children_at.entry(point).or_default().push(child);
            }
        }

        let mut kept = Vec::new();
        let mut moved = Vec::new();
        let mut enclosed: FxHashSet<RegionId> = FxHashSet::default();
        for &point in &parent_region.inner_points {
            if on_boundary.contains(&point) {
                kept.push(point);
                continue;
            }
            let location = graph.point(point)?.location;
            if geometry.path_contains(closed_path, location) {
                moved.push(point);
                if let Some(children) = children_at.get(&point) {
                    enclosed.extend(children.iter().copied());
                }
            } else {
                kept.push(point);
            }
        }

        let (reparented, remaining): (Vec<RegionId>, Vec<RegionId>) = parent_region
            .inner_regions
            .iter()
            .copied()
            .partition(|child| enclosed.contains(child));

        let id = RegionId(self.regions.len() as u32);
        let mut boundary_edges = boundary.edges.clone();
        boundary_edges.push(closing_edge);
        self.regions.push_back(Region {
            id,
            parent: Some(parent),
            inner_points: moved.clone(),
            boundary_points: boundary.points.clone(),
            boundary_edges,
            inner_regions: reparented.clone(),
            boundary_path: Some(closed_path),
        });

        {
            let parent_mut = self.region_mut(parent)?;
            parent_mut.inner_points = kept;
            parent_mut.inner_regions = remaining;
            parent_mut.inner_regions.push(id);
        }
        for &child in &reparented {
            self.region_mut(child)?.parent = Some(id);
        }
        for &point in &moved {
            graph.set_region(point, id)?;
        }

        debug!(
            region = %id,
            %parent,
            boundary = boundary.points.len(),
            moved = moved.len(),
            reparented = reparented.len(),
            "region carved"
        );

        Ok(CarveOutcome {
            region: id,
            moved_points: moved,
            reparented,
        })
    }

    /// The region a point placed on `edge` should belong to.
    ///
    /// A point on a loop belongs on the loop's outer side, so when the edge
    /// borders regions the shallowest of their parents wins. An edge that
    /// borders no region lies inside a single region, the deeper of its
    /// endpoints' owners.
    pub fn owner_for_split(&self, graph: &Graph<P>, edge: EdgeId) -> Result<RegionId, SproutsError> {
        let e = graph.live_edge(edge)?;

        let mut best: Option<(usize, RegionId)> = None;
        for region in self.regions.iter() {
            if region.boundary_edge_index(edge).is_none() {
                continue;
            }
            let Some(parent) = region.parent else { continue };
            let depth = self.depth(parent)?;
            if best.map_or(true, |(d, _)| depth < d) {
                best = Some((depth, parent));
            }
        }
        if let Some((_, region)) = best {
            return Ok(region);
        }

        let start = graph.point(e.start)?.region;
        let end = graph.point(e.end)?.region;
        if self.depth(end)? > self.depth(start)? {
            Ok(end)
        } else {
            Ok(start)
        }
    }

    /// Update every loop that ran along a split edge, and register the new
    /// point with `owner`.
    ///
    /// `start` is the retired edge's start point, which tells which half
    /// comes first when walking each loop.
    pub fn on_edge_split(
        &mut self,
        split: &EdgeSplit,
        start: PointId,
        owner: RegionId,
    ) -> Result<(), SproutsError> {
        let affected: Vec<(usize, usize)> = self
            .regions
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.boundary_edge_index(split.retired).map(|k| (i, k)))
            .collect();

        for (index, k) in affected {
            let Some(region) = self.regions.get_mut(index) else {
                continue;
            };
            let halves = if region.boundary_points[k] == start {
                [split.first, split.second]
            } else {
                [split.second, split.first]
            };
            region.boundary_edges[k] = halves[0];
            region.boundary_edges.insert(k + 1, halves[1]);
            region.boundary_points.insert(k + 1, split.point);
            trace!(region = %region.id, point = %split.point, "boundary extended");
        }

        self.region_mut(owner)?.inner_points.push(split.point);
        Ok(())
    }

    /// Number of active interior points of a region.
    pub fn active_interior_count(&self, id: RegionId, graph: &Graph<P>) -> Result<usize, SproutsError> {
        let mut count = 0;
        for &point in &self.region(id)?.inner_points {
            if graph.point(point)?.active {
                count += 1;
            }
        }
        Ok(count)
    }

    fn region_is_live(
        &self,
        region: &Region<P>,
        graph: &Graph<P>,
        rule: TerminationRule,
    ) -> Result<bool, SproutsError> {
        match rule {
            TerminationRule::InteriorPairs => Ok(self.active_interior_count(region.id, graph)? >= 2),
            TerminationRule::BoundaryAware => {
                let mut active = 0;
                for &point in region.inner_points.iter().chain(region.boundary_points.iter()) {
                    let p = graph.point(point)?;
                    if !p.active {
                        continue;
                    }
                    if p.degree() + 2 <= MAX_DEGREE {
                        return Ok(true);
                    }
                    active += 1;
                }
                Ok(active >= 2)
            }
        }
    }

    /// Check if no region admits another move.
    ///
    /// Walks the tree with an explicit stack, visiting each region once.
    pub fn is_terminal(&self, graph: &Graph<P>, rule: TerminationRule) -> Result<bool, SproutsError> {
        let mut stack = vec![RegionId::ROOT];
        while let Some(id) = stack.pop() {
            let region = self.region(id)?;
            if self.region_is_live(region, graph, rule)? {
                trace!(region = %id, "region still live");
                return Ok(false);
            }
            stack.extend(region.inner_regions.iter().copied());
        }
        Ok(true)
    }

    /// Verify that the tree is well formed and partitions the graph's points.
    ///
    /// Every region must be reachable from the root exactly once with a
    /// matching parent id, and every point must be an interior point of
    /// exactly one region, the one its `region` field names.
    pub fn check_partition(&self, graph: &Graph<P>) -> Result<(), SproutsError> {
        let mut owner_of: PointMap<RegionId> = PointMap::new();
        let mut reached: FxHashSet<RegionId> = FxHashSet::default();
        let mut stack = vec![(RegionId::ROOT, None)];

        while let Some((id, expected_parent)) = stack.pop() {
            if !reached.insert(id) {
                return Err(SproutsError::InvariantViolation(format!("{} reached twice", id)));
            }
            let region = self.region(id)?;
            if region.parent != expected_parent {
                return Err(SproutsError::InvariantViolation(format!(
                    "{} has parent {:?}, expected {:?}",
                    id, region.parent, expected_parent
                )));
            }
            for &point in &region.inner_points {
                if let Some(other) = owner_of.insert(point, id) {
                    return Err(SproutsError::InvariantViolation(format!(
                        "{} is interior to both {} and {}",
                        point, other, id
                    )));
                }
                let recorded = graph.point(point)?.region;
                if recorded != id {
                    return Err(SproutsError::InvariantViolation(format!(
                        "{} listed in {} but records {}",
                        point, id, recorded
                    )));
                }
            }
            stack.extend(region.inner_regions.iter().map(|&child| (child, Some(id))));
        }

        if reached.len() != self.regions.len() {
            return Err(SproutsError::InvariantViolation(format!(
                "{} of {} regions reachable from the root",
                reached.len(),
                self.regions.len()
            )));
        }
        for point in graph.points() {
            if !owner_of.contains(point.id) {
                return Err(SproutsError::InvariantViolation(format!("{} is unowned", point.id)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PathHandle, BezierGeometry};

    fn loc(x: f64, y: f64) -> Location {
        Location::new(x, y)
    }

    struct Fixture {
        graph: Graph<PathHandle>,
        geometry: BezierGeometry,
        tree: RegionTree<PathHandle>,
    }

    impl Fixture {
        fn new(locations: &[(f64, f64)]) -> Self {
            let mut graph = Graph::new();
            let points = locations
                .iter()
                .map(|&(x, y)| graph.add_point(loc(x, y), RegionId::ROOT))
                .collect();
            Self {
                graph,
                geometry: BezierGeometry::new(),
                tree: RegionTree::new(points),
            }
        }

        fn connect(&mut self, a: u32, b: u32) -> EdgeId {
            let from = self.graph.point(PointId(a)).unwrap().location;
            let to = self.graph.point(PointId(b)).unwrap().location;
            let path = self.geometry.add_path(vec![from, to]);
            self.graph.add_edge(PointId(a), PointId(b), path).unwrap()
        }

        /// Close a polygon through the given points and carve it from `parent`.
        fn carve_polygon(&mut self, parent: RegionId, ids: &[u32]) -> CarveOutcome {
            let mut edges = Vec::new();
            for pair in ids.windows(2) {
                edges.push(self.connect(pair[0], pair[1]));
            }
            let closing = self.connect(ids[ids.len() - 1], ids[0]);
            let mut outline: Vec<Location> = ids
                .iter()
                .map(|&i| self.graph.point(PointId(i)).unwrap().location)
                .collect();
            outline.push(outline[0]);
            let closed = self.geometry.add_path(outline);
            let boundary = Boundary {
                edges,
                points: ids.iter().map(|&i| PointId(i)).collect(),
            };
            self.tree
                .carve(&mut self.graph, &self.geometry, parent, &boundary, closing, closed)
                .unwrap()
        }
    }

    //  0: (0,0)  1: (10,0)  2: (5,10)   big triangle
    //  3: (5,3)  inside       4: (50,50) outside
    //  5: (4,1)  6: (6,1)  7: (5,2.5)  small triangle inside the big one
    const LAYOUT: [(f64, f64); 8] = [
        (0.0, 0.0),
        (10.0, 0.0),
        (5.0, 10.0),
        (5.0, 3.0),
        (50.0, 50.0),
        (4.0, 1.0),
        (6.0, 1.0),
        (5.0, 2.5),
    ];

    #[test]
    fn test_carve_moves_enclosed_points() {
        let mut fx = Fixture::new(&LAYOUT[..5]);

        let outcome = fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);

        let region = fx.tree.region(outcome.region).unwrap();
        assert_eq!(region.parent, Some(RegionId::ROOT));
        assert_eq!(region.inner_points, vec![PointId(3)]);
        assert_eq!(region.boundary_points, vec![PointId(0), PointId(1), PointId(2)]);
        assert_eq!(region.boundary_edges.len(), 3);

        let root = fx.tree.root();
        assert_eq!(root.inner_points, vec![PointId(0), PointId(1), PointId(2), PointId(4)]);
        assert_eq!(root.inner_regions, vec![outcome.region]);

        assert_eq!(fx.graph.point(PointId(3)).unwrap().region, outcome.region);
        assert_eq!(fx.graph.point(PointId(0)).unwrap().region, RegionId::ROOT);
        fx.tree.check_partition(&fx.graph).unwrap();
    }

    #[test]
    fn test_carve_reparents_enclosed_region() {
        let mut fx = Fixture::new(&LAYOUT);
        let small = fx.carve_polygon(RegionId::ROOT, &[5, 6, 7]);
        assert_eq!(fx.tree.root().inner_regions, vec![small.region]);

        let big = fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);

        assert_eq!(big.reparented, vec![small.region]);
        assert_eq!(fx.tree.region(small.region).unwrap().parent, Some(big.region));
        assert_eq!(fx.tree.root().inner_regions, vec![big.region]);

        // The small loop's points and the free point all moved inside.
        let mut moved = big.moved_points.clone();
        moved.sort();
        assert_eq!(moved, vec![PointId(3), PointId(5), PointId(6), PointId(7)]);
        assert_eq!(fx.tree.depth(small.region).unwrap(), 2);
        assert_eq!(
            fx.tree.parent_chain(small.region).unwrap(),
            vec![small.region, big.region, RegionId::ROOT]
        );
        fx.tree.check_partition(&fx.graph).unwrap();
    }

    #[test]
    fn test_carve_rejects_straddling_boundary() {
        let mut fx = Fixture::new(&LAYOUT[..5]);
        let inner = fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);
        let regions_before = fx.tree.len();

        // Point 3 is owned by the carved region, point 4 by the root.
        let e = fx.connect(3, 4);
        let closing = fx.connect(4, 3);
        let closed = fx.geometry.add_path(vec![loc(5.0, 3.0), loc(50.0, 50.0), loc(5.0, 3.0)]);
        let boundary = Boundary {
            edges: vec![e],
            points: vec![PointId(3), PointId(4)],
        };

        let err = fx
            .tree
            .carve(&mut fx.graph, &fx.geometry, RegionId::ROOT, &boundary, closing, closed)
            .unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(fx.tree.len(), regions_before);
        assert_eq!(fx.tree.region(inner.region).unwrap().inner_points, vec![PointId(3)]);
    }

    #[test]
    fn test_face_containing() {
        let mut fx = Fixture::new(&LAYOUT);
        let big = fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);
        let small = fx.carve_polygon(big.region, &[5, 6, 7]);

        assert_eq!(fx.tree.face_containing(&fx.geometry, loc(5.0, 1.5)).unwrap(), small.region);
        assert_eq!(fx.tree.face_containing(&fx.geometry, loc(5.0, 6.0)).unwrap(), big.region);
        assert_eq!(fx.tree.face_containing(&fx.geometry, loc(30.0, 0.0)).unwrap(), RegionId::ROOT);
    }

    #[test]
    fn test_carve_parent_descends_into_new_regions() {
        let mut fx = Fixture::new(&LAYOUT);
        let big = fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);
        let boundary = Boundary {
            edges: Vec::new(),
            points: vec![PointId(0), PointId(3)],
        };

        let fresh = fx.tree.carve_parent(&fx.graph, RegionId::ROOT, &boundary, &[big.region]).unwrap();
        assert_eq!(fresh, big.region);

        let stale = fx.tree.carve_parent(&fx.graph, RegionId::ROOT, &boundary, &[]).unwrap();
        assert_eq!(stale, RegionId::ROOT);
    }

    #[test]
    fn test_split_on_boundary_extends_loop() {
        let mut fx = Fixture::new(&LAYOUT[..5]);
        let big = fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);
        let e01 = fx.tree.region(big.region).unwrap().boundary_edges[0];

        let owner = fx.tree.owner_for_split(&fx.graph, e01).unwrap();
        assert_eq!(owner, RegionId::ROOT);

        let path = fx.graph.live_edge(e01).unwrap().path;
        let halves = fx.geometry.split_path_at(path, loc(5.0, 0.0));
        let split = fx.graph.split_edge(e01, loc(5.0, 0.0), halves, owner).unwrap();
        fx.tree.on_edge_split(&split, PointId(0), owner).unwrap();

        let region = fx.tree.region(big.region).unwrap();
        assert_eq!(
            region.boundary_points,
            vec![PointId(0), split.point, PointId(1), PointId(2)]
        );
        assert_eq!(region.boundary_edges[..2], [split.first, split.second]);
        assert!(fx.tree.root().inner_points.contains(&split.point));
        fx.tree.check_partition(&fx.graph).unwrap();
    }

    #[test]
    fn test_split_reversed_edge_orders_halves() {
        let mut fx = Fixture::new(&LAYOUT[..5]);
        // The loop walks 0 -> 1 along an edge stored as 1 -> 0.
        let e10 = fx.connect(1, 0);
        let e12 = fx.connect(1, 2);
        let closing = fx.connect(2, 0);
        let closed = fx.geometry.add_path(vec![
            loc(0.0, 0.0),
            loc(10.0, 0.0),
            loc(5.0, 10.0),
            loc(0.0, 0.0),
        ]);
        let boundary = Boundary {
            edges: vec![e10, e12],
            points: vec![PointId(0), PointId(1), PointId(2)],
        };
        let outcome = fx
            .tree
            .carve(&mut fx.graph, &fx.geometry, RegionId::ROOT, &boundary, closing, closed)
            .unwrap();

        let edge = fx.graph.live_edge(e10).unwrap().clone();
        let at = loc(5.0, 0.0);
        let halves = fx.geometry.split_path_at(edge.path, at);
        let split = fx.graph.split_edge(e10, at, halves, RegionId::ROOT).unwrap();
        fx.tree.on_edge_split(&split, edge.start, RegionId::ROOT).unwrap();

        let region = fx.tree.region(outcome.region).unwrap();
        assert_eq!(
            region.boundary_points,
            vec![PointId(0), split.point, PointId(1), PointId(2)]
        );
        // 0 -> p is the second half, p -> 1 the first.
        assert_eq!(region.boundary_edges[..2], [split.second, split.first]);
        fx.tree.check_partition(&fx.graph).unwrap();
    }

    #[test]
    fn test_owner_for_free_edge_is_deeper_endpoint() {
        let mut fx = Fixture::new(&LAYOUT[..5]);
        let big = fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);
        let bridge = fx.connect(0, 3);

        assert_eq!(fx.tree.owner_for_split(&fx.graph, bridge).unwrap(), big.region);
    }

    #[test]
    fn test_is_terminal() {
        let mut fx = Fixture::new(&LAYOUT[..3]);
        assert!(!fx.tree.is_terminal(&fx.graph, TerminationRule::InteriorPairs).unwrap());

        for i in 0..2 {
            fx.graph.point_mut(PointId(i)).unwrap().active = false;
        }
        assert_eq!(fx.tree.active_interior_count(RegionId::ROOT, &fx.graph).unwrap(), 1);
        assert!(fx.tree.is_terminal(&fx.graph, TerminationRule::InteriorPairs).unwrap());
        // Point 2 still has degree 0, so it could loop back to itself.
        assert!(!fx.tree.is_terminal(&fx.graph, TerminationRule::BoundaryAware).unwrap());
    }

    #[test]
    fn test_is_terminal_checks_nested_regions() {
        let mut fx = Fixture::new(&LAYOUT[..5]);
        fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);
        for i in [0, 1, 2, 4] {
            fx.graph.point_mut(PointId(i)).unwrap().active = false;
        }
        // Only point 3 inside the triangle is left.
        assert!(fx.tree.is_terminal(&fx.graph, TerminationRule::InteriorPairs).unwrap());

        fx.graph.point_mut(PointId(4)).unwrap().active = true;
        fx.graph.point_mut(PointId(0)).unwrap().active = true;
        assert!(!fx.tree.is_terminal(&fx.graph, TerminationRule::InteriorPairs).unwrap());
    }

    #[test]
    fn test_check_partition_detects_duplicates() {
        let mut fx = Fixture::new(&LAYOUT[..5]);
        let big = fx.carve_polygon(RegionId::ROOT, &[0, 1, 2]);

        fx.tree.region_mut(big.region).unwrap().inner_points.push(PointId(4));

        let err = fx.tree.check_partition(&fx.graph).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_check_partition_detects_unowned_point() {
        let mut fx = Fixture::new(&LAYOUT[..2]);
        fx.graph.add_point(loc(1.0, 1.0), RegionId::ROOT);

        assert!(fx.tree.check_partition(&fx.graph).is_err());
    }
}
