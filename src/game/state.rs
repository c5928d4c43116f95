//! The game: graph, region tree and move protocol in one value.

use smallvec::SmallVec;
use tracing::{debug, error, info};

use super::events::GameEvent;
use crate::core::{EdgeId, GameConfig, Location, MoveRecord, MoveResult, PointId, RegionId, SproutsError};
use crate::geometry::GeometryProvider;
use crate::graph::{Edge, Graph, Point};
use crate::loops::{detect_loops, Boundary};
use crate::regions::{Region, RegionTree};

/// A game of Sprouts.
///
/// Moves follow a two-step protocol: `start_move` picks the origin point,
/// then `try_complete_move` either commits a connection or rejects it.
/// Rejections never change the board.
///
/// ## Usage
///
/// ```
/// use sprouts_engine::core::{GameConfig, PointId};
/// use sprouts_engine::game::SproutsGame;
/// use sprouts_engine::geometry::BezierGeometry;
///
/// let mut game = SproutsGame::new(GameConfig::default(), BezierGeometry::new()).unwrap();
///
/// let from = game.point(PointId::new(0)).unwrap().location;
/// let to = game.point(PointId::new(1)).unwrap().location;
/// let path = game.geometry_mut().add_path(vec![from, to]);
///
/// game.start_move(PointId::new(0)).unwrap();
/// let result = game.try_complete_move(PointId::new(1), path).unwrap();
///
/// assert!(!result.closed_loop());
/// assert!(!game.is_terminal());
/// ```
pub struct SproutsGame<G: GeometryProvider> {
    config: GameConfig,
    geometry: G,
    graph: Graph<G::Path>,
    regions: RegionTree<G::Path>,
    active: bool,
    pending: Option<PointId>,
    history: Vec<MoveRecord>,
    events: Vec<GameEvent>,
}

impl<G: GeometryProvider> SproutsGame<G> {
    /// Set up a new game with the configured starting points in the root
    /// region.
    pub fn new(config: GameConfig, geometry: G) -> Result<Self, SproutsError> {
        config.validate()?;

        let mut graph = Graph::new();
        let points = config
            .starting_locations()
            .into_iter()
            .map(|location| graph.add_point(location, RegionId::ROOT))
            .collect();
        let regions = RegionTree::new(points);

        let mut game = Self {
            config,
            geometry,
            graph,
            regions,
            active: true,
            pending: None,
            history: Vec::new(),
            events: Vec::new(),
        };
        // A single starting point has nothing to connect to.
        if game.regions.is_terminal(&game.graph, game.config.termination)? {
            game.finish();
        }
        info!(
            points = game.graph.point_count(),
            termination = ?game.config.termination,
            "game started"
        );
        Ok(game)
    }

    // === Move protocol ===

    /// Begin a move at `origin`.
    ///
    /// Replaces any move already in progress.
    pub fn start_move(&mut self, origin: PointId) -> Result<(), SproutsError> {
        if !self.active {
            return Err(SproutsError::GameOver);
        }
        if self.graph.point(origin)?.remaining_degree() == 0 {
            return Err(SproutsError::DegreeExceeded { point: origin });
        }
        debug!(%origin, "move started");
        self.pending = Some(origin);
        Ok(())
    }

    /// Abandon the move in progress, returning its origin.
    pub fn cancel_move(&mut self) -> Option<PointId> {
        let origin = self.pending.take();
        if let Some(origin) = origin {
            debug!(%origin, "move cancelled");
        }
        origin
    }

    /// Try to finish the move in progress at `candidate` along `path`.
    ///
    /// `path` must run from the origin to `candidate`. On success the edge,
    /// any regions it closes and any deactivations are committed together.
    /// On failure nothing changes. Either way the move in progress ends.
    pub fn try_complete_move(
        &mut self,
        candidate: PointId,
        path: G::Path,
    ) -> Result<MoveResult, SproutsError> {
        if !self.active {
            self.pending = None;
            return Err(SproutsError::GameOver);
        }
        let origin = self.pending.take().ok_or(SproutsError::NoMoveInProgress)?;

        let outcome = self
            .validate(origin, candidate, path)
            .and_then(|()| self.commit(origin, candidate, path));
        match &outcome {
            Ok(result) => debug!(
                %origin,
                %candidate,
                regions = result.new_regions_created.len(),
                game_over = result.game_over,
                "move committed"
            ),
            Err(err) if err.is_fatal() => error!(%origin, %candidate, %err, "move aborted"),
            Err(err) => debug!(%origin, %candidate, %err, "move rejected"),
        }
        outcome
    }

    /// Place a new point on `edge` as close to `location` as the edge allows.
    ///
    /// The edge is retired and replaced by two halves meeting at the new
    /// point, which starts at degree 2.
    pub fn place_point_mid_edge(
        &mut self,
        edge: EdgeId,
        location: Location,
    ) -> Result<PointId, SproutsError> {
        if !self.active {
            return Err(SproutsError::GameOver);
        }
        let (start, path) = {
            let e = self.graph.live_edge(edge)?;
            (e.start, e.path)
        };
        let owner = self.regions.owner_for_split(&self.graph, edge)?;
        let at = self.geometry.nearest_location_on(path, location);
        let halves = self.geometry.split_path_at(path, at);

        let mut graph = self.graph.clone();
        let mut regions = self.regions.clone();
        let split = graph.split_edge(edge, at, halves, owner)?;
        regions.on_edge_split(&split, start, owner)?;
        #[cfg(debug_assertions)]
        regions.check_partition(&graph)?;

        self.graph = graph;
        self.regions = regions;
        self.history.push(MoveRecord::PlacePoint {
            sequence: self.history.len() as u32,
            point: split.point,
            split: edge,
            halves: (split.first, split.second),
        });
        self.events.push(GameEvent::PointPlaced {
            point: split.point,
            edge,
        });
        debug!(point = %split.point, %edge, region = %owner, "point placed");
        Ok(split.point)
    }

    fn validate(&self, origin: PointId, candidate: PointId, path: G::Path) -> Result<(), SproutsError> {
        let from = self.graph.point(origin)?;
        let to = self.graph.point(candidate)?;
        if origin == candidate {
            if from.remaining_degree() < 2 {
                return Err(SproutsError::DegreeExceeded { point: origin });
            }
        } else if from.remaining_degree() == 0 {
            return Err(SproutsError::DegreeExceeded { point: origin });
        } else if to.remaining_degree() == 0 {
            return Err(SproutsError::DegreeExceeded { point: candidate });
        }

        if self.geometry.self_intersects(path) {
            return Err(SproutsError::SelfIntersection);
        }
        let clearance = self.config.point_clearance;
        if let Some(point) = self.graph.points().find(|p| {
            p.id != origin
                && p.id != candidate
                && self
                    .geometry
                    .nearest_location_on(path, p.location)
                    .approx_eq(p.location, clearance)
        }) {
            return Err(SproutsError::PassesThroughPoint { point: point.id });
        }
        if let Some(edge) = self
            .graph
            .live_edges()
            .find(|e| self.geometry.paths_intersect(path, e.path))
        {
            return Err(SproutsError::CrossesEdge { edge: edge.id });
        }
        Ok(())
    }

    /// Apply a validated move to copies of the graph and region tree, then
    /// swap them in.
    fn commit(
        &mut self,
        origin: PointId,
        candidate: PointId,
        path: G::Path,
    ) -> Result<MoveResult, SproutsError> {
        let mut graph = self.graph.clone();
        let mut regions = self.regions.clone();

        let boundaries = detect_loops(&graph, origin, candidate)?;
        let edge = graph.add_edge(origin, candidate, path)?;

        let mut result = MoveResult {
            edge: Some(edge),
            ..MoveResult::default()
        };
        let mut carved: SmallVec<[(RegionId, RegionId); 2]> = SmallVec::new();

        if !boundaries.is_empty() {
            let face = regions.face_containing(&self.geometry, self.geometry.sample_point(path))?;
            for boundary in &boundaries {
                let parent = regions.carve_parent(&graph, face, boundary, &result.new_regions_created)?;
                let closed = self.closed_path(&graph, path, boundary)?;
                let outcome = regions.carve(&mut graph, &self.geometry, parent, boundary, edge, closed)?;
                result.new_regions_created.push(outcome.region);
                carved.push((outcome.region, parent));
            }
        }

        let mut endpoints: SmallVec<[PointId; 2]> = SmallVec::new();
        endpoints.push(origin);
        if candidate != origin {
            endpoints.push(candidate);
        }
        for &point in &endpoints {
            if graph.deactivate_if_saturated(point)? {
                result.deactivated_points.push(point);
            }
        }

        #[cfg(debug_assertions)]
        regions.check_partition(&graph)?;
        let terminal = regions.is_terminal(&graph, self.config.termination)?;

        self.graph = graph;
        self.regions = regions;
        self.history.push(MoveRecord::Connect {
            sequence: self.history.len() as u32,
            origin,
            candidate,
            edge,
            regions: result.new_regions_created.clone(),
        });
        self.events.push(GameEvent::EdgeCommitted {
            edge,
            origin,
            candidate,
        });
        for (region, parent) in carved {
            self.events.push(GameEvent::RegionCreated { region, parent });
        }
        for &point in &result.deactivated_points {
            self.events.push(GameEvent::PointDeactivated { point });
        }
        if terminal {
            self.finish();
            result.game_over = true;
        }
        Ok(result)
    }

    /// The drawn path followed by each boundary edge, closing the loop.
    fn closed_path(
        &mut self,
        graph: &Graph<G::Path>,
        drawn: G::Path,
        boundary: &Boundary,
    ) -> Result<G::Path, SproutsError> {
        let mut closed = self.geometry.clone_path(drawn);
        for &edge in &boundary.edges {
            let next = graph.live_edge(edge)?.path;
            closed = self.geometry.join_paths(closed, next);
        }
        Ok(closed)
    }

    fn finish(&mut self) {
        if self.active {
            self.active = false;
            self.pending = None;
            self.events.push(GameEvent::GameOver);
            info!(moves = self.history.len(), "game over");
        }
    }

    // === Status ===

    /// Check if the game has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.active
    }

    /// Check if moves are still accepted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Re-run the termination check against the current board.
    pub fn evaluate_terminal(&self) -> Result<bool, SproutsError> {
        self.regions.is_terminal(&self.graph, self.config.termination)
    }

    /// Origin of the move in progress.
    #[must_use]
    pub fn pending_origin(&self) -> Option<PointId> {
        self.pending
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Committed moves and placements, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable access to the geometry provider, for building drawn paths.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    #[must_use]
    pub fn graph(&self) -> &Graph<G::Path> {
        &self.graph
    }

    #[must_use]
    pub fn region_tree(&self) -> &RegionTree<G::Path> {
        &self.regions
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.graph.points()
    }

    pub fn point(&self, id: PointId) -> Result<&Point, SproutsError> {
        self.graph.point(id)
    }

    /// Edges that have not been split.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<G::Path>> {
        self.graph.live_edges()
    }

    /// Get an edge, including retired ones.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<G::Path>> {
        self.graph.edge(id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region<G::Path>> {
        self.regions.iter()
    }

    pub fn region(&self, id: RegionId) -> Result<&Region<G::Path>, SproutsError> {
        self.regions.region(id)
    }

    #[must_use]
    pub fn root_region(&self) -> &Region<G::Path> {
        self.regions.root()
    }
}
