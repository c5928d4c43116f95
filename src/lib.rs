//! # sprouts-engine
//!
//! Rules engine for the pencil-and-paper game Sprouts.
//!
//! Players take turns joining points with curves. A point can carry at most
//! three line ends, curves may not cross, and every new curve gets a new
//! point placed on it. Whoever cannot move loses.
//!
//! ## Design Principles
//!
//! 1. **Geometry-Agnostic**: The engine never looks at pixels or curve
//!    shapes. All path questions (crossing, containment, splitting) go
//!    through a `GeometryProvider` the host supplies.
//!
//! 2. **Explicit Rejection**: Every invalid move comes back as a
//!    `SproutsError` and leaves the board untouched.
//!
//! 3. **Flat Arenas**: Points, edges and regions live in `im` vectors and
//!    refer to each other by id. No back-references, O(1) snapshots.
//!
//! ## Modules
//!
//! - `core`: Ids, locations, configuration, errors, move records
//! - `geometry`: The `GeometryProvider` seam and a kurbo-backed implementation
//! - `graph`: Points and edges with the degree cap
//! - `loops`: Detection of loops closed by a new edge
//! - `regions`: The region tree
//! - `game`: `SproutsGame`, the move protocol and game events

pub mod core;
pub mod geometry;
pub mod graph;
pub mod loops;
pub mod regions;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    EdgeId, PointId, RegionId, PointMap,
    Location,
    GameConfig, TerminationRule,
    SproutsError,
    MoveRecord, MoveResult,
};

pub use crate::geometry::{BezierGeometry, GeometryProvider, PathHandle};

pub use crate::graph::{Edge, EdgeSplit, Graph, Point, MAX_DEGREE};

pub use crate::loops::{detect_loops, Boundary, LoopDetector, LoopSearch};

pub use crate::regions::{CarveOutcome, Region, RegionTree};

pub use crate::game::{GameEvent, SproutsGame};
