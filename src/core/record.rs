//! Move outcomes and history.
//!
//! A committed connection returns a `MoveResult` to the caller and leaves a
//! `MoveRecord` in the game history. Mid-edge point placements are recorded
//! in the same history so the sequence of mutations can be replayed by a
//! presentation layer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{EdgeId, PointId, RegionId};

/// What an accepted connection did to the game.
///
/// Rejected connections never produce a `MoveResult`; they surface as a
/// `SproutsError` and leave the game untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// The committed edge.
    pub edge: Option<EdgeId>,

    /// Points created by the move. Connections never create points (they
    /// are placed separately on an edge), so this is empty unless a host
    /// folds a placement into the same step.
    pub new_points_created: Vec<PointId>,

    /// Regions carved out by loops the move closed.
    pub new_regions_created: SmallVec<[RegionId; 2]>,

    /// Points that reached the degree cap with this move.
    pub deactivated_points: SmallVec<[PointId; 2]>,

    /// The move left no legal continuation.
    pub game_over: bool,
}

impl MoveResult {
    /// Did the move close at least one loop?
    #[must_use]
    pub fn closed_loop(&self) -> bool {
        !self.new_regions_created.is_empty()
    }
}

/// One entry of the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRecord {
    /// Two points (or one point with itself) were connected.
    Connect {
        sequence: u32,
        origin: PointId,
        candidate: PointId,
        edge: EdgeId,
        regions: SmallVec<[RegionId; 2]>,
    },
    /// A point was placed on an existing edge.
    PlacePoint {
        sequence: u32,
        point: PointId,
        split: EdgeId,
        halves: (EdgeId, EdgeId),
    },
}

impl MoveRecord {
    /// Position of this record in the history.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        match self {
            MoveRecord::Connect { sequence, .. } | MoveRecord::PlacePoint { sequence, .. } => {
                *sequence
            }
        }
    }
}
