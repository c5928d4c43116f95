//! Game events.
//!
//! The game queues an event for every observable change so a presentation
//! layer can redraw incrementally instead of diffing whole snapshots. The
//! queue is drained with `SproutsGame::drain_events`.

use serde::{Deserialize, Serialize};

use crate::core::{EdgeId, PointId, RegionId};

/// Something that happened during a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A connection was committed as `edge`.
    EdgeCommitted {
        edge: EdgeId,
        origin: PointId,
        candidate: PointId,
    },

    /// A loop closed and carved `region` out of `parent`.
    RegionCreated { region: RegionId, parent: RegionId },

    /// A point was placed on `edge`, which is now retired.
    PointPlaced { point: PointId, edge: EdgeId },

    /// A point reached the degree cap.
    PointDeactivated { point: PointId },

    /// No legal move remains. Emitted once per game.
    GameOver,
}

impl GameEvent {
    /// Check if this is the terminal event.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameEvent::GameOver)
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::EdgeCommitted {
                edge,
                origin,
                candidate,
            } => write!(f, "{} committed between {} and {}", edge, origin, candidate),
            GameEvent::RegionCreated { region, parent } => {
                write!(f, "{} created inside {}", region, parent)
            }
            GameEvent::PointPlaced { point, edge } => write!(f, "{} placed on {}", point, edge),
            GameEvent::PointDeactivated { point } => write!(f, "{} deactivated", point),
            GameEvent::GameOver => write!(f, "game over"),
        }
    }
}
