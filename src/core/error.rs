//! Error taxonomy for move handling.
//!
//! Rejections (`DegreeExceeded`, `SelfIntersection`, `CrossesEdge`, ...)
//! are ordinary user-level outcomes: the move is a no-op and the caller
//! discards whatever it drew. `InvariantViolation` is different. It means
//! the region tree would become inconsistent, and the commit that raised it
//! is abandoned wholesale.

use thiserror::Error;

use super::{EdgeId, PointId, RegionId};

/// Errors produced by the engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SproutsError {
    /// The point already carries the maximum number of edges.
    #[error("{point} has no remaining degree")]
    DegreeExceeded { point: PointId },

    /// The drawn path crosses itself.
    #[error("drawn path crosses itself")]
    SelfIntersection,

    /// The drawn path crosses an existing edge.
    #[error("drawn path crosses {edge}")]
    CrossesEdge { edge: EdgeId },

    /// The drawn path runs through a point other than its two ends.
    #[error("drawn path passes through {point}")]
    PassesThroughPoint { point: PointId },

    /// `try_complete_move` was called without a pending `start_move`.
    #[error("no move in progress")]
    NoMoveInProgress,

    /// The game has ended; only read-only queries are allowed.
    #[error("game is over")]
    GameOver,

    #[error("unknown point {0}")]
    UnknownPoint(PointId),

    /// The edge does not exist or was retired by a split.
    #[error("unknown or retired edge {0}")]
    UnknownEdge(EdgeId),

    #[error("unknown region {0}")]
    UnknownRegion(RegionId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal consistency breach. Not recoverable by the player.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl SproutsError {
    /// Check if this error indicates a programming error rather than an
    /// illegal move.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, SproutsError::InvariantViolation(_))
    }
}
