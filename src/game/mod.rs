//! Game state and move protocol.
//!
//! `SproutsGame` owns one board: the point/edge graph, the region tree, the
//! geometry provider that holds every drawn path, and the move history.
//!
//! ## Moves
//!
//! A connection is a two-step exchange with the host:
//!
//! 1. `start_move(origin)` when the user begins drawing.
//! 2. `try_complete_move(candidate, path)` when the user releases on a point.
//!
//! The second step validates the drawn path, then commits the edge, any
//! regions it closes and any deactivations as one unit. A rejected move
//! leaves no trace. Graph and region tree are persistent structures, so the
//! commit works on copies and swaps them in only once everything succeeded.
//!
//! Points are added to the board with `place_point_mid_edge`.
//!
//! ## Termination
//!
//! After every committed connection the game checks whether any region can
//! still host a move. Once none can, the game is over for good and queues a
//! single `GameEvent::GameOver`.

mod events;
mod state;

pub use events::GameEvent;
pub use state::SproutsGame;
