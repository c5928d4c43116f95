//! Region tree.
//!
//! Every closed loop drawn on the board carves a new region out of the
//! region it was drawn in. Regions nest, so they form a tree rooted at the
//! whole plane. Each point is an interior point of exactly one region at all
//! times; points on a loop stay with the region the loop was drawn in.
//!
//! ## Carving
//!
//! When a loop closes, `RegionTree::carve` creates the child region and
//! moves into it every interior point of the parent that the loop encloses.
//! Existing child regions that sit inside the loop move under the new region
//! as a whole, without re-testing their members.
//!
//! ## Termination
//!
//! A move needs two active points that can see each other, so the game ends
//! when no region holds two active points. See `RegionTree::is_terminal`.

mod region;
mod tree;

pub use region::Region;
pub use tree::{CarveOutcome, RegionTree};
