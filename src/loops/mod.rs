//! Loop detection.
//!
//! When a new line joins two points that are already connected, it closes
//! one or more loops. The detector walks the existing graph from the
//! candidate endpoint back to the origin and reports each walk it finds as
//! a `Boundary`.
//!
//! The search runs before the new edge is inserted, so the walk can only
//! use edges that already exist.

mod detector;

pub use detector::{detect_loops, Boundary, LoopDetector, LoopSearch};
