//! Point/edge graph.
//!
//! The graph owns every point and edge of a game and enforces the degree
//! cap. It knows nothing about regions beyond the owner id stored on each
//! point; the region tree keeps that id current.
//!
//! ## Degree
//!
//! A point's degree is the length of its edge list. A loop from a point back
//! to itself is listed twice and so costs two degree. No list ever grows past
//! `MAX_DEGREE`.

mod point;
mod store;

pub use point::{Edge, Point, MAX_DEGREE};
pub use store::{EdgeSplit, Graph};
