//! Geometry provider interface.
//!
//! The engine never computes geometry itself. Splitting a drawn line,
//! testing whether a loop encloses a point, or checking that a new line does
//! not cross an old one are all delegated to a `GeometryProvider`. Hosts
//! with their own vector library (a canvas, an SVG editor) implement the
//! trait over their path objects; `BezierGeometry` is a self-contained
//! implementation over `kurbo` Bézier paths.
//!
//! ## Path handles
//!
//! The provider owns path data. The engine only stores `Self::Path`
//! handles, which must be cheap to copy. Operations that produce a new
//! path (split, clone, join) allocate it inside the provider and return a
//! fresh handle; existing handles are never mutated.

mod bezier;

pub use bezier::{BezierGeometry, PathHandle};

use crate::core::Location;

/// Geometry primitives the engine consumes.
pub trait GeometryProvider {
    /// Handle to a path owned by the provider.
    type Path: Copy + Eq + std::hash::Hash + std::fmt::Debug;

    /// Split `path` at `at` (assumed to lie on it), returning the part from
    /// the path's start to `at` and the part from `at` to its end.
    fn split_path_at(&mut self, path: Self::Path, at: Location) -> (Self::Path, Self::Path);

    /// The location on `path` closest to `to`.
    fn nearest_location_on(&self, path: Self::Path, to: Location) -> Location;

    /// Check if two paths cross. Contact at a location that is an endpoint
    /// of both paths does not count.
    fn paths_intersect(&self, a: Self::Path, b: Self::Path) -> bool;

    /// Check if a path crosses itself. A closed path meeting itself only at
    /// its start/end does not count.
    fn self_intersects(&self, path: Self::Path) -> bool;

    /// Check if the closed shape outlined by `path` contains `location`.
    fn path_contains(&self, path: Self::Path, location: Location) -> bool;

    /// Copy a path into a new handle.
    fn clone_path(&mut self, path: Self::Path) -> Self::Path;

    /// Join two paths end to end into a new path, reversing `b` if needed
    /// so that the shared endpoint lines up.
    fn join_paths(&mut self, a: Self::Path, b: Self::Path) -> Self::Path;

    /// A location on `path` away from its endpoints.
    fn sample_point(&self, path: Self::Path) -> Location;
}
