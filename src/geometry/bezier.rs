//! Arena-backed Bézier geometry.
//!
//! Paths are `kurbo::BezPath` values stored in a flat `Vec` and referenced
//! by `PathHandle` indices, mirroring how the engine stores its own points
//! and edges. Paths are immutable once allocated. Straight strokes go in
//! through `add_path`, freehand curves through `add_curve`.
//!
//! ## Tolerances
//!
//! `epsilon` decides when two endpoints are the same location. `accuracy`
//! is handed to kurbo for flattening, nearest-point and arc length
//! queries. Straight segments are exact regardless of `accuracy`.

use kurbo::{
    BezPath, Line, ParamCurve, ParamCurveArclen, ParamCurveNearest, PathEl, PathSeg, Point, Shape,
};
use serde::{Deserialize, Serialize};

use super::GeometryProvider;
use crate::core::Location;

const DEFAULT_EPSILON: f64 = 1e-6;
const DEFAULT_ACCURACY: f64 = 1e-3;

impl From<Location> for Point {
    fn from(location: Location) -> Self {
        Point::new(location.x, location.y)
    }
}

impl From<Point> for Location {
    fn from(point: Point) -> Self {
        Location::new(point.x, point.y)
    }
}

/// Handle to a path stored in a `BezierGeometry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathHandle(pub u32);

impl PathHandle {
    /// Arena index for this path.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// kurbo implementation of `GeometryProvider`.
///
/// ## Usage
///
/// ```
/// use kurbo::BezPath;
/// use sprouts_engine::core::Location;
/// use sprouts_engine::geometry::{BezierGeometry, GeometryProvider};
///
/// let mut geometry = BezierGeometry::new();
/// let square = geometry.add_path(vec![
///     Location::new(0.0, 0.0),
///     Location::new(10.0, 0.0),
///     Location::new(10.0, 10.0),
///     Location::new(0.0, 10.0),
///     Location::new(0.0, 0.0),
/// ]);
/// assert!(geometry.path_contains(square, Location::new(5.0, 5.0)));
/// assert!(!geometry.path_contains(square, Location::new(15.0, 5.0)));
///
/// let mut arc = BezPath::new();
/// arc.move_to((0.0, 0.0));
/// arc.quad_to((5.0, 10.0), (10.0, 0.0));
/// let arc = geometry.add_curve(arc);
/// assert!(geometry.path_contains(arc, Location::new(5.0, 2.0)));
/// ```
#[derive(Clone, Debug)]
pub struct BezierGeometry {
    paths: Vec<BezPath>,
    epsilon: f64,
    accuracy: f64,
}

impl Default for BezierGeometry {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            epsilon: DEFAULT_EPSILON,
            accuracy: DEFAULT_ACCURACY,
        }
    }
}

impl BezierGeometry {
    /// Create an empty geometry arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance used for endpoint matching.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the accuracy used for flattening and curve queries.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Store a straight-segment path through `points`.
    pub fn add_path(&mut self, points: impl IntoIterator<Item = Location>) -> PathHandle {
        let mut path = BezPath::new();
        for (i, location) in points.into_iter().enumerate() {
            if i == 0 {
                path.move_to(Point::from(location));
            } else {
                path.line_to(Point::from(location));
            }
        }
        self.add_curve(path)
    }

    /// Store an arbitrary Bézier path.
    pub fn add_curve(&mut self, path: BezPath) -> PathHandle {
        let handle = PathHandle(self.paths.len() as u32);
        self.paths.push(path);
        handle
    }

    /// Get a stored path.
    ///
    /// Panics if the handle did not come from this arena.
    #[must_use]
    pub fn path(&self, handle: PathHandle) -> &BezPath {
        &self.paths[handle.index()]
    }

    /// Number of stored paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if no paths are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Arc length of a stored path.
    #[must_use]
    pub fn length(&self, handle: PathHandle) -> f64 {
        self.path(handle).segments().map(|seg| seg.arclen(self.accuracy)).sum()
    }

    /// Location at `fraction` of the path's arc length (clamped to 0..=1).
    #[must_use]
    pub fn point_along(&self, handle: PathHandle, fraction: f64) -> Location {
        let path = self.path(handle);
        let lengths: Vec<(PathSeg, f64)> = path
            .segments()
            .map(|seg| (seg, seg.arclen(self.accuracy)))
            .collect();
        let total: f64 = lengths.iter().map(|(_, len)| len).sum();
        let mut remaining = total * fraction.clamp(0.0, 1.0);
        for &(seg, len) in &lengths {
            if len > 0.0 && remaining <= len {
                let t = seg.inv_arclen(remaining, self.accuracy);
                return seg.eval(t).into();
            }
            remaining -= len;
        }
        endpoints(path).map_or_else(Location::default, |(_, end)| end.into())
    }

    /// Segment index and parameter of the point on `segments` closest to `to`.
    fn nearest_param(&self, segments: &[PathSeg], to: Point) -> Option<(usize, f64)> {
        segments
            .iter()
            .enumerate()
            .map(|(i, seg)| (i, seg.nearest(to, self.accuracy)))
            .min_by(|(_, a), (_, b)| {
                a.distance_sq
                    .partial_cmp(&b.distance_sq)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, nearest)| (i, nearest.t))
    }

    /// The path flattened to straight lines, skipping zero-length ones.
    fn flatten(&self, path: &BezPath) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut last: Option<Point> = None;
        path.flatten(self.accuracy, |el| match el {
            PathEl::MoveTo(p) => last = Some(p),
            PathEl::LineTo(p) => {
                if let Some(from) = last {
                    if from != p {
                        lines.push(Line::new(from, p));
                    }
                }
                last = Some(p);
            }
            _ => {}
        });
        lines
    }

    fn near(&self, a: Point, b: Point) -> bool {
        (a - b).hypot2() <= self.epsilon * self.epsilon
    }

    fn is_shared_endpoint(&self, at: Point, a: &BezPath, b: &BezPath) -> bool {
        let touches = |path: &BezPath| {
            endpoints(path).is_some_and(|(start, end)| self.near(start, at) || self.near(end, at))
        };
        touches(a) && touches(b)
    }
}

impl GeometryProvider for BezierGeometry {
    type Path = PathHandle;

    fn split_path_at(&mut self, path: PathHandle, at: Location) -> (PathHandle, PathHandle) {
        let segments: Vec<PathSeg> = self.path(path).segments().collect();
        let Some((index, t)) = self.nearest_param(&segments, at.into()) else {
            return (self.clone_path(path), self.clone_path(path));
        };

        let mut first = BezPath::new();
        for &seg in &segments[..index] {
            push_segment(&mut first, seg);
        }
        push_segment(&mut first, segments[index].subsegment(0.0..t));

        let mut second = BezPath::new();
        push_segment(&mut second, segments[index].subsegment(t..1.0));
        for &seg in &segments[index + 1..] {
            push_segment(&mut second, seg);
        }

        (self.add_curve(first), self.add_curve(second))
    }

    fn nearest_location_on(&self, path: PathHandle, to: Location) -> Location {
        let segments: Vec<PathSeg> = self.path(path).segments().collect();
        self.nearest_param(&segments, to.into())
            .map_or(to, |(i, t)| segments[i].eval(t).into())
    }

    fn paths_intersect(&self, a: PathHandle, b: PathHandle) -> bool {
        if a == b {
            return self.self_intersects(a);
        }
        let (pa, pb) = (self.path(a), self.path(b));
        let lines = self.flatten(pb);
        pa.segments().any(|seg| {
            lines.iter().any(|&line| {
                seg.intersect_line(line)
                    .iter()
                    .any(|hit| !self.is_shared_endpoint(line.eval(hit.line_t), pa, pb))
            })
        })
    }

    fn self_intersects(&self, path: PathHandle) -> bool {
        let bez = self.path(path);
        let lines = self.flatten(bez);
        let n = lines.len();
        let start = endpoints(bez).map(|(start, _)| start);
        let closed = n > 1 && endpoints(bez).is_some_and(|(s, e)| self.near(s, e));

        for i in 0..n {
            for j in (i + 2)..n {
                for hit in PathSeg::Line(lines[i]).intersect_line(lines[j]) {
                    let at = lines[j].eval(hit.line_t);
                    let at_seam =
                        closed && i == 0 && j == n - 1 && start.is_some_and(|s| self.near(s, at));
                    if !at_seam {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn path_contains(&self, path: PathHandle, location: Location) -> bool {
        let mut closed = self.path(path).clone();
        closed.close_path();
        closed.contains(location.into())
    }

    fn clone_path(&mut self, path: PathHandle) -> PathHandle {
        let copy = self.path(path).clone();
        self.add_curve(copy)
    }

    fn join_paths(&mut self, a: PathHandle, b: PathHandle) -> PathHandle {
        let (pa, pb) = (self.path(a), self.path(b));
        let forward = |p: &BezPath| p.segments().collect::<Vec<_>>();
        let backward = |p: &BezPath| {
            let mut segments: Vec<PathSeg> = p.segments().map(|s| s.reverse()).collect();
            segments.reverse();
            segments
        };

        let (head, tail) = match (endpoints(pa), endpoints(pb)) {
            (Some((a0, a1)), Some((b0, b1))) => {
                if self.near(a1, b0) {
                    (forward(pa), forward(pb))
                } else if self.near(a1, b1) {
                    (forward(pa), backward(pb))
                } else if self.near(a0, b1) {
                    (forward(pb), forward(pa))
                } else if self.near(a0, b0) {
                    (backward(pb), forward(pa))
                } else {
                    (forward(pa), forward(pb))
                }
            }
            _ => (forward(pa), forward(pb)),
        };

        let mut joined = BezPath::new();
        for seg in head.into_iter().chain(tail) {
            push_segment(&mut joined, seg);
        }
        self.add_curve(joined)
    }

    fn sample_point(&self, path: PathHandle) -> Location {
        self.point_along(path, 0.5)
    }
}

/// First and last on-curve points of a path.
fn endpoints(path: &BezPath) -> Option<(Point, Point)> {
    let start = path.segments().next()?.start();
    let end = path.segments().last()?.end();
    Some((start, end))
}

/// Append `seg` to `path`, continuing from the current end point.
fn push_segment(path: &mut BezPath, seg: PathSeg) {
    if path.elements().is_empty() {
        path.move_to(seg.start());
    }
    match seg {
        PathSeg::Line(line) => path.line_to(line.p1),
        PathSeg::Quad(quad) => path.quad_to(quad.p1, quad.p2),
        PathSeg::Cubic(cubic) => path.curve_to(cubic.p1, cubic.p2, cubic.p3),
    }
}
