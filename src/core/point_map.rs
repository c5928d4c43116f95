//! Per-point side tables.
//!
//! Presentation layers attach their own data to points (shapes, colors,
//! hover state) without it becoming part of the core `Point` record.
//! `PointMap<T>` is a dense table indexed by `PointId` that grows as new
//! points appear.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::PointId;

/// Per-point data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use sprouts_engine::core::{PointId, PointMap};
///
/// let mut labels: PointMap<String> = PointMap::new();
/// labels.insert(PointId::new(2), "c".to_string());
///
/// assert_eq!(labels.get(PointId::new(2)).map(String::as_str), Some("c"));
/// assert_eq!(labels.get(PointId::new(0)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointMap<T> {
    data: Vec<Option<T>>,
}

impl<T> Default for PointMap<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> PointMap<T> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map with an entry for each of the first `count` points.
    pub fn with_factory(count: usize, factory: impl Fn(PointId) -> T) -> Self {
        let data = (0..count as u32)
            .map(|i| Some(factory(PointId(i))))
            .collect();
        Self { data }
    }

    /// Insert or replace the value for a point, returning the old value.
    pub fn insert(&mut self, point: PointId, value: T) -> Option<T> {
        if point.index() >= self.data.len() {
            self.data.resize_with(point.index() + 1, || None);
        }
        self.data[point.index()].replace(value)
    }

    /// Remove the value for a point.
    pub fn remove(&mut self, point: PointId) -> Option<T> {
        self.data.get_mut(point.index()).and_then(Option::take)
    }

    /// Get the value for a point.
    #[must_use]
    pub fn get(&self, point: PointId) -> Option<&T> {
        self.data.get(point.index()).and_then(Option::as_ref)
    }

    /// Get a mutable value for a point.
    pub fn get_mut(&mut self, point: PointId) -> Option<&mut T> {
        self.data.get_mut(point.index()).and_then(Option::as_mut)
    }

    /// Check if a point has a value.
    #[must_use]
    pub fn contains(&self, point: PointId) -> bool {
        self.get(point).is_some()
    }

    /// Number of points with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.iter().filter(|v| v.is_some()).count()
    }

    /// Check if no point has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over (PointId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &T)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (PointId(i as u32), v)))
    }
}

impl<T> Index<PointId> for PointMap<T> {
    type Output = T;

    fn index(&self, point: PointId) -> &Self::Output {
        match self.get(point) {
            Some(value) => value,
            None => panic!("no entry for {}", point),
        }
    }
}

impl<T> IndexMut<PointId> for PointMap<T> {
    fn index_mut(&mut self, point: PointId) -> &mut Self::Output {
        match self.get_mut(point) {
            Some(value) => value,
            None => panic!("no entry for {}", point),
        }
    }
}
