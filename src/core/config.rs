//! Game configuration.
//!
//! The only rule-level input is the starting layout: how many points the
//! game opens with and where they sit. Everything else (degree cap,
//! region bookkeeping) is fixed by the rules of Sprouts.
//!
//! Configs deserialize from partial input; missing fields take their
//! defaults.

use serde::{Deserialize, Serialize};

use super::{Location, SproutsError};

/// How the terminal check decides whether a region still admits a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationRule {
    /// A region is live while it has two or more active interior points.
    #[default]
    InteriorPairs,
    /// Also count active points on the region's own boundary, and let a
    /// single point with degree <= 1 keep a region live (it can still loop
    /// back to itself).
    BoundaryAware,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of points placed at game start.
    pub starting_point_count: usize,

    /// Radius of the circle the starting points are spread on.
    pub layout_radius: f64,

    /// Center of the starting circle.
    pub center: Location,

    /// Terminal-state rule.
    pub termination: TerminationRule,

    /// A drawn path that comes this close to a point other than its ends
    /// is treated as passing through it.
    pub point_clearance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_point_count: 6,
            layout_radius: 150.0,
            center: Location::default(),
            termination: TerminationRule::default(),
            point_clearance: 1e-6,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the given number of starting points.
    pub fn new(starting_point_count: usize) -> Self {
        Self {
            starting_point_count,
            ..Self::default()
        }
    }

    /// Set the layout radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.layout_radius = radius;
        self
    }

    /// Set the layout center.
    #[must_use]
    pub fn with_center(mut self, center: Location) -> Self {
        self.center = center;
        self
    }

    /// Set the terminal-state rule.
    #[must_use]
    pub fn with_termination(mut self, rule: TerminationRule) -> Self {
        self.termination = rule;
        self
    }

    /// Set the distance under which a path is said to touch a point.
    #[must_use]
    pub fn with_point_clearance(mut self, clearance: f64) -> Self {
        self.point_clearance = clearance;
        self
    }

    /// Check the configuration for values the engine cannot lay out.
    pub fn validate(&self) -> Result<(), SproutsError> {
        if self.starting_point_count == 0 {
            return Err(SproutsError::InvalidConfig(
                "starting_point_count must be positive".to_string(),
            ));
        }
        if self.starting_point_count > u32::MAX as usize / 2 {
            return Err(SproutsError::InvalidConfig(format!(
                "starting_point_count {} is too large",
                self.starting_point_count
            )));
        }
        if !self.layout_radius.is_finite() || self.layout_radius <= 0.0 {
            return Err(SproutsError::InvalidConfig(format!(
                "layout_radius must be positive and finite, got {}",
                self.layout_radius
            )));
        }
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(SproutsError::InvalidConfig("center must be finite".to_string()));
        }
        if !self.point_clearance.is_finite() || self.point_clearance < 0.0 {
            return Err(SproutsError::InvalidConfig(format!(
                "point_clearance must be non-negative and finite, got {}",
                self.point_clearance
            )));
        }
        Ok(())
    }

    /// Starting point locations, evenly spaced on the layout circle.
    ///
    /// Point 0 sits straight above the center (negative y), and the rest
    /// follow clockwise in screen coordinates.
    #[must_use]
    pub fn starting_locations(&self) -> Vec<Location> {
        let n = self.starting_point_count;
        (0..n)
            .map(|i| {
                let angle = i as f64 * 2.0 * std::f64::consts::PI / n as f64;
                Location::new(
                    self.center.x + angle.sin() * self.layout_radius,
                    self.center.y - angle.cos() * self.layout_radius,
                )
            })
            .collect()
    }
}
