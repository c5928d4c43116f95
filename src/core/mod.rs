//! Core engine types: identifiers, locations, configuration, errors and
//! move records.
//!
//! Nothing in here knows about graph structure or regions; the other
//! modules build on these types.

pub mod ids;
pub mod location;
pub mod point_map;
pub mod config;
pub mod error;
pub mod record;

pub use ids::{EdgeId, PointId, RegionId};
pub use location::Location;
pub use point_map::PointMap;
pub use config::{GameConfig, TerminationRule};
pub use error::SproutsError;
pub use record::{MoveRecord, MoveResult};
