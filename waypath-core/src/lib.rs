//! Campus wayfinding over a surveyed path network.
//!
//! `waypath_core` builds a walkable road graph from a GeoJSON survey, snaps
//! arbitrary coordinates onto it and plans turn-by-turn walking routes
//! between coordinates or towards named campus locations. Routing always
//! produces a drawable route: when the network cannot answer (no data, the
//! endpoints sit in disconnected fragments) the planner degrades to a
//! straight line between the endpoints instead of failing.
//!
//! # Example
//!
//! ```no_run
//! use geo::Point;
//! use waypath_core::{NavModelConfig, create_nav_model, route_between};
//!
//! # fn main() -> Result<(), waypath_core::Error> {
//! let config = NavModelConfig {
//!     paths_path: "data/campus_paths.geojson".into(),
//!     locations_path: "data/campus_locations.csv".into(),
//! };
//! let model = create_nav_model(&config)?;
//!
//! let from = Point::new(79.0049, 21.1035);
//! let to = Point::new(79.0065, 21.1060);
//! let route = route_between(&model, from, to);
//! println!("{} ({})", route.distance_text(), route.duration_text());
//! # Ok(())
//! # }
//! ```

mod error;
mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{NavModelConfig, create_nav_model};
pub use model::{NavModel, PathGraph};
pub use routing::{
    Route, RouteStep, direct_route, graph_route, graph_route_to_location, route_between,
    route_to_location,
};

/// Average walking speed used for every duration estimate, meters per second
pub const WALKING_SPEED: f64 = 1.4;

/// Endpoints farther than this from their snap node get a spliced connector
/// segment at the start or end of the route, meters
pub const OFF_PATH_THRESHOLD: f64 = 5.0;
