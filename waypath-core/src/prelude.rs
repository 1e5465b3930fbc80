pub use crate::OFF_PATH_THRESHOLD; // meters
pub use crate::WALKING_SPEED; // meters per second

// Re-export key components
pub use crate::Error;
pub use crate::loading::{
    NavModelConfig, create_nav_model, location_index_from_csv, path_graph_from_geojson,
};
pub use crate::model::{Location, LocationCategory, LocationIndex, NavModel, PathGraph};
pub use crate::routing::{
    Maneuver, ManeuverType, Route, RoutePoint, RouteStep, TurnDirection, direct_route,
    graph_route, graph_route_to_location, route_between, route_to_location,
};
