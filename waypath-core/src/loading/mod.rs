//! This module is responsible for loading campus data (GeoJSON path survey,
//! CSV location catalog) and building the navigation model.

mod builder;
mod config;
pub mod locations;
pub mod paths;

pub use builder::create_nav_model;
pub use config::NavModelConfig;
pub use locations::location_index_from_csv;
pub use paths::path_graph_from_geojson;
