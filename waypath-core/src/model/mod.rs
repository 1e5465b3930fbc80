//! Data model for campus wayfinding
//!
//! Contains the walkable path network, the location catalog and the
//! combined navigation model.

pub mod locations;
pub mod nav_model;
pub mod paths;

pub use locations::{Location, LocationCategory, LocationIndex};
pub use nav_model::NavModel;
pub use paths::{PathEdge, PathGraph, PathNode};
