//! Walkable path network model

pub mod components;
pub mod network;

pub use components::{PathEdge, PathNode};
pub use network::{IndexedPoint, PathGraph};
