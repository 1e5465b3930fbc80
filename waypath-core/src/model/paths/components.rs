//! Path network components - nodes and edges of the walkable graph

use geo::{LineString, Point};

use crate::WALKING_SPEED;

/// Path graph node (junction or segment endpoint)
#[derive(Debug, Clone)]
pub struct PathNode {
    /// Sequential id assigned at graph construction
    pub id: u32,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Path graph edge (one direction of a walkable segment)
#[derive(Debug, Clone)]
pub struct PathEdge {
    /// Cumulative haversine length of the polyline in meters
    pub distance: f64,
    /// Full polyline of the physical path, oriented from edge source to target
    pub geometry: LineString<f64>,
}

impl PathEdge {
    /// Unrounded crossing time in seconds at campus walking speed
    #[must_use]
    pub fn walking_time(&self) -> f64 {
        self.distance / WALKING_SPEED
    }
}
