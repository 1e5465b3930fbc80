use std::path::PathBuf;

/// Configuration for creating a navigation model
#[derive(Debug, Clone, Default)]
pub struct NavModelConfig {
    /// GeoJSON feature collection describing the walkable path network
    pub paths_path: PathBuf,
    /// CSV catalog of named campus locations
    pub locations_path: PathBuf,
}
