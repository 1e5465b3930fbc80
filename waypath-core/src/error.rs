use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Path network has no nodes")]
    EmptyNetwork,
    #[error("No path between the selected points")]
    NoPath,
    #[error("Unknown location id: {0}")]
    UnknownLocation(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
