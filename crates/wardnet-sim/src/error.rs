//! Error types for the simulation layer.

use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading inputs or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The distances file is not valid JSON of the expected shape
    #[error("malformed distances file: {0}")]
    MalformedDistances(#[from] serde_json::Error),

    /// The grid file is not a rectangular integer matrix
    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    /// Positioning failure
    #[error(transparent)]
    Geometry(#[from] wardnet_geometry::Error),

    /// Mesh construction failure
    #[error(transparent)]
    Topology(#[from] wardnet_topology::Error),
}
