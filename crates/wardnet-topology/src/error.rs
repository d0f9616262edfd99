//! Error types for mesh construction.

use thiserror::Error;

use crate::device::DeviceId;

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a mesh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Two devices were inserted with the same identifying value.
    #[error("duplicate device id {0}")]
    DuplicateDevice(DeviceId),
}
