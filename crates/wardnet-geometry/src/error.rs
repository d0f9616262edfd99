//! Error types for the positioning solver.

use thiserror::Error;

use crate::distance::PointId;

/// Result type for positioning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by distance reconciliation and position resolution.
///
/// All of these abort the current run. Callers may recover by retrying
/// with different input, never by retrying the same one: the internal
/// radius-adjustment budget has already absorbed as much measurement
/// noise as the solver tolerates.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// The measured circles never touch, even after the adjustment budget.
    #[error("circles are separate")]
    DisjointCircles,

    /// One measured circle stays inside the other after the adjustment budget.
    #[error("circles are contained within each other")]
    ContainedCircles,

    /// Same center and radius: infinitely many intersections, likely a
    /// duplicate reading.
    #[error("coincident circles, possible duplicate reading")]
    CoincidentCircles,

    /// Fewer than two points share a direct distance reading.
    #[error("need at least two points with a shared distance reading")]
    InsufficientData,

    /// An anchor has no reading to the point being resolved.
    #[error("no distance reading between {from} and {to}")]
    MissingDistance { from: PointId, to: PointId },

    /// Raw observations violate the expected shape.
    #[error("malformed distance input: {0}")]
    MalformedInput(String),
}
