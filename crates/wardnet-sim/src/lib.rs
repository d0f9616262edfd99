//! Wardnet Simulation
//!
//! Glue around the geometry and topology cores: file ingestion, patient
//! vital-sign state, and serializable snapshots for an external viewer.
//!
//! Two batch modes:
//!
//! - **Grid mode**: device placements come from a ward grid file; the
//!   range scan and both topologies are built over them
//!   ([`run_mesh`], [`run_health`]).
//! - **Positioning mode**: device coordinates are reconstructed from a
//!   distance-readings file alone ([`run_positioning`]).
//!
//! Everything here is single-threaded and runs to completion; the only
//! randomness (grid generation, vital-sign walks) flows from explicit
//! seeds in [`SimulationConfig`].

mod distances;
mod error;
mod grid;
mod patient;
mod simulation;
mod snapshot;

pub use distances::load_observations;
pub use error::{Error, Result};
pub use grid::{parse_grid, random_grid};
pub use patient::{
    Band, Condition, Measurement, Patient, PatientMonitor, Vital, WardClock,
};
pub use simulation::{run_health, run_mesh, run_positioning, SimulationConfig};
pub use snapshot::{DeviceState, MeshSnapshot, PositionMap};
