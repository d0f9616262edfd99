//! Batch simulation drivers.

use tracing::info;
use wardnet_geometry::{resolve_all, DistanceTable};
use wardnet_topology::{
    build_nan_topology, build_socket_topology, scan_in_range, DEFAULT_DEVICE_LIMIT, DEFAULT_RADIUS,
};

use crate::distances::load_observations;
use crate::error::Result;
use crate::grid::parse_grid;
use crate::patient::{Condition, Vital, WardClock};
use crate::snapshot::{MeshSnapshot, PositionMap};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Radio range in grid units.
    pub radius: f64,
    /// Client slots per master.
    pub device_limit: usize,
    /// Seed for all randomness (vital-sign walks).
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            device_limit: DEFAULT_DEVICE_LIMIT,
            seed: 42,
        }
    }
}

/// Build the mesh from a grid file and construct both topologies.
pub fn run_mesh(grid_text: &str, config: &SimulationConfig) -> Result<MeshSnapshot> {
    let mut mesh = parse_grid(grid_text)?;
    scan_in_range(&mut mesh, config.radius);
    let socket_edges = build_socket_topology(&mut mesh, config.device_limit);
    let nan_edges = build_nan_topology(&mesh);

    info!(
        devices = mesh.len(),
        socket_edges = socket_edges.len(),
        nan_edges = nan_edges.len(),
        "mesh constructed"
    );
    Ok(MeshSnapshot::capture(&mesh, socket_edges, nan_edges))
}

/// Mesh simulation plus `ticks` steps of patient monitoring.
///
/// One resting patient is admitted per device; each tick measures every
/// vital once. The returned clock holds the measurement histories.
pub fn run_health(
    grid_text: &str,
    config: &SimulationConfig,
    ticks: u64,
) -> Result<(MeshSnapshot, WardClock)> {
    let mut mesh = parse_grid(grid_text)?;
    scan_in_range(&mut mesh, config.radius);
    let socket_edges = build_socket_topology(&mut mesh, config.device_limit);
    let nan_edges = build_nan_topology(&mesh);

    let mut clock = WardClock::new(config.seed);
    for device in mesh.devices() {
        clock.admit(device.id, Condition::RESTING);
    }
    for _ in 0..ticks {
        clock.tick();
        for vital in Vital::ALL {
            clock.measure(vital);
        }
    }

    info!(devices = mesh.len(), ticks, "health run complete");
    Ok((MeshSnapshot::capture(&mesh, socket_edges, nan_edges), clock))
}

/// Reconstruct device positions from a distances file.
pub fn run_positioning(distances_text: &str) -> Result<PositionMap> {
    let observations = load_observations(distances_text)?;
    let table = DistanceTable::from_observations(&observations)?;
    let points = resolve_all(&table)?;

    info!(points = points.len(), "positions resolved");
    Ok(PositionMap { points })
}
