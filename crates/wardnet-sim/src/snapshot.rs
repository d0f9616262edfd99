//! Serializable simulation results for the external viewer.
//!
//! The core hands over resolved coordinates and edge sets; rendering is
//! somebody else's job. These types are the wire format.

use serde::{Deserialize, Serialize};
use wardnet_geometry::{Point, PointId};
use wardnet_topology::{DeviceId, Edge, Mesh};

/// State of one device after topology construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceState {
    pub id: DeviceId,
    pub position: Point,
    pub is_master: bool,
    pub connections: Vec<DeviceId>,
}

/// Everything the viewer needs to draw one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub devices: Vec<DeviceState>,
    pub socket_edges: Vec<Edge>,
    pub nan_edges: Vec<Edge>,
}

impl MeshSnapshot {
    /// Capture the current mesh state together with both edge sets.
    pub fn capture(mesh: &Mesh, socket_edges: Vec<Edge>, nan_edges: Vec<Edge>) -> Self {
        let devices = mesh
            .devices()
            .map(|d| DeviceState {
                id: d.id,
                position: d.position,
                is_master: d.is_master,
                connections: d.connections.clone(),
            })
            .collect();

        Self {
            devices,
            socket_edges,
            nan_edges,
        }
    }

    /// Number of elected masters.
    pub fn master_count(&self) -> usize {
        self.devices.iter().filter(|d| d.is_master).count()
    }
}

/// Resolved coordinates from a positioning run, in resolution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionMap {
    pub points: Vec<(PointId, Point)>,
}
