//! Device records and the mesh that owns them.

use std::collections::HashMap;

use wardnet_geometry::Point;

use crate::error::{Error, Result};

/// A device's identifying value.
///
/// Unique per mesh and totally ordered; master election always claims the
/// lowest unassigned value first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId(pub u32);

impl DeviceId {
    /// Create a new identifier.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw identifying value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A patient-monitoring device placed on the ward grid.
///
/// Created once. The range scan fills `in_range`, topology construction
/// fills `is_master` and `connections`; after that the record is
/// read-only.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: DeviceId,
    pub position: Point,
    pub is_master: bool,
    /// Devices this one can hear, with measured distance, in scan order.
    pub in_range: Vec<(DeviceId, f64)>,
    /// Client devices accepted by this one, in assignment order.
    pub connections: Vec<DeviceId>,
}

impl Device {
    /// Create an unconnected device at a position.
    pub fn new(id: DeviceId, position: Point) -> Self {
        Self {
            id,
            position,
            is_master: false,
            in_range: Vec::new(),
            connections: Vec::new(),
        }
    }
}

/// An unordered edge between two devices.
///
/// Endpoints are normalized so the lower id comes first, which makes the
/// edge usable as a set key regardless of discovery direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    a: DeviceId,
    b: DeviceId,
}

impl Edge {
    /// Create a normalized edge.
    pub fn new(a: DeviceId, b: DeviceId) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// The endpoint with the lower id.
    pub const fn a(&self) -> DeviceId {
        self.a
    }

    /// The endpoint with the higher id.
    pub const fn b(&self) -> DeviceId {
        self.b
    }
}

/// The set of devices under simulation, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub(crate) devices: Vec<Device>,
    pub(crate) index: HashMap<DeviceId, usize>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device; ids must be unique.
    pub fn insert(&mut self, device: Device) -> Result<()> {
        if self.index.contains_key(&device.id) {
            return Err(Error::DuplicateDevice(device.id));
        }
        self.index.insert(device.id, self.devices.len());
        self.devices.push(device);
        Ok(())
    }

    /// Look up a device by id.
    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.index.get(&id).map(|&i| &self.devices[i])
    }

    /// Iterate devices in insertion order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    /// Number of devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the mesh holds no devices.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
