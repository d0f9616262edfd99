//! Wardnet Mesh Topology
//!
//! Turns a set of placed devices into two connection graphs:
//!
//! - **Socket topology**: greedy master election with a bounded number
//!   of client edges per master, the shape used by constrained radio
//!   protocols (a Bluetooth piconet has the same star-forest form).
//! - **NAN topology**: near-me area network, every in-range pair is an
//!   edge with no limit. Serves as the idealized reference graph.
//!
//! Both are derived from the same range scan. The scan is directed: each
//! device discovers its neighbors independently, the way real radios do,
//! even though distance itself is symmetric.
//!
//! Construction mutates the [`Device`] records in place (`in_range`,
//! `is_master`, `connections`); afterwards the mesh is read-only.

mod builder;
mod device;
mod error;

pub use builder::{build_nan_topology, build_socket_topology, scan_in_range};
pub use device::{Device, DeviceId, Edge, Mesh};
pub use error::{Error, Result};

/// Default radio range, in grid units.
pub const DEFAULT_RADIUS: f64 = 5.0;

/// Default number of client slots per master.
pub const DEFAULT_DEVICE_LIMIT: usize = 5;
