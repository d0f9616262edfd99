//! Distance-readings file ingestion.
//!
//! The input is a JSON array of per-device reading lists:
//!
//! ```json
//! [
//!   { "name": "bed-3", "readings": [ { "name": "bed-7", "distance": 412.0 } ] }
//! ]
//! ```
//!
//! An array keeps document order intact, and the positioning baseline is
//! anchored on the first reading of the first device, so that order is
//! load-bearing.

use serde::Deserialize;
use wardnet_geometry::{DistanceObservation, PointId};

use crate::error::Result;

#[derive(Debug, Deserialize)]
struct DeviceReadings {
    name: String,
    readings: Vec<Reading>,
}

#[derive(Debug, Deserialize)]
struct Reading {
    name: String,
    distance: f64,
}

/// Parse a distances file into raw directed observations, in document
/// order.
pub fn load_observations(text: &str) -> Result<Vec<DistanceObservation>> {
    let entries: Vec<DeviceReadings> = serde_json::from_str(text)?;

    let mut observations = Vec::new();
    for entry in entries {
        for reading in entry.readings {
            observations.push(DistanceObservation {
                from: PointId::new(entry.name.clone()),
                to: PointId::new(reading.name),
                distance: reading.distance,
            });
        }
    }
    Ok(observations)
}
