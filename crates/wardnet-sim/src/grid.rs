//! Ward grid ingestion and generation.
//!
//! A grid file is a comma-separated integer matrix. A nonzero cell places
//! a device; the cell value is its identifying value and the coordinate
//! is (column, row), so x runs across a line and y down the file.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wardnet_geometry::Point;
use wardnet_topology::{Device, DeviceId, Mesh};

use crate::error::{Error, Result};

/// Parse a grid file into a mesh of placed devices.
///
/// Devices enumerate column-major (down each column, left to right),
/// so insertion order matches the coordinate convention. Ragged rows,
/// non-integer cells and duplicate device values are rejected.
pub fn parse_grid(text: &str) -> Result<Mesh> {
    let mut matrix: Vec<Vec<u32>> = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .map(|cell| cell.trim().parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::MalformedGrid(format!("line {}: {}", line_no + 1, e)))?;
        matrix.push(row);
    }

    let width = matrix.first().map(|row| row.len()).unwrap_or(0);
    if matrix.iter().any(|row| row.len() != width) {
        return Err(Error::MalformedGrid("rows differ in length".into()));
    }

    let mut mesh = Mesh::new();
    for x in 0..width {
        for (y, row) in matrix.iter().enumerate() {
            let value = row[x];
            if value != 0 {
                mesh.insert(Device::new(
                    DeviceId::new(value),
                    Point::new(x as f64, y as f64),
                ))?;
            }
        }
    }
    Ok(mesh)
}

/// Render a random ward grid as matrix text.
///
/// Places devices 1..=`device_count` at uniformly random cells. Later
/// placements may overwrite earlier ones, so the final device count is an
/// upper bound, not a guarantee.
pub fn random_grid(width: usize, length: usize, device_count: u32, seed: u64) -> String {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut matrix = vec![vec![0u32; width]; length];

    for value in 1..=device_count {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..length);
        matrix[y][x] = value;
    }

    matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
