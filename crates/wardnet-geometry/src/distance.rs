//! Pairwise distance readings and their reconciliation.
//!
//! Devices measure distances independently in both directions, so the raw
//! data may contain an A→B and a B→A reading that disagree, duplicates,
//! and readings buried in the noise floor. [`DistanceTable`] collapses all
//! of that into exactly one value per unordered pair.
//!
//! # Row ordering is a contract
//!
//! Each origin's neighbor row preserves the order in which that
//! origin→neighbor direction first appeared in the raw input. The
//! trilateration engine anchors its baseline on the *first listed*
//! neighbor of the *first* origin, so callers that need reproducible
//! output must fix the order of their raw observations.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Readings at or below this value are treated as noise.
const NOISE_FLOOR: f64 = 1.0;

/// Opaque identifier of a measured point (a device name in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PointId(String);

impl PointId {
    /// Create a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A raw directed distance reading between two named points.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceObservation {
    pub from: PointId,
    pub to: PointId,
    pub distance: f64,
}

/// Reconciled pairwise distances, keyed by origin point.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    rows: Vec<(PointId, Vec<(PointId, f64)>)>,
    index: HashMap<PointId, usize>,
}

impl DistanceTable {
    /// Reconcile raw observations into one value per unordered pair.
    ///
    /// Readings above the noise floor are averaged; when every reading of
    /// a pair sits at or below the floor, the largest one wins. Both
    /// directions of a pair end up in the table, so every observed point
    /// has a row.
    ///
    /// Fails with [`Error::MalformedInput`] on self-pairs and non-finite
    /// or negative distances.
    pub fn from_observations(observations: &[DistanceObservation]) -> Result<Self> {
        for obs in observations {
            if !obs.distance.is_finite() || obs.distance < 0.0 {
                return Err(Error::MalformedInput(format!(
                    "unusable distance {} between {} and {}",
                    obs.distance, obs.from, obs.to
                )));
            }
            if obs.from == obs.to {
                return Err(Error::MalformedInput(format!(
                    "self-distance reading for {}",
                    obs.from
                )));
            }
        }

        let mut readings: HashMap<(PointId, PointId), Vec<f64>> = HashMap::new();
        for obs in observations {
            readings
                .entry(pair_key(&obs.from, &obs.to))
                .or_default()
                .push(obs.distance);
        }

        let mut reconciled: HashMap<(PointId, PointId), f64> = HashMap::new();
        for (pair, values) in readings {
            let usable: Vec<f64> = values.iter().copied().filter(|v| *v > NOISE_FLOOR).collect();
            let value = if usable.is_empty() {
                values.iter().copied().fold(0.0, f64::max)
            } else {
                usable.iter().sum::<f64>() / usable.len() as f64
            };
            reconciled.insert(pair, value);
        }

        // Rebuild per-origin rows in raw encounter order.
        let mut table = Self::default();
        for obs in observations {
            let value = reconciled[&pair_key(&obs.from, &obs.to)];
            table.insert(obs.from.clone(), obs.to.clone(), value);
            table.insert(obs.to.clone(), obs.from.clone(), value);
        }
        Ok(table)
    }

    fn insert(&mut self, from: PointId, to: PointId, distance: f64) {
        let idx = match self.index.get(&from) {
            Some(&i) => i,
            None => {
                let i = self.rows.len();
                self.index.insert(from.clone(), i);
                self.rows.push((from, Vec::new()));
                i
            }
        };
        let row = &mut self.rows[idx].1;
        if !row.iter().any(|(id, _)| *id == to) {
            row.push((to, distance));
        }
    }

    /// Origin points, in encounter order.
    pub fn origins(&self) -> impl Iterator<Item = &PointId> {
        self.rows.iter().map(|(id, _)| id)
    }

    /// The ordered neighbor row of an origin.
    pub fn neighbors_of(&self, origin: &PointId) -> Option<&[(PointId, f64)]> {
        self.index
            .get(origin)
            .map(|&i| self.rows[i].1.as_slice())
    }

    /// The reconciled distance between two points, if observed.
    pub fn distance_between(&self, from: &PointId, to: &PointId) -> Option<f64> {
        self.neighbors_of(from)?
            .iter()
            .find(|(id, _)| id == to)
            .map(|(_, d)| *d)
    }

    /// Number of points with at least one reading.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds any readings at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn pair_key(a: &PointId, b: &PointId) -> (PointId, PointId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}
