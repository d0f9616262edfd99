//! Incremental position resolution from pairwise distances.
//!
//! The loop bootstraps a coordinate frame from the first two connected
//! points, then places every remaining point against already-resolved
//! anchors:
//!
//! 1. First origin → (0, 0).
//! 2. Its first listed neighbor → (−d, 0) on the negative x-axis.
//! 3. The third point intersects the circles around those two anchors.
//! 4. Every later point takes the three most recently resolved points as
//!    anchors, intersects all three anchor pairs, and averages the three
//!    candidates via [`centroid`] to damp any single bad reading.
//!
//! Resolution is all-or-nothing: a failed placement poisons every point
//! after it, so the first error aborts the run.

use crate::circle::intersect_two_circles;
use crate::distance::{DistanceTable, PointId};
use crate::error::{Error, Result};
use crate::point::{centroid, Point};

/// Resolve 2-D coordinates for every point in the table.
///
/// Points resolve in table order, which follows the raw observations'
/// encounter order; fix that order upstream if reproducibility matters.
/// The returned sequence matches resolution order.
///
/// Fails with [`Error::InsufficientData`] unless at least two points
/// share a direct reading, and with [`Error::MissingDistance`] when a
/// point lacks a reading to one of its anchors.
pub fn resolve_all(distances: &DistanceTable) -> Result<Vec<(PointId, Point)>> {
    let mut unresolved: Vec<PointId> = distances.origins().cloned().collect();
    if unresolved.is_empty() {
        return Err(Error::InsufficientData);
    }

    let first = unresolved.remove(0);
    let (second, baseline) = distances
        .neighbors_of(&first)
        .and_then(|row| row.first())
        .map(|(id, d)| (id.clone(), *d))
        .ok_or(Error::InsufficientData)?;

    let mut resolved: Vec<(PointId, Point)> = Vec::with_capacity(unresolved.len() + 1);
    resolved.push((first, Point::ORIGIN));
    resolved.push((second.clone(), Point::new(-baseline, 0.0)));
    unresolved.retain(|id| *id != second);

    while !unresolved.is_empty() {
        let current = unresolved.remove(0);
        let n = resolved.len();
        let (id1, p1) = resolved[n - 2].clone();
        let (id2, p2) = resolved[n - 1].clone();
        let d1 = anchor_distance(distances, &id1, &current)?;
        let d2 = anchor_distance(distances, &id2, &current)?;

        let position = if n == 2 {
            intersect_two_circles(p1, d1, p2, d2)?
        } else {
            let (id3, p3) = resolved[n - 3].clone();
            let d3 = anchor_distance(distances, &id3, &current)?;
            let i1 = intersect_two_circles(p1, d1, p2, d2)?;
            let i2 = intersect_two_circles(p1, d1, p3, d3)?;
            let i3 = intersect_two_circles(p2, d2, p3, d3)?;
            centroid(i1, i2, i3)
        };
        resolved.push((current, position));
    }

    Ok(resolved)
}

fn anchor_distance(table: &DistanceTable, from: &PointId, to: &PointId) -> Result<f64> {
    table
        .distance_between(from, to)
        .ok_or_else(|| Error::MissingDistance {
            from: from.clone(),
            to: to.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceObservation;

    /// Observations for every point pair of a known layout, one direction
    /// each, in layout order.
    fn observations_for(points: &[(&str, Point)]) -> Vec<DistanceObservation> {
        let mut observations = Vec::new();
        for (i, (from, from_pos)) in points.iter().enumerate() {
            for (to, to_pos) in &points[i + 1..] {
                observations.push(DistanceObservation {
                    from: PointId::from(*from),
                    to: PointId::from(*to),
                    distance: from_pos.distance_to(to_pos),
                });
            }
        }
        observations
    }

    fn resolve(points: &[(&str, Point)]) -> Vec<(PointId, Point)> {
        let table = DistanceTable::from_observations(&observations_for(points)).unwrap();
        resolve_all(&table).unwrap()
    }

    #[test]
    fn empty_table_is_insufficient() {
        let table = DistanceTable::from_observations(&[]).unwrap();
        assert_eq!(resolve_all(&table), Err(Error::InsufficientData));
    }

    #[test]
    fn two_points_form_the_baseline() {
        let resolved = resolve(&[
            ("a", Point::new(0.0, 0.0)),
            ("b", Point::new(6.0, 0.0)),
        ]);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0], (PointId::from("a"), Point::new(0.0, 0.0)));
        assert_eq!(resolved[1], (PointId::from("b"), Point::new(-6.0, 0.0)));
    }

    #[test]
    fn third_point_resolves_by_single_intersection() {
        // Layout already expressed in the resolution frame: b on the
        // negative x-axis, c above it.
        let resolved = resolve(&[
            ("a", Point::new(0.0, 0.0)),
            ("b", Point::new(-6.0, 0.0)),
            ("c", Point::new(-3.0, 4.0)),
        ]);

        let (_, c) = &resolved[2];
        assert!((c.x - -3.0).abs() < 1e-9);
        assert!((c.y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_preserves_pairwise_distances() {
        let layout = [
            ("a", Point::new(0.0, 0.0)),
            ("b", Point::new(-10.0, 0.0)),
            ("c", Point::new(-5.0, 5.0)),
            ("d", Point::new(-15.0, 5.0)),
        ];
        let resolved = resolve(&layout);

        let order: Vec<&str> = resolved.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, ["a", "b", "c", "d"]);

        // The absolute frame is a convention; the distances are the
        // invariant worth asserting.
        for (i, (_, laid_out_i)) in layout.iter().enumerate() {
            for (j, (_, laid_out_j)) in layout.iter().enumerate().skip(i + 1) {
                let expected = laid_out_i.distance_to(laid_out_j);
                let actual = resolved[i].1.distance_to(&resolved[j].1);
                assert!(
                    (expected - actual).abs() < 1e-6,
                    "distance {}-{} drifted: {} vs {}",
                    layout[i].0,
                    layout[j].0,
                    expected,
                    actual
                );
            }
        }
    }

    #[test]
    fn later_points_average_three_anchor_intersections() {
        let resolved = resolve(&[
            ("a", Point::new(0.0, 0.0)),
            ("b", Point::new(-10.0, 0.0)),
            ("c", Point::new(-5.0, 5.0)),
            ("d", Point::new(-15.0, 5.0)),
        ]);

        let (_, d) = &resolved[3];
        assert!((d.x - -15.0).abs() < 1e-6);
        assert!((d.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn missing_anchor_distance_names_the_pair() {
        // c only shares a reading with b, never with anchor a.
        let table = DistanceTable::from_observations(&[
            DistanceObservation {
                from: PointId::from("a"),
                to: PointId::from("b"),
                distance: 5.0,
            },
            DistanceObservation {
                from: PointId::from("b"),
                to: PointId::from("c"),
                distance: 4.0,
            },
        ])
        .unwrap();

        assert_eq!(
            resolve_all(&table),
            Err(Error::MissingDistance {
                from: PointId::from("a"),
                to: PointId::from("c"),
            })
        );
    }

    #[test]
    fn degenerate_geometry_aborts_the_run() {
        // A zero-length baseline puts both anchors on the same spot, so
        // the third point sees coincident circles.
        let table = DistanceTable::from_observations(&[
            DistanceObservation {
                from: PointId::from("a"),
                to: PointId::from("b"),
                distance: 0.0,
            },
            DistanceObservation {
                from: PointId::from("a"),
                to: PointId::from("c"),
                distance: 7.0,
            },
            DistanceObservation {
                from: PointId::from("b"),
                to: PointId::from("c"),
                distance: 7.0,
            },
        ])
        .unwrap();

        assert_eq!(resolve_all(&table), Err(Error::CoincidentCircles));
    }
}
