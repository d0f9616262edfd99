//! Range scan and topology construction.

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use tracing::debug;

use crate::device::{DeviceId, Edge, Mesh};

/// Record, on every device, which other devices it can hear.
///
/// Every ordered pair of devices at distinct positions is checked; a
/// device within `radius` lands in the observer's `in_range` map together
/// with the measured distance. The relation is populated per direction
/// (each device discovers independently), and devices sharing a position
/// never discover each other. O(n²) over the device count.
pub fn scan_in_range(mesh: &mut Mesh, radius: f64) {
    let started = Instant::now();
    let placements: Vec<(DeviceId, _)> = mesh
        .devices
        .iter()
        .map(|d| (d.id, d.position))
        .collect();

    for i in 0..mesh.devices.len() {
        let observer_pos = mesh.devices[i].position;
        for (j, &(other, other_pos)) in placements.iter().enumerate() {
            if i == j || observer_pos == other_pos {
                continue;
            }
            let distance = observer_pos.distance_to(&other_pos);
            if distance <= radius {
                mesh.devices[i].in_range.push((other, distance));
            }
        }
    }

    debug!(
        devices = mesh.devices.len(),
        elapsed = ?started.elapsed(),
        "range scan complete"
    );
}

/// Elect masters and assign each up to `device_limit` client edges.
///
/// Greedy clustering over the scanned mesh: the unassigned device with
/// the lowest id becomes a master, claims its nearest still-unassigned
/// in-range neighbors as clients (nearest first; scan order breaks
/// distance ties), and retires. Repeats until every device is assigned.
///
/// The result is a forest of stars: every device is either a master or
/// exactly one master's client, and no master exceeds `device_limit`
/// clients.
pub fn build_socket_topology(mesh: &mut Mesh, device_limit: usize) -> Vec<Edge> {
    let started = Instant::now();
    let mut pool: BTreeMap<DeviceId, usize> = mesh
        .devices
        .iter()
        .enumerate()
        .map(|(i, d)| (d.id, i))
        .collect();
    let mut edges = Vec::new();

    while let Some((&lowest, &master_idx)) = pool.iter().next() {
        pool.remove(&lowest);
        mesh.devices[master_idx].is_master = true;

        let mut candidates: Vec<(DeviceId, f64)> = mesh.devices[master_idx]
            .in_range
            .iter()
            .filter(|(id, _)| pool.contains_key(id))
            .copied()
            .collect();
        candidates.sort_by(|x, y| x.1.total_cmp(&y.1));

        for (client, _) in candidates.into_iter().take(device_limit) {
            edges.push(Edge::new(lowest, client));
            mesh.devices[master_idx].connections.push(client);
            pool.remove(&client);
        }
    }

    debug!(
        edges = edges.len(),
        elapsed = ?started.elapsed(),
        "socket topology complete"
    );
    edges
}

/// Connect every in-range pair, without any limit.
///
/// The NAN (near-me area network) graph is a derived view: it reads the
/// scan results but never mutates the devices, so it can coexist with a
/// socket topology built over the same mesh.
pub fn build_nan_topology(mesh: &Mesh) -> Vec<Edge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for device in mesh.devices() {
        for &(other, _) in &device.in_range {
            let edge = Edge::new(device.id, other);
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use wardnet_geometry::Point;

    fn mesh_of(placements: &[(u32, (f64, f64))]) -> Mesh {
        let mut mesh = Mesh::new();
        for &(value, (x, y)) in placements {
            mesh.insert(Device::new(DeviceId::new(value), Point::new(x, y)))
                .unwrap();
        }
        mesh
    }

    fn in_range_ids(mesh: &Mesh, id: u32) -> Vec<u32> {
        mesh.get(DeviceId::new(id))
            .unwrap()
            .in_range
            .iter()
            .map(|(other, _)| other.value())
            .collect()
    }

    #[test]
    fn scan_records_distances_within_radius() {
        let mut mesh = mesh_of(&[(1, (0.0, 0.0)), (2, (3.0, 4.0)), (3, (20.0, 0.0))]);
        scan_in_range(&mut mesh, 5.0);

        assert_eq!(in_range_ids(&mesh, 1), [2]);
        let (_, d) = mesh.get(DeviceId::new(1)).unwrap().in_range[0];
        assert_eq!(d, 5.0); // boundary distance is inclusive
        assert_eq!(in_range_ids(&mesh, 3), Vec::<u32>::new());
    }

    #[test]
    fn scan_populates_both_directions() {
        let mut mesh = mesh_of(&[(1, (0.0, 0.0)), (2, (1.0, 0.0))]);
        scan_in_range(&mut mesh, 5.0);

        assert_eq!(in_range_ids(&mesh, 1), [2]);
        assert_eq!(in_range_ids(&mesh, 2), [1]);
    }

    #[test]
    fn co_located_devices_never_discover_each_other() {
        let mut mesh = mesh_of(&[(1, (2.0, 2.0)), (2, (2.0, 2.0))]);
        scan_in_range(&mut mesh, 5.0);

        assert_eq!(in_range_ids(&mesh, 1), Vec::<u32>::new());
        assert_eq!(in_range_ids(&mesh, 2), Vec::<u32>::new());
    }

    #[test]
    fn lowest_id_becomes_master_and_claims_nearest() {
        // Device 1 hears 2, 3 and 4; only two client slots.
        let mut mesh = mesh_of(&[
            (1, (0.0, 0.0)),
            (2, (4.0, 0.0)),
            (3, (1.0, 0.0)),
            (4, (2.0, 0.0)),
        ]);
        scan_in_range(&mut mesh, 10.0);
        let edges = build_socket_topology(&mut mesh, 2);

        let master = mesh.get(DeviceId::new(1)).unwrap();
        assert!(master.is_master);
        // Nearest-first: 3 (1.0) then 4 (2.0); 2 misses the cut.
        assert_eq!(master.connections, [DeviceId::new(3), DeviceId::new(4)]);
        assert!(edges.contains(&Edge::new(DeviceId::new(1), DeviceId::new(3))));
        assert!(edges.contains(&Edge::new(DeviceId::new(1), DeviceId::new(4))));

        // 2 was left unassigned and founds its own cluster.
        assert!(mesh.get(DeviceId::new(2)).unwrap().is_master);
    }

    #[test]
    fn every_device_lands_in_exactly_one_cluster() {
        let mut mesh = mesh_of(&[
            (5, (0.0, 0.0)),
            (2, (1.0, 0.0)),
            (8, (2.0, 0.0)),
            (1, (3.0, 0.0)),
            (9, (4.0, 0.0)),
            (4, (10.0, 10.0)),
        ]);
        scan_in_range(&mut mesh, 5.0);
        build_socket_topology(&mut mesh, 3);

        let mut seen_as_client: Vec<DeviceId> = Vec::new();
        for device in mesh.devices() {
            assert!(device.connections.len() <= 3);
            if device.is_master {
                seen_as_client.extend(&device.connections);
            } else {
                assert!(device.connections.is_empty());
            }
        }
        seen_as_client.sort();
        let before_dedup = seen_as_client.len();
        seen_as_client.dedup();
        assert_eq!(before_dedup, seen_as_client.len(), "client assigned twice");

        // Masters and clients partition the mesh.
        let masters = mesh.devices().filter(|d| d.is_master).count();
        assert_eq!(masters + seen_as_client.len(), mesh.len());
        for client in &seen_as_client {
            assert!(!mesh.get(*client).unwrap().is_master);
        }
    }

    #[test]
    fn isolated_device_becomes_empty_master() {
        let mut mesh = mesh_of(&[(1, (0.0, 0.0)), (2, (100.0, 100.0))]);
        scan_in_range(&mut mesh, 5.0);
        let edges = build_socket_topology(&mut mesh, 3);

        assert!(edges.is_empty());
        assert!(mesh.get(DeviceId::new(1)).unwrap().is_master);
        assert!(mesh.get(DeviceId::new(2)).unwrap().is_master);
    }

    #[test]
    fn nan_topology_connects_all_in_range_pairs() {
        let mut mesh = mesh_of(&[(1, (0.0, 0.0)), (2, (1.0, 0.0)), (3, (2.0, 0.0))]);
        scan_in_range(&mut mesh, 1.5);
        let edges = build_nan_topology(&mesh);

        assert_eq!(edges.len(), 2);
        assert!(edges.contains(&Edge::new(DeviceId::new(1), DeviceId::new(2))));
        assert!(edges.contains(&Edge::new(DeviceId::new(2), DeviceId::new(3))));
    }

    #[test]
    fn nan_topology_leaves_devices_untouched() {
        let mut mesh = mesh_of(&[(1, (0.0, 0.0)), (2, (1.0, 0.0))]);
        scan_in_range(&mut mesh, 5.0);
        build_nan_topology(&mesh);

        for device in mesh.devices() {
            assert!(!device.is_master);
            assert!(device.connections.is_empty());
        }
    }

    #[test]
    fn nan_edges_deduplicate_symmetric_discovery() {
        let mut mesh = mesh_of(&[(1, (0.0, 0.0)), (2, (1.0, 0.0))]);
        scan_in_range(&mut mesh, 5.0);
        let edges = build_nan_topology(&mesh);

        assert_eq!(edges, [Edge::new(DeviceId::new(1), DeviceId::new(2))]);
    }

    #[test]
    fn socket_and_nan_coexist_on_one_scan() {
        let mut mesh = mesh_of(&[(1, (0.0, 0.0)), (2, (1.0, 0.0)), (3, (2.0, 0.0))]);
        scan_in_range(&mut mesh, 5.0);

        let nan_before = build_nan_topology(&mesh);
        build_socket_topology(&mut mesh, 1);
        let nan_after = build_nan_topology(&mesh);

        assert_eq!(nan_before, nan_after);
    }
}
