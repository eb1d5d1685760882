//! Spatial neighbor graph built with a plane-sweep pair generator.
//!
//! Two instances are neighbors iff their feature types differ and their
//! Euclidean distance is within the threshold (inclusive). Same-type
//! proximity is intentionally discarded: co-location analysis concerns
//! inter-feature closeness only.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::core::SpatialInstance;

/// A center instance and everything directly adjacent to it.
///
/// Isolated instances carry an empty neighbor list; the graph always has
/// one entry per input instance, in input order.
#[derive(Debug, Clone)]
pub struct NeighborSet<'a> {
    pub center: &'a SpatialInstance,
    pub neighbors: Vec<&'a SpatialInstance>,
}

/// Build the neighbor graph for `instances` under `distance_threshold`.
///
/// Records with matching identity `(feature, id)` are collapsed to one
/// vertex; every input record still gets its own `NeighborSet`, duplicates
/// sharing the collapsed vertex's neighbor list. A non-positive threshold
/// produces a graph with no edges, not an error.
///
/// The sweep windows for distinct start indices are independent, so pair
/// generation runs on the rayon pool unless `sequential` is set; the
/// ordered collect keeps the pair list deterministic either way.
pub fn build_neighbor_graph<'a>(
    instances: &'a [SpatialInstance],
    distance_threshold: f64,
    sequential: bool,
) -> Vec<NeighborSet<'a>> {
    info!(
        "Building neighbor graph: {} instances, ε={}",
        instances.len(),
        distance_threshold
    );

    // Collapse duplicate identities, keeping first occurrence.
    let mut seen: HashSet<&SpatialInstance> = HashSet::with_capacity(instances.len());
    let mut work: Vec<&SpatialInstance> = Vec::with_capacity(instances.len());
    for inst in instances {
        if seen.insert(inst) {
            work.push(inst);
        }
    }
    if work.len() < instances.len() {
        debug!(
            "Collapsed {} duplicate identities",
            instances.len() - work.len()
        );
    }

    // Adjacency keyed by identity; seeded empty so isolated vertices emit
    // empty neighbor sets.
    let mut adjacency: HashMap<&SpatialInstance, Vec<&SpatialInstance>> =
        work.iter().map(|&v| (v, Vec::new())).collect();

    if distance_threshold <= 0.0 {
        warn!(
            "Non-positive neighbor distance {}; graph has no edges",
            distance_threshold
        );
    } else {
        work.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        let pairs = find_neighbor_pairs(&work, distance_threshold, sequential);
        debug!("Plane sweep produced {} heterogeneous pairs", pairs.len());

        for (a, b) in pairs {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
    }

    instances
        .iter()
        .map(|center| NeighborSet {
            center,
            neighbors: adjacency.get(center).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Plane sweep over the x-sorted working slice: for each `i`, scan forward
/// while `x_j − x_i ≤ ε`, screening by `|Δy| ≤ ε` before the full Euclidean
/// test and the heterogeneous-type filter.
fn find_neighbor_pairs<'a>(
    sorted: &[&'a SpatialInstance],
    eps: f64,
    sequential: bool,
) -> Vec<(&'a SpatialInstance, &'a SpatialInstance)> {
    let scan_window = |i: usize| {
        let a = sorted[i];
        let mut pairs = Vec::new();
        for &b in &sorted[i + 1..] {
            if b.x - a.x > eps {
                break;
            }
            if (b.y - a.y).abs() > eps {
                continue;
            }
            if a.feature != b.feature && a.distance(b) <= eps {
                pairs.push((a, b));
            }
        }
        pairs
    };

    if sequential {
        (0..sorted.len()).flat_map(scan_window).collect()
    } else {
        (0..sorted.len())
            .into_par_iter()
            .flat_map_iter(scan_window)
            .collect()
    }
}
