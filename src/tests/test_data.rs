//! Shared generators for the test suite.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::SpatialInstance;

/// Shorthand: instance "A1" at (x, y) for feature "A", number 1.
pub fn inst(feature: &str, number: i64, x: f64, y: f64) -> SpatialInstance {
    SpatialInstance::numbered(feature, number, x, y)
}

/// Clusters of co-located features, far enough apart that no edge crosses
/// clusters at ε ≤ 1. Each cluster holds one instance of every feature in
/// `features`, jittered by `spread`.
pub fn make_feature_clusters(
    features: &[&str],
    n_clusters: usize,
    spread: f64,
    seed: u64,
) -> Vec<SpatialInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut instances = Vec::with_capacity(n_clusters * features.len());

    for cluster in 0..n_clusters {
        let cx = cluster as f64 * 100.0;
        let cy = (cluster % 7) as f64 * 100.0;
        for feature in features {
            let number = cluster as i64 + 1;
            let x = cx + rng.gen_range(-spread..=spread);
            let y = cy + rng.gen_range(-spread..=spread);
            instances.push(inst(feature, number, x, y));
        }
    }

    instances
}

/// Uniform scatter of `n` instances over a square, features drawn
/// round-robin from `features`.
pub fn make_scatter(features: &[&str], n: usize, side: f64, seed: u64) -> Vec<SpatialInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let feature = features[i % features.len()];
            let number = (i / features.len()) as i64 + 1;
            let x = rng.gen_range(0.0..side);
            let y = rng.gen_range(0.0..side);
            inst(feature, number, x, y)
        })
        .collect()
}
