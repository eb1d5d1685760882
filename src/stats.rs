//! Feature statistics: frequency tally, dispersion δ, rare intensity.
//!
//! δ is the sample standard deviation of the natural logs of the feature
//! counts and becomes the bandwidth of the Gaussian kernel used by
//! rare-intensity weighting, so it tracks the spread of the *log*
//! distribution rather than the raw counts.

use std::collections::{BTreeMap, HashMap};

use log::{debug, trace};

use crate::core::{Colocation, FeatureType, SpatialInstance};

/// Substitute for 2δ² when δ = 0, keeping the kernel defined. The result
/// degenerates to an indicator of `N_f == N_min`.
const ZERO_DISPERSION_DENOM: f64 = 1e-12;

/// Count instances per feature type.
pub fn count_features(instances: &[SpatialInstance]) -> BTreeMap<FeatureType, usize> {
    let mut counts: BTreeMap<FeatureType, usize> = BTreeMap::new();
    for inst in instances {
        *counts.entry(inst.feature.clone()).or_insert(0) += 1;
    }
    debug!(
        "Feature tally: {} types over {} instances",
        counts.len(),
        instances.len()
    );
    counts
}

/// Dispersion δ: sample standard deviation of ln(count) over all feature
/// types. Fewer than two types yields 0.
pub fn dispersion(counts: &BTreeMap<FeatureType, usize>) -> f64 {
    let m = counts.len();
    if m < 2 {
        return 0.0;
    }

    let logs: Vec<f64> = counts.values().map(|&n| (n as f64).ln()).collect();
    let mean = logs.iter().sum::<f64>() / m as f64;
    let var = logs.iter().map(|l| (l - mean) * (l - mean)).sum::<f64>() / (m - 1) as f64;
    let delta = var.sqrt();

    debug!("Dispersion over {} feature types: δ={:.6}", m, delta);
    delta
}

/// Rare intensity per feature of `c`: a Gaussian kernel of the log-count
/// gap to the co-location's rarest feature.
///
/// `RI_f = exp(−(ln N_f − ln N_min)² / (2δ²))`, so the rarest feature gets
/// exactly 1 and every other feature lands in (0, 1]. Features absent from
/// `counts` are skipped (they have no instances and no defined gap).
pub fn rare_intensity(
    c: &Colocation,
    counts: &BTreeMap<FeatureType, usize>,
    delta: f64,
) -> HashMap<FeatureType, f64> {
    let mut intensity = HashMap::with_capacity(c.len());

    let n_min = c
        .iter()
        .filter_map(|f| counts.get(f))
        .copied()
        .min()
        .unwrap_or(0);
    if n_min == 0 {
        return intensity;
    }

    let denom = if delta > 0.0 {
        2.0 * delta * delta
    } else {
        ZERO_DISPERSION_DENOM
    };
    let log_min = (n_min as f64).ln();

    for f in c.iter() {
        let Some(&n_f) = counts.get(f) else { continue };
        if n_f == 0 {
            continue;
        }
        let gap = (n_f as f64).ln() - log_min;
        let ri = (-(gap * gap) / denom).exp();
        trace!("RI[{f}] = {ri:.6} (count={n_f}, min={n_min})");
        intensity.insert(f.clone(), ri);
    }

    intensity
}
