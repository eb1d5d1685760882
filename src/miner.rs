//! Weighted-PI miner: top-down traversal of the co-location lattice.
//!
//! Candidates are visited largest-first. A prevalent verdict discharges a
//! cone of immediate sub-patterns through the shared-minimum-feature
//! deduction. A non-prevalent verdict is absorbing and does not expand:
//! its subsets are reached from other prevalent ancestors if at all, with
//! the bottom of the lattice seeded by the initial candidate extraction.
//!
//! The participation index is weighted by rare intensity: each feature's
//! participation ratio is divided by its RI, which inflates features far
//! from the co-location's rarest and leaves the rarest at weight 1, so the
//! minimum is dominated by the rarest feature's raw participation.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use log::{debug, info, trace};

use crate::core::{CandidateRank, Colocation, FeatureType};
use crate::index::{CliqueIndex, FeatureBuckets};
use crate::stats;

/// Mine the prevalent co-locations. Consumes the candidate queue and
/// returns the prevalent set filtered to patterns of size ≥ 2.
pub fn mine_prevalent(
    mut candidates: BinaryHeap<CandidateRank>,
    index: &CliqueIndex<'_>,
    feature_counts: &BTreeMap<FeatureType, usize>,
    delta: f64,
    min_prev: f64,
) -> BTreeSet<Colocation> {
    info!(
        "Mining prevalent patterns: {} initial candidates, min_prev={}, δ={:.6}",
        candidates.len(),
        min_prev,
        delta
    );

    let mut prevalent: BTreeSet<Colocation> = BTreeSet::new();
    let mut non_prevalent: BTreeSet<Colocation> = BTreeSet::new();
    let mut tested = 0usize;

    while let Some(CandidateRank(c)) = candidates.pop() {
        if prevalent.contains(&c) || non_prevalent.contains(&c) {
            trace!("skip {c}: already classified");
            continue;
        }
        tested += 1;

        let part_instances = index.query_instances(&c);
        let intensity = stats::rare_intensity(&c, feature_counts, delta);
        let wpi = weighted_participation_index(&part_instances, &c, &intensity, feature_counts);

        if wpi >= min_prev {
            debug!("prevalent {c}: WPI={wpi:.4}");
            let subsets = immediate_subsets(&c);
            let proven = deduce_prevalent_subsets(&subsets, &c, feature_counts);

            prevalent.insert(c);
            for s in &proven {
                // Membership is absorbing; never move a pattern out of the
                // non-prevalent set.
                if !non_prevalent.contains(s) {
                    trace!("deduced prevalent {s}");
                    prevalent.insert(s.clone());
                }
            }
            for s in subsets {
                if !proven.contains(&s)
                    && !prevalent.contains(&s)
                    && !non_prevalent.contains(&s)
                {
                    candidates.push(CandidateRank(s));
                }
            }
        } else {
            debug!("non-prevalent {c}: WPI={wpi:.4}");
            non_prevalent.insert(c);
        }
    }

    prevalent.retain(|c| c.len() >= 2);
    info!(
        "Mining complete: {} prevalent patterns ({} candidates tested, {} rejected)",
        prevalent.len(),
        tested,
        non_prevalent.len()
    );
    prevalent
}

/// Weighted participation index: `min_f PR_f / RI_f` over the features of
/// `c`, where `PR_f` is the fraction of type-`f` instances participating in
/// some witness of `c`. The empty pattern and any feature absent from the
/// data yield 0.
pub fn weighted_participation_index(
    part_instances: &FeatureBuckets<'_>,
    c: &Colocation,
    intensity: &std::collections::HashMap<FeatureType, f64>,
    feature_counts: &BTreeMap<FeatureType, usize>,
) -> f64 {
    if c.is_empty() {
        return 0.0;
    }

    let mut wpi = f64::INFINITY;
    for f in c.iter() {
        let total = feature_counts.get(f).copied().unwrap_or(0);
        if total == 0 {
            return 0.0;
        }
        let participating = part_instances.get(f).map(|s| s.len()).unwrap_or(0);
        let pr = participating as f64 / total as f64;

        // RI is in (0, 1]; the max guards exp underflow at δ → 0.
        let ri = intensity.get(f).copied().unwrap_or(1.0).max(f64::MIN_POSITIVE);
        let wpr = pr / ri;
        trace!("WPR[{f}] = {wpr:.4} (PR={pr:.4}, RI={ri:.4})");
        if wpr < wpi {
            wpi = wpr;
        }
    }
    wpi
}

/// All size-`(|c|−1)` sub-patterns. Empty for patterns of size ≤ 1, which
/// keeps the empty co-location out of the queue.
fn immediate_subsets(c: &Colocation) -> BTreeSet<Colocation> {
    if c.len() <= 1 {
        return BTreeSet::new();
    }
    c.iter().map(|f| c.without(f)).collect()
}

/// Shared-minimum-feature deduction: with `c` prevalent and `f_min` its
/// globally-rarest feature (ties lexicographic), every immediate subset
/// containing `f_min` is prevalent without testing: WPI is dominated by
/// `WPR_{f_min}`, and dropping any other feature can only grow each PR.
fn deduce_prevalent_subsets(
    subsets: &BTreeSet<Colocation>,
    c: &Colocation,
    feature_counts: &BTreeMap<FeatureType, usize>,
) -> BTreeSet<Colocation> {
    let Some(f_min) = rarest_feature(c, feature_counts) else {
        return BTreeSet::new();
    };
    subsets
        .iter()
        .filter(|s| s.contains(f_min))
        .cloned()
        .collect()
}

/// The feature of `c` with the smallest global count; ties resolve to the
/// lexicographically smaller feature because `c` iterates in sorted order.
fn rarest_feature<'c>(
    c: &'c Colocation,
    feature_counts: &BTreeMap<FeatureType, usize>,
) -> Option<&'c str> {
    let mut best: Option<(&str, usize)> = None;
    for f in c.iter() {
        let count = feature_counts.get(f).copied().unwrap_or(usize::MAX);
        match best {
            Some((_, n)) if count >= n => {}
            _ => best = Some((f.as_str(), count)),
        }
    }
    best.map(|(f, _)| f)
}
