//! Clique-indexed instance hash.
//!
//! Maximal cliques are grouped by their feature-type signature; under each
//! signature, participating instances are bucketed by feature. The index is
//! built once and read-only thereafter; the miner only queries it.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use log::{debug, info, trace};

use crate::cliques::MaximalClique;
use crate::core::{CandidateRank, Colocation, FeatureType, SpatialInstance};

/// Per-feature instance buckets under one signature. Sets are ordered by
/// instance identity, so iteration is deterministic across runs.
pub type FeatureBuckets<'a> = BTreeMap<FeatureType, BTreeSet<&'a SpatialInstance>>;

#[derive(Debug, Default)]
pub struct CliqueIndex<'a> {
    map: BTreeMap<Colocation, FeatureBuckets<'a>>,
}

impl<'a> CliqueIndex<'a> {
    /// Index a clique list. Each instance of a clique lands in the bucket
    /// `(sig(Q), instance.feature)`; same-type instances inside one clique
    /// collapse to a single signature entry but remain distinct in the
    /// bucket.
    pub fn from_cliques(cliques: &[MaximalClique<'a>]) -> Self {
        let mut map: BTreeMap<Colocation, FeatureBuckets<'a>> = BTreeMap::new();

        for clique in cliques {
            let sig = Colocation::signature_of(clique.iter().copied());
            let buckets = map.entry(sig).or_default();
            for &inst in clique {
                buckets
                    .entry(inst.feature.clone())
                    .or_default()
                    .insert(inst);
            }
        }

        info!(
            "Clique index: {} signatures from {} cliques",
            map.len(),
            cliques.len()
        );
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &Colocation> {
        self.map.keys()
    }

    pub fn get(&self, signature: &Colocation) -> Option<&FeatureBuckets<'a>> {
        self.map.get(signature)
    }

    /// Seed the candidate queue from the index keys: larger signatures
    /// first, ties lexicographically smaller first. Keys are unique, so the
    /// order is strict.
    pub fn initial_candidates(&self) -> BinaryHeap<CandidateRank> {
        let heap: BinaryHeap<CandidateRank> = self
            .map
            .keys()
            .cloned()
            .map(CandidateRank)
            .collect();
        debug!("Seeded {} initial candidates", heap.len());
        heap
    }

    /// Participating instances of `c`: for each feature `f ∈ c`, the union
    /// of the `(K, f)` buckets over every signature `K ⊇ c`. Features with
    /// no witnesses keep an empty set.
    pub fn query_instances(&self, c: &Colocation) -> FeatureBuckets<'a> {
        let mut out: FeatureBuckets<'a> =
            c.iter().map(|f| (f.clone(), BTreeSet::new())).collect();

        for (sig, buckets) in &self.map {
            if sig.len() < c.len() || !sig.is_superset_of(c) {
                continue;
            }
            trace!("query {c}: superset signature {sig}");
            for f in c.iter() {
                if let Some(bucket) = buckets.get(f) {
                    out.entry(f.clone()).or_default().extend(bucket.iter().copied());
                }
            }
        }

        out
    }
}
