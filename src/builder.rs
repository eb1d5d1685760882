//! Pipeline orchestration behind a builder.
//!
//! `MinerBuilder` wires the five stages (feature statistics, neighbor
//! graph, maximal cliques, clique index, weighted-PI mining) behind
//! chained configuration methods and a single `mine` entry point.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::cliques;
use crate::core::{Colocation, FeatureType, SpatialInstance};
use crate::graph;
use crate::index::CliqueIndex;
use crate::miner;
use crate::stats;

#[derive(Clone, Debug)]
pub struct MinerBuilder {
    /// Distance threshold ε for the neighbor relation (inclusive).
    neighbor_distance: f64,
    /// Weighted-PI prevalence threshold.
    min_prevalence: f64,
    /// Force the plane sweep onto a single thread.
    sequential_sweep: bool,
}

impl Default for MinerBuilder {
    fn default() -> Self {
        Self {
            neighbor_distance: 1.0,
            min_prevalence: 0.5,
            sequential_sweep: false,
        }
    }
}

impl MinerBuilder {
    pub fn new() -> Self {
        info!("Initializing new MinerBuilder");
        Self::default()
    }

    /// Neighbor distance ε. Non-positive values are accepted and produce an
    /// edgeless graph (and therefore no patterns).
    pub fn with_neighbor_distance(mut self, eps: f64) -> Self {
        info!("Configuring neighbor distance: ε={}", eps);
        self.neighbor_distance = eps;
        self
    }

    /// Prevalence threshold. Values above 1 yield an empty result; values
    /// at or below 0 admit every candidate.
    pub fn with_min_prevalence(mut self, min_prev: f64) -> Self {
        info!("Configuring prevalence threshold: min_prev={}", min_prev);
        self.min_prevalence = min_prev;
        self
    }

    /// Run the plane sweep sequentially instead of on the rayon pool. The
    /// result is identical either way; this only trades wall-clock time.
    pub fn with_sequential_sweep(mut self, sequential: bool) -> Self {
        info!("Setting sequential sweep: {}", sequential);
        self.sequential_sweep = sequential;
        self
    }

    /// Run the full pipeline over `instances` and collect the prevalent
    /// patterns plus run statistics.
    pub fn mine(self, instances: &[SpatialInstance]) -> MiningSummary {
        info!(
            "Mining co-locations over {} instances (ε={}, min_prev={})",
            instances.len(),
            self.neighbor_distance,
            self.min_prevalence
        );

        // A: feature statistics and dispersion.
        let feature_counts = stats::count_features(instances);
        let dispersion = stats::dispersion(&feature_counts);
        debug!(
            "{} feature types, δ={:.6}",
            feature_counts.len(),
            dispersion
        );

        // B: neighbor graph.
        let neighbor_graph = graph::build_neighbor_graph(
            instances,
            self.neighbor_distance,
            self.sequential_sweep,
        );

        // C: maximal cliques.
        let cliques = cliques::enumerate_maximal_cliques(&neighbor_graph);

        // D: clique index and initial candidates.
        let index = CliqueIndex::from_cliques(&cliques);
        let candidates = index.initial_candidates();

        // E: weighted-PI lattice traversal.
        let prevalent = miner::mine_prevalent(
            candidates,
            &index,
            &feature_counts,
            dispersion,
            self.min_prevalence,
        );

        info!("Pipeline complete: {} prevalent patterns", prevalent.len());

        MiningSummary {
            prevalent: prevalent.into_iter().collect(),
            feature_counts,
            dispersion,
            clique_count: cliques.len(),
            signature_count: index.len(),
        }
    }
}

/// Everything the pipeline produces: the prevalent patterns (sorted) and
/// the run statistics the report cares about.
#[derive(Debug, Clone)]
pub struct MiningSummary {
    pub prevalent: Vec<Colocation>,
    pub feature_counts: BTreeMap<FeatureType, usize>,
    pub dispersion: f64,
    pub clique_count: usize,
    pub signature_count: usize,
}
