//! Prevalent spatial co-location pattern mining.
//!
//! Given geotagged feature instances, discovers subsets of feature types
//! whose instances are frequently spatially close, weighted to give extra
//! salience to rare feature types. The pipeline:
//!
//! 1. Feature statistics and dispersion δ (`stats`).
//! 2. Plane-sweep neighbor graph over heterogeneous-type pairs (`graph`).
//! 3. Bron–Kerbosch maximal clique enumeration (`cliques`).
//! 4. Clique-signature instance index and candidate extraction (`index`).
//! 5. Top-down weighted-PI lattice traversal (`miner`).
//!
//! `MinerBuilder` orchestrates all five stages:
//!
//! ```ignore
//! use colomine::builder::MinerBuilder;
//!
//! let summary = MinerBuilder::new()
//!     .with_neighbor_distance(2.0)
//!     .with_min_prevalence(0.4)
//!     .mine(&instances);
//! for pattern in &summary.prevalent {
//!     println!("{pattern}");
//! }
//! ```

pub mod builder;
pub mod cliques;
pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod index;
pub mod loader;
pub mod miner;
pub mod stats;

#[cfg(test)]
pub(crate) mod tests;

pub use crate::builder::{MinerBuilder, MiningSummary};
pub use crate::core::{Colocation, FeatureType, InstanceId, SpatialInstance};
