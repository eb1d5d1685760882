//! Core data model: spatial instances, feature types and canonical
//! co-locations.
//!
//! Every downstream structure (neighbor graph, clique list, clique index,
//! miner state) borrows instances from one owning `Vec<SpatialInstance>`
//! whose lifetime spans the whole run. Instance identity is `(feature, id)`
//! only; coordinates never participate in equality, hashing or ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Categorical feature identifier (e.g. "Restaurant", "A").
pub type FeatureType = String;

/// Instance identifier, unique within a dataset (e.g. "A1", "B2").
pub type InstanceId = String;

/// One geotagged observation: a feature type at a 2D location.
#[derive(Debug, Clone)]
pub struct SpatialInstance {
    pub feature: FeatureType,
    pub id: InstanceId,
    pub x: f64,
    pub y: f64,
}

impl SpatialInstance {
    pub fn new(
        feature: impl Into<FeatureType>,
        id: impl Into<InstanceId>,
        x: f64,
        y: f64,
    ) -> Self {
        Self { feature: feature.into(), id: id.into(), x, y }
    }

    /// Build an instance whose id is the feature name followed by a number,
    /// the composition used by tabular sources ("A" + 1 → "A1").
    pub fn numbered(feature: &str, number: i64, x: f64, y: f64) -> Self {
        Self::new(feature, format!("{feature}{number}"), x, y)
    }

    pub fn distance(&self, other: &SpatialInstance) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// Identity is (feature, id). Distinct physical records with matching
// identity collapse to one vertex when the neighbor graph is built.
impl PartialEq for SpatialInstance {
    fn eq(&self, other: &Self) -> bool {
        self.feature == other.feature && self.id == other.id
    }
}

impl Eq for SpatialInstance {}

impl Hash for SpatialInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.feature.hash(state);
        self.id.hash(state);
    }
}

impl PartialOrd for SpatialInstance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpatialInstance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.feature
            .cmp(&other.feature)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for SpatialInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.3}, {:.3})", self.id, self.x, self.y)
    }
}

/// A co-location pattern: a sorted, duplicate-free sequence of feature
/// types.
///
/// The constructor enforces the canonical form, so any two `Colocation`s
/// built from the same type set compare equal regardless of input order.
/// This is the map-key form used by the clique index and the miner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Colocation(Vec<FeatureType>);

impl Colocation {
    /// Canonicalize: sort ascending, drop duplicates.
    pub fn new(types: impl IntoIterator<Item = FeatureType>) -> Self {
        let mut types: Vec<FeatureType> = types.into_iter().collect();
        types.sort();
        types.dedup();
        Self(types)
    }

    /// Signature of a group of instances: the distinct feature types
    /// present, canonicalized. Multiple same-type instances collapse to a
    /// single entry; a signature is a pattern, not a multiset.
    pub fn signature_of<'a>(instances: impl IntoIterator<Item = &'a SpatialInstance>) -> Self {
        Self::new(instances.into_iter().map(|p| p.feature.clone()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureType> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[FeatureType] {
        &self.0
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.0.binary_search_by(|f| f.as_str().cmp(feature)).is_ok()
    }

    /// True iff every feature of `other` appears in `self`. Both sides are
    /// sorted, so this is a single merge walk.
    pub fn is_superset_of(&self, other: &Colocation) -> bool {
        let mut own = self.0.iter();
        'outer: for want in &other.0 {
            for have in own.by_ref() {
                match have.cmp(want) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    /// The immediate sub-pattern obtained by removing one feature.
    /// Removal preserves the canonical form.
    pub fn without(&self, feature: &str) -> Colocation {
        Colocation(
            self.0
                .iter()
                .filter(|f| f.as_str() != feature)
                .cloned()
                .collect(),
        )
    }
}

impl fmt::Display for Colocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{t}")?;
        }
        write!(f, "}}")
    }
}

/// Max-heap ordering for the candidate queue: larger patterns first,
/// ties broken by lexicographically smaller sequence.
///
/// The order is load-bearing: the top-down lattice traversal must visit
/// larger patterns before their subsets for the shared-minimum-feature
/// deduction to discharge whole downward cones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRank(pub Colocation);

impl Ord for CandidateRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| other.0.cmp(&self.0))
    }
}

impl PartialOrd for CandidateRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
