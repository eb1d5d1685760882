//! Maximal clique enumeration over the neighbor graph.
//!
//! Bron–Kerbosch with pivoting on a compact integer node space. Every set
//! operation on the hot path (∩, ∖, ordered insert/remove) is a single-pass
//! merge over sorted `Vec<usize>`; no hash sets inside the recursion.
//!
//! Worst case O(3^(N/3)) maximal cliques; nothing here assumes a bound on
//! clique count or size.

use std::collections::HashMap;

use log::{debug, info};

use crate::core::SpatialInstance;
use crate::graph::NeighborSet;

/// A maximal clique as a sorted list of instance borrows: pairwise
/// adjacent, with no proper superset that is also pairwise adjacent.
pub type MaximalClique<'a> = Vec<&'a SpatialInstance>;

// ──────────────────────────────────────────────────────────────────────────
// Enumeration
// ──────────────────────────────────────────────────────────────────────────

/// Enumerate every maximal clique of size ≥ 2, each emitted exactly once.
///
/// Identities are compacted to dense ids in first-seen order; the identity
/// collapse performed by the graph builder makes emitted cliques distinct
/// as vertex sets, so a plain list accumulator suffices.
pub fn enumerate_maximal_cliques<'a>(graph: &[NeighborSet<'a>]) -> Vec<MaximalClique<'a>> {
    let (nodes, adjacency) = compact(graph);
    let n = nodes.len();
    info!("Enumerating maximal cliques over {} vertices", n);

    let mut out: Vec<Vec<usize>> = Vec::new();
    let mut r = Vec::new();
    let p: Vec<usize> = (0..n).collect();
    let x = Vec::new();
    bron_kerbosch(&adjacency, &mut r, p, x, &mut out);

    debug!("Found {} maximal cliques (size ≥ 2)", out.len());

    out.into_iter()
        .map(|mut ids| {
            ids.sort_unstable();
            ids.into_iter().map(|id| nodes[id]).collect()
        })
        .collect()
}

/// Map each unique identity to a dense id in `[0, N)` and rebuild the
/// adjacency as sorted id vectors.
fn compact<'a>(graph: &[NeighborSet<'a>]) -> (Vec<&'a SpatialInstance>, Vec<Vec<usize>>) {
    let mut ids: HashMap<&SpatialInstance, usize> = HashMap::new();
    let mut nodes: Vec<&SpatialInstance> = Vec::new();

    for set in graph {
        if !ids.contains_key(set.center) {
            ids.insert(set.center, nodes.len());
            nodes.push(set.center);
        }
    }

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for set in graph {
        let u = ids[set.center];
        for nb in &set.neighbors {
            adjacency[u].push(ids[*nb]);
        }
    }
    for nbrs in &mut adjacency {
        nbrs.sort_unstable();
        nbrs.dedup();
    }

    (nodes, adjacency)
}

// ──────────────────────────────────────────────────────────────────────────
// Recursion
// ──────────────────────────────────────────────────────────────────────────

/// `r`: clique under construction; `p`: extensible candidates; `x`:
/// exclusions. All three stay sorted and pairwise disjoint at every node of
/// the search tree.
fn bron_kerbosch(
    adjacency: &[Vec<usize>],
    r: &mut Vec<usize>,
    mut p: Vec<usize>,
    mut x: Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if p.is_empty() && x.is_empty() {
        if r.len() >= 2 {
            out.push(r.clone());
        }
        return;
    }

    // Pivot from P ∪ X whose neighborhood covers the most of P; branching
    // is confined to P \ N(pivot).
    let pivot = choose_pivot(&p, &x, adjacency);
    let branch = difference(&p, &adjacency[pivot]);

    for v in branch {
        let nv = &adjacency[v];
        r.push(v);
        bron_kerbosch(adjacency, r, intersect(&p, nv), intersect(&x, nv), out);
        r.pop();
        remove_sorted(&mut p, v);
        insert_sorted(&mut x, v);
    }
}

/// P ∪ X is non-empty whenever this is called.
fn choose_pivot(p: &[usize], x: &[usize], adjacency: &[Vec<usize>]) -> usize {
    p.iter()
        .chain(x.iter())
        .copied()
        .max_by_key(|&u| intersection_len(p, &adjacency[u]))
        .unwrap_or(0)
}

// ──────────────────────────────────────────────────────────────────────────
// Sorted-vector set algebra
// ──────────────────────────────────────────────────────────────────────────

fn intersect(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

fn intersection_len(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut len) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                len += 1;
                i += 1;
                j += 1;
            }
        }
    }
    len
}

fn difference(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len());
    let mut j = 0;
    for &v in a {
        while j < b.len() && b[j] < v {
            j += 1;
        }
        if j >= b.len() || b[j] != v {
            out.push(v);
        }
    }
    out
}

fn insert_sorted(v: &mut Vec<usize>, value: usize) {
    if let Err(pos) = v.binary_search(&value) {
        v.insert(pos, value);
    }
}

fn remove_sorted(v: &mut Vec<usize>, value: usize) {
    if let Ok(pos) = v.binary_search(&value) {
        v.remove(pos);
    }
}
