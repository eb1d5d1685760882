use crate::builder::MinerBuilder;
use crate::cliques::enumerate_maximal_cliques;
use crate::core::Colocation;
use crate::graph::build_neighbor_graph;
use crate::index::CliqueIndex;
use crate::miner::weighted_participation_index;
use crate::stats;
use crate::tests::test_data::{inst, make_feature_clusters};

fn coloc(types: &[&str]) -> Colocation {
    Colocation::new(types.iter().map(|t| t.to_string()))
}

#[test]
fn test_two_points_different_types() {
    crate::tests::init();

    let instances = vec![inst("A", 1, 0.0, 0.0), inst("B", 1, 1.0, 0.0)];
    let summary = MinerBuilder::new()
        .with_neighbor_distance(2.0)
        .with_min_prevalence(0.5)
        .mine(&instances);

    assert_eq!(summary.prevalent, vec![coloc(&["A", "B"])]);
    assert_eq!(summary.clique_count, 1);
}

#[test]
fn test_two_points_same_type_yield_nothing() {
    crate::tests::init();

    let instances = vec![inst("A", 1, 0.0, 0.0), inst("A", 2, 1.0, 0.0)];
    let summary = MinerBuilder::new()
        .with_neighbor_distance(2.0)
        .with_min_prevalence(0.5)
        .mine(&instances);

    assert!(summary.prevalent.is_empty());
    assert_eq!(summary.clique_count, 0);
}

#[test]
fn test_triangle_discharges_subsets() {
    crate::tests::init();

    let instances = vec![
        inst("A", 1, 0.0, 0.0),
        inst("B", 1, 1.0, 0.0),
        inst("C", 1, 0.0, 1.0),
    ];
    let summary = MinerBuilder::new()
        .with_neighbor_distance(2.0)
        .with_min_prevalence(0.9)
        .mine(&instances);

    // The triple is prevalent; the size-2 subsets containing the rarest
    // feature come in through the shared-minimum-feature deduction, the
    // remaining pair by testing.
    assert_eq!(
        summary.prevalent,
        vec![
            coloc(&["A", "B"]),
            coloc(&["A", "B", "C"]),
            coloc(&["A", "C"]),
            coloc(&["B", "C"]),
        ]
    );
}

#[test]
fn test_singletons_never_reported() {
    crate::tests::init();

    let instances = vec![inst("A", 1, 0.0, 0.0), inst("B", 1, 1.0, 0.0)];
    let summary = MinerBuilder::new()
        .with_neighbor_distance(2.0)
        .with_min_prevalence(0.01)
        .mine(&instances);

    assert!(summary.prevalent.iter().all(|c| c.len() >= 2));
}

#[test]
fn test_equal_counts_reduce_wpi_to_min_participation_ratio() {
    crate::tests::init();

    // Three co-located A/B clusters plus one lone A/B pair placed apart:
    // counts stay equal (δ = 0), every RI is 1, and WPI is the plain
    // minimum participation ratio.
    let mut instances = make_feature_clusters(&["A", "B"], 3, 0.2, 9);
    instances.push(inst("A", 4, 1000.0, 1000.0));
    instances.push(inst("B", 4, 2000.0, 2000.0));

    let summary = MinerBuilder::new()
        .with_neighbor_distance(1.0)
        .with_min_prevalence(0.7)
        .mine(&instances);

    assert_eq!(summary.dispersion, 0.0);
    // PR = 3/4 for both features; 0.75 ≥ 0.7.
    assert_eq!(summary.prevalent, vec![coloc(&["A", "B"])]);

    let summary = MinerBuilder::new()
        .with_neighbor_distance(1.0)
        .with_min_prevalence(0.8)
        .mine(&instances);
    assert!(summary.prevalent.is_empty(), "0.75 < 0.8 must not pass");
}

#[test]
fn test_min_prevalence_above_one_yields_empty_result() {
    crate::tests::init();

    let instances = vec![inst("A", 1, 0.0, 0.0), inst("B", 1, 1.0, 0.0)];
    let summary = MinerBuilder::new()
        .with_neighbor_distance(2.0)
        .with_min_prevalence(1.01)
        .mine(&instances);

    assert!(summary.prevalent.is_empty());
}

#[test]
fn test_non_positive_distance_yields_empty_result() {
    crate::tests::init();

    let instances = vec![inst("A", 1, 0.0, 0.0), inst("B", 1, 0.0, 0.0)];
    for eps in [0.0, -2.0] {
        let summary = MinerBuilder::new()
            .with_neighbor_distance(eps)
            .with_min_prevalence(0.1)
            .mine(&instances);
        assert!(summary.prevalent.is_empty(), "ε={eps} must yield nothing");
    }
}

#[test]
fn test_non_prevalent_verdict_does_not_expand() {
    crate::tests::init();

    // One A/B/C triangle plus nine isolated A's: the triple's WPI is
    // dragged under the threshold by feature A, so the only candidate is
    // rejected and the lattice below it is never entered.
    let mut instances = vec![
        inst("A", 1, 0.0, 0.0),
        inst("B", 1, 1.0, 0.0),
        inst("C", 1, 0.0, 1.0),
    ];
    for k in 2..=10 {
        instances.push(inst("A", k, 1000.0 + 10.0 * k as f64, 1000.0));
    }

    let summary = MinerBuilder::new()
        .with_neighbor_distance(2.0)
        .with_min_prevalence(0.5)
        .mine(&instances);
    assert!(
        summary.prevalent.is_empty(),
        "no subset may surface once the sole parent is rejected"
    );

    // The sub-pattern [B, C] would have passed had it been tested; it is
    // reachable only through the rejected parent, which must not expand.
    let graph = build_neighbor_graph(&instances, 2.0, true);
    let cliques = enumerate_maximal_cliques(&graph);
    let index = CliqueIndex::from_cliques(&cliques);
    let counts = stats::count_features(&instances);
    let delta = stats::dispersion(&counts);

    let bc = coloc(&["B", "C"]);
    let part = index.query_instances(&bc);
    let intensity = stats::rare_intensity(&bc, &counts, delta);
    let wpi = weighted_participation_index(&part, &bc, &intensity, &counts);
    assert!(wpi >= 0.5, "untested subset would pass (WPI={wpi:.3})");
}

#[test]
fn test_prevalent_patterns_reproduce_their_verdict() {
    crate::tests::init();

    let mut instances = make_feature_clusters(&["A", "B", "C"], 20, 0.3, 3);
    // A fourth feature that only sometimes joins the clusters.
    for k in 1..=5 {
        instances.push(inst("D", k, k as f64 * 100.0, (k % 7) as f64 * 100.0));
    }

    let min_prev = 0.4;
    let summary = MinerBuilder::new()
        .with_neighbor_distance(1.5)
        .with_min_prevalence(min_prev)
        .mine(&instances);
    assert!(
        summary.prevalent.contains(&coloc(&["A", "B", "C"])),
        "tight clusters must surface the full pattern"
    );

    // Recompute every verdict from scratch.
    let graph = build_neighbor_graph(&instances, 1.5, true);
    let cliques = enumerate_maximal_cliques(&graph);
    let index = CliqueIndex::from_cliques(&cliques);
    let counts = stats::count_features(&instances);
    let delta = stats::dispersion(&counts);

    for c in &summary.prevalent {
        let part = index.query_instances(c);
        let intensity = stats::rare_intensity(c, &counts, delta);
        let wpi = weighted_participation_index(&part, c, &intensity, &counts);
        assert!(
            wpi >= min_prev,
            "{c} reported prevalent but recomputed WPI={wpi:.4}"
        );
    }
}
