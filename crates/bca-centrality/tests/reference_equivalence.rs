//! Randomized comparison against independent references.
//!
//! Weights are small integers so path lengths are exact in `f64` and every
//! implementation agrees on which paths tie. Zero weights only run from a
//! lower to a higher vertex number, which keeps zero-weight cycles out.

mod common;

use std::collections::BTreeSet;

use bca_centrality::{analyze, anchor_pass, betweenness_centrality};
use bca_core::{DirectedWeightedGraph, WeightedGraph, config::CentralityConfig};
use proptest::prelude::*;

use common::{by_label, forward_brandes, path_enumeration};

type Edges = Vec<(usize, usize, u8)>;

/// Vertex count and a simple edge list on `0..n` with weights in
/// `min_weight..=4`.
fn arb_edges(min_weight: u8) -> impl Strategy<Value = (usize, Edges)> {
    (1usize..8).prop_flat_map(move |n| {
        prop::collection::vec((0..n, 0..n, min_weight..=4), 0..(n * n)).prop_map(move |raw| {
            let mut seen = BTreeSet::new();
            let edges: Edges = raw
                .into_iter()
                .filter(|&(a, b, _)| a != b && seen.insert((a, b)))
                .map(|(a, b, w)| (a, b, if w == 0 && a > b { 1 } else { w }))
                .collect();
            (n, edges)
        })
    })
}

/// Add `v{i}` for each `i` in `vertex_order`, then the edges in order.
fn build(vertex_order: &[usize], edges: &[(usize, usize, u8)]) -> WeightedGraph {
    let mut g = WeightedGraph::new();
    for i in vertex_order {
        g.add_vertex(&format!("v{i}"));
    }
    for &(a, b, w) in edges {
        g.add_edge(&format!("v{a}"), &format!("v{b}"), f64::from(w))
            .unwrap();
    }
    g
}

fn arb_graph(min_weight: u8) -> impl Strategy<Value = WeightedGraph> {
    arb_edges(min_weight).prop_map(|(n, edges)| build(&(0..n).collect::<Vec<_>>(), &edges))
}

/// The same graph twice: once in natural order, once with vertices and
/// edges inserted in a shuffled order.
fn arb_reordered() -> impl Strategy<Value = (WeightedGraph, WeightedGraph)> {
    arb_edges(0).prop_flat_map(|(n, edges)| {
        let vertex_order = Just((0..n).collect::<Vec<_>>()).prop_shuffle();
        let edge_order = Just(edges.clone()).prop_shuffle();
        (vertex_order, edge_order).prop_map(move |(vertices, shuffled)| {
            let natural: Vec<usize> = (0..n).collect();
            (build(&natural, &edges), build(&vertices, &shuffled))
        })
    })
}

fn assert_same_scores(
    ours: &std::collections::HashMap<String, f64>,
    reference: &std::collections::HashMap<String, f64>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(ours.len(), reference.len());
    for (id, &expected) in reference {
        let actual = ours[id];
        prop_assert!(
            (actual - expected).abs() < 1e-9,
            "{}: expected {}, got {}", id, expected, actual
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_source_anchored_brandes(g in arb_graph(1)) {
        let ours = by_label(&g, &betweenness_centrality(&g).unwrap());
        assert_same_scores(&ours, &forward_brandes(&g))?;
    }

    #[test]
    fn matches_path_enumeration_with_zero_weights(g in arb_graph(0)) {
        let ours = by_label(&g, &betweenness_centrality(&g).unwrap());
        assert_same_scores(&ours, &path_enumeration(&g))?;
    }

    #[test]
    fn insertion_order_does_not_change_scores((natural, reordered) in arb_reordered()) {
        let first = by_label(&natural, &betweenness_centrality(&natural).unwrap());
        let second = by_label(&reordered, &betweenness_centrality(&reordered).unwrap());
        assert_same_scores(&second, &first)?;
    }

    #[test]
    fn scores_are_non_negative_and_repeatable(g in arb_graph(0)) {
        let first = betweenness_centrality(&g).unwrap();
        for (_, s) in first.iter() {
            prop_assert!(s >= 0.0);
        }
        let second = betweenness_centrality(&g).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn scores_sum_to_total_dependency(g in arb_graph(0)) {
        let total = betweenness_centrality(&g).unwrap().total();
        let mut from_passes = 0.0;
        for anchor in g.vertices() {
            from_passes += anchor_pass(&g, anchor).unwrap().dependency_total();
        }
        prop_assert!((total - from_passes).abs() < 1e-9);
    }

    #[test]
    fn pruning_keeps_only_positive_vertices(g in arb_graph(0)) {
        let mut g = g;
        let before = g.vertex_count();
        let analysis = analyze(&mut g, &CentralityConfig::default()).unwrap();

        let alive = g.vertices();
        prop_assert_eq!(alive.len(), analysis.scores.len());
        for &v in &alive {
            prop_assert!(analysis.scores.get(v).unwrap() > 0.0);
        }
        for e in g.edges() {
            prop_assert!(alive.contains(&e.source) && alive.contains(&e.target));
        }
        let removed = analysis.pruned.unwrap().removed_vertices.len();
        prop_assert_eq!(before, alive.len() + removed);
    }
}
