//! Weighted betweenness centrality via destination-anchored Brandes.
//!
//! # Algorithm
//!
//! Every vertex serves once as the **anchor**, the common terminus of the
//! paths examined in that pass:
//!
//! 1. Build the shortest-path tree into the anchor by running Dijkstra over
//!    the reverse adjacency ([`crate::shortest`]).
//! 2. Back-propagate dependencies furthest-first and credit every
//!    non-anchor vertex ([`crate::accumulate`]).
//!
//! Summing over all anchors as destinations covers the same ordered
//! `(origin, destination)` pairs as the textbook source-anchored loop, so
//! totals match it for simple digraphs with non-negative weights.
//!
//! Complexity: O(V · (E + V) log V).
//!
//! # Output
//!
//! [`CentralityScores`] with one raw score per vertex. [`analyze`] adds the
//! optional pruning and normalization steps driven by
//! [`CentralityConfig`].

use std::collections::HashMap;

use bca_core::{DirectedWeightedGraph, config::CentralityConfig};
use tracing::{debug, info, instrument, trace};

use crate::accumulate::{DependencyAccumulator, Inconsistency};
use crate::error::CentralityError;
use crate::prune::{PruneReport, prune_non_positive};
use crate::scores::CentralityScores;
use crate::shortest::ShortestPathTree;
use crate::topology::Topology;

/// Compute betweenness centrality for every vertex of `g`.
///
/// The graph is only read. Anchors are visited in `g.vertices()` order.
///
/// # Errors
///
/// Fails before any pass if a weight is negative or not finite, and aborts
/// with [`CentralityError::InconsistentPathCount`] if shortest-path
/// bookkeeping is ever inconsistent.
#[instrument(skip(g), fields(vertices = g.vertex_count(), edges = g.edge_count()))]
pub fn betweenness_centrality<G>(g: &G) -> Result<CentralityScores<G::Vertex>, CentralityError>
where
    G: DirectedWeightedGraph,
{
    let topo = Topology::snapshot(g)?;
    let n = topo.len();
    let mut centrality = vec![0.0; n];

    if n == 0 {
        debug!("empty graph, nothing to do");
        return Ok(CentralityScores::from_dense(&[], &[]));
    }

    let mut tree = ShortestPathTree::new(n);
    let mut acc = DependencyAccumulator::new(n);

    for anchor in 0..n {
        tree.build(&topo, anchor);
        acc.accumulate(&tree, &mut centrality)
            .map_err(|e| inconsistency(g, &topo, e))?;
        trace!(anchor, reached = tree.order().len(), "anchor pass done");
    }

    info!(
        vertices = n,
        edges = topo.edge_count(),
        "betweenness centrality computed"
    );
    Ok(CentralityScores::from_dense(topo.ids(), &centrality))
}

/// Everything one anchor pass computes, keyed by vertex handle.
///
/// Only vertices that can reach the anchor appear in the maps.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPass<V: Eq + std::hash::Hash> {
    pub anchor: V,
    /// Drain order reversed: every vertex comes after the vertices that
    /// follow it toward the anchor.
    pub order: Vec<V>,
    pub distance: HashMap<V, f64>,
    pub path_count: HashMap<V, f64>,
    pub predecessors: HashMap<V, Vec<V>>,
    pub dependency: HashMap<V, f64>,
}

impl<V> AnchorPass<V>
where
    V: Copy + Eq + std::hash::Hash,
{
    /// Sum of dependencies over every vertex except the anchor.
    #[must_use]
    pub fn dependency_total(&self) -> f64 {
        self.dependency
            .iter()
            .filter(|&(v, _)| *v != self.anchor)
            .map(|(_, d)| d)
            .sum()
    }
}

/// Run a single anchor pass and expose its per-vertex state.
///
/// # Errors
///
/// [`CentralityError::UnknownVertex`] if `anchor` is not in `g`, plus the
/// errors of [`betweenness_centrality`].
#[instrument(skip(g))]
pub fn anchor_pass<G>(g: &G, anchor: G::Vertex) -> Result<AnchorPass<G::Vertex>, CentralityError>
where
    G: DirectedWeightedGraph,
{
    let topo = Topology::snapshot(g)?;
    let Some(a) = topo.index_of(anchor) else {
        return Err(CentralityError::UnknownVertex(g.label(anchor)));
    };

    let n = topo.len();
    let mut tree = ShortestPathTree::new(n);
    let mut acc = DependencyAccumulator::new(n);
    let mut scratch = vec![0.0; n];
    tree.build(&topo, a);
    acc.accumulate(&tree, &mut scratch)
        .map_err(|e| inconsistency(g, &topo, e))?;

    let order: Vec<G::Vertex> = tree.order().iter().map(|&i| topo.id(i)).collect();
    let reached = || tree.order().iter().copied();
    Ok(AnchorPass {
        anchor,
        distance: reached().map(|i| (topo.id(i), tree.distance(i))).collect(),
        path_count: reached().map(|i| (topo.id(i), tree.path_count(i))).collect(),
        predecessors: reached()
            .map(|i| {
                let preds = tree.predecessors(i).iter().map(|&p| topo.id(p)).collect();
                (topo.id(i), preds)
            })
            .collect(),
        dependency: reached().map(|i| (topo.id(i), acc.dependency(i))).collect(),
        order,
    })
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<V: Eq + std::hash::Hash> {
    /// Raw scores of the vertices still in the graph.
    pub scores: CentralityScores<V>,
    /// `scores` scaled by `1 / ((n-1)(n-2))`, when requested.
    pub normalized: Option<CentralityScores<V>>,
    /// What pruning removed, when it ran.
    pub pruned: Option<PruneReport<V>>,
}

/// Compute centrality, then prune `g` in place if configured.
///
/// Pruned vertices are dropped from the returned scores, so every entry
/// corresponds to a vertex that is still in `g`.
///
/// # Errors
///
/// Same as [`betweenness_centrality`]. The graph is untouched on error.
#[instrument(skip(g, config))]
pub fn analyze<G>(g: &mut G, config: &CentralityConfig) -> Result<Analysis<G::Vertex>, CentralityError>
where
    G: DirectedWeightedGraph,
{
    let mut scores = betweenness_centrality(g)?;

    let pruned = if config.prune {
        let report = prune_non_positive(g, &scores);
        let removed: std::collections::HashSet<G::Vertex> =
            report.removed_vertices.iter().copied().collect();
        scores.retain(|v| !removed.contains(&v));
        info!(
            removed = report.removed_vertices.len(),
            remaining = g.vertex_count(),
            "pruned graph"
        );
        Some(report)
    } else {
        None
    };

    let normalized = config.normalize.then(|| scores.normalized());

    Ok(Analysis {
        scores,
        normalized,
        pruned,
    })
}

fn inconsistency<G>(g: &G, topo: &Topology<G::Vertex>, e: Inconsistency) -> CentralityError
where
    G: DirectedWeightedGraph,
{
    CentralityError::InconsistentPathCount {
        vertex: g.label(topo.id(e.vertex)),
        predecessor: g.label(topo.id(e.predecessor)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use bca_core::WeightedGraph;
    use petgraph::stable_graph::NodeIndex;

    fn graph(edges: &[(&str, &str, f64)]) -> WeightedGraph {
        let mut g = WeightedGraph::new();
        for &(a, b, w) in edges {
            g.add_edge(a, b, w).unwrap();
        }
        g
    }

    fn score(g: &WeightedGraph, s: &CentralityScores<NodeIndex>, id: &str) -> f64 {
        s.get(g.find_vertex(id).unwrap()).unwrap()
    }

    #[test]
    fn empty_graph_is_a_no_op() {
        let mut g = WeightedGraph::new();
        let analysis = analyze(&mut g, &CentralityConfig::default()).unwrap();
        assert!(analysis.scores.is_empty());
        assert_eq!(analysis.pruned.unwrap().removed_vertices.len(), 0);
    }

    #[test]
    fn weighted_detour_takes_the_credit() {
        // a → c costs 10; a → b → c costs 2, so b carries a⇝c.
        let g = graph(&[("a", "c", 10.0), ("a", "b", 1.0), ("b", "c", 1.0)]);
        let s = betweenness_centrality(&g).unwrap();
        assert!((score(&g, &s, "b") - 1.0).abs() < 1e-12);
        assert!(score(&g, &s, "a").abs() < 1e-12);
        assert!(score(&g, &s, "c").abs() < 1e-12);
    }

    #[test]
    fn heavy_detour_carries_nothing() {
        let g = graph(&[("a", "c", 1.0), ("a", "b", 1.0), ("b", "c", 1.0)]);
        let s = betweenness_centrality(&g).unwrap();
        assert!(score(&g, &s, "b").abs() < 1e-12);
    }

    #[test]
    fn anchor_pass_reports_reached_vertices_only() {
        let mut g = graph(&[("x", "y", 1.0), ("y", "z", 1.0)]);
        g.add_vertex("island");
        let z = g.find_vertex("z").unwrap();
        let pass = anchor_pass(&g, z).unwrap();

        assert_eq!(pass.order.len(), 3);
        assert!(!pass.distance.contains_key(&g.find_vertex("island").unwrap()));
        assert!((pass.distance[&g.find_vertex("x").unwrap()] - 2.0).abs() < 1e-12);
        assert!((pass.dependency_total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn anchor_pass_is_repeatable() {
        let g = graph(&[("a", "b", 1.0), ("a", "c", 1.0), ("b", "d", 1.0), ("c", "d", 1.0)]);
        let d = g.find_vertex("d").unwrap();
        let first = anchor_pass(&g, d).unwrap();
        let second = anchor_pass(&g, d).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, anchor_pass(&g, g.find_vertex("b").unwrap()).unwrap());
    }

    #[test]
    fn anchor_pass_rejects_unknown_anchor() {
        let mut g = graph(&[("x", "y", 1.0)]);
        let x = g.find_vertex("x").unwrap();
        g.remove_vertex(x);
        assert!(matches!(
            anchor_pass(&g, x),
            Err(CentralityError::UnknownVertex(_))
        ));
    }

    #[test]
    fn analyze_without_pruning_keeps_graph() {
        let mut g = graph(&[("x", "y", 1.0), ("y", "z", 1.0)]);
        let config = CentralityConfig {
            prune: false,
            normalize: true,
        };
        let analysis = analyze(&mut g, &config).unwrap();
        assert!(analysis.pruned.is_none());
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(analysis.scores.len(), 3);

        let normalized = analysis.normalized.unwrap();
        let y = g.find_vertex("y").unwrap();
        assert!((normalized.get(y).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn analyze_drops_pruned_scores() {
        let mut g = graph(&[("x", "y", 1.0), ("y", "z", 1.0)]);
        let analysis = analyze(&mut g, &CentralityConfig::default()).unwrap();
        let y = g.find_vertex("y").unwrap();
        assert_eq!(analysis.scores.len(), 1);
        assert!((analysis.scores.get(y).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(analysis.pruned.unwrap().removed_vertices.len(), 2);
    }
}
