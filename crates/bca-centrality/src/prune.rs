//! Post-pass pruning of vertices without betweenness.
//!
//! Every vertex whose score is `<= 0` (or that has no score at all) loses
//! its incident edges and is then removed. A vertex can keep a positive
//! score while every one of its neighbours is pruned; it survives as an
//! isolated vertex.

use bca_core::DirectedWeightedGraph;
use tracing::{debug, instrument, trace};

use crate::scores::CentralityScores;

/// What [`prune_non_positive`] removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneReport<V> {
    pub removed_vertices: Vec<V>,
    pub removed_edges: usize,
}

impl<V> Default for PruneReport<V> {
    fn default() -> Self {
        Self {
            removed_vertices: Vec::new(),
            removed_edges: 0,
        }
    }
}

/// Remove vertices with non-positive centrality from `g`.
#[instrument(skip(g, scores), fields(vertices = g.vertex_count()))]
pub fn prune_non_positive<G>(g: &mut G, scores: &CentralityScores<G::Vertex>) -> PruneReport<G::Vertex>
where
    G: DirectedWeightedGraph,
{
    let mut report = PruneReport::default();

    for v in g.vertices() {
        let score = scores.get(v).unwrap_or(0.0);
        if score > 0.0 {
            continue;
        }

        let incident = g.edges_into(v).into_iter().chain(g.edges_out_of(v));
        let ids: Vec<G::Edge> = incident.map(|e| e.id).collect();
        for e in ids {
            if g.remove_edge(e) {
                report.removed_edges += 1;
            }
        }
        let label = g.label(v);
        if g.remove_vertex(v) {
            trace!(vertex = %label, score, "pruned");
            report.removed_vertices.push(v);
        }
    }

    debug!(
        removed_vertices = report.removed_vertices.len(),
        removed_edges = report.removed_edges,
        "pruned vertices without betweenness"
    );
    report
}
