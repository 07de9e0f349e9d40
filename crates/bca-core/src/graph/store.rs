//! petgraph-backed [`DirectedWeightedGraph`] implementation.
//!
//! Vertex identities are strings (e-mail addresses, item IDs, ...). The
//! store keeps a `HashMap<String, NodeIndex>` next to a `StableDiGraph` so
//! identity lookup is O(1) and handles stay valid while pruning removes
//! other vertices.
//!
//! At most one edge exists per ordered pair. [`WeightedGraph::add_edge`]
//! rejects a second one; [`WeightedGraph::accumulate_edge`] folds it into
//! the existing weight instead.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::{
    Direction,
    stable_graph::{EdgeIndex, EdgeReference, NodeIndex, StableDiGraph},
    visit::{EdgeRef, IntoEdgeReferences},
};
use tracing::{debug, instrument};

use super::{DirectedWeightedGraph, EdgeRecord};
use crate::error::{GraphError, is_valid_weight};

/// A directed, weighted graph keyed by string identity.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    graph: StableDiGraph<String, f64>,
    node_map: HashMap<String, NodeIndex>,
}

/// Counts reported by [`WeightedGraph::drop_light_edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightEdgeDrop {
    pub edges_removed: usize,
    pub vertices_removed: usize,
}

impl WeightedGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            graph: StableDiGraph::with_capacity(vertices, edges),
            node_map: HashMap::with_capacity(vertices),
        }
    }

    /// Return the handle for `id`, creating the vertex if needed.
    pub fn add_vertex(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    /// Add the edge `from → to`, creating missing endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeight`] for negative or non-finite
    /// weights, [`GraphError::SelfLoop`] when `from == to`, and
    /// [`GraphError::DuplicateEdge`] if the ordered pair already has an edge.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<EdgeIndex, GraphError> {
        check_edge(from, to, weight)?;
        let (a, b) = (self.add_vertex(from), self.add_vertex(to));
        if self.graph.find_edge(a, b).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(self.graph.add_edge(a, b, weight))
    }

    /// Add `weight` to the edge `from → to`, creating it (and its endpoints)
    /// when absent.
    ///
    /// # Errors
    ///
    /// Same validation as [`WeightedGraph::add_edge`], minus the duplicate
    /// check.
    pub fn accumulate_edge(
        &mut self,
        from: &str,
        to: &str,
        weight: f64,
    ) -> Result<EdgeIndex, GraphError> {
        check_edge(from, to, weight)?;
        let (a, b) = (self.add_vertex(from), self.add_vertex(to));
        if let Some(e) = self.graph.find_edge(a, b) {
            if let Some(w) = self.graph.edge_weight_mut(e) {
                let total = *w + weight;
                if !is_valid_weight(total) {
                    return Err(GraphError::InvalidWeight {
                        from: from.to_string(),
                        to: to.to_string(),
                        weight: total,
                    });
                }
                *w = total;
            }
            return Ok(e);
        }
        Ok(self.graph.add_edge(a, b, weight))
    }

    #[must_use]
    pub fn find_vertex(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    #[must_use]
    pub fn vertex_id(&self, v: NodeIndex) -> Option<&str> {
        self.graph.node_weight(v).map(String::as_str)
    }

    /// Edge endpoints by identity, e.g. for serialization.
    #[must_use]
    pub fn edge_endpoints(&self, e: EdgeIndex) -> Option<(&str, &str, f64)> {
        let (a, b) = self.graph.edge_endpoints(e)?;
        Some((self.vertex_id(a)?, self.vertex_id(b)?, *self.graph.edge_weight(e)?))
    }

    /// Vertices with neither incoming nor outgoing edges.
    #[must_use]
    pub fn isolated_vertices(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&v| {
                self.graph
                    .neighbors_directed(v, Direction::Incoming)
                    .next()
                    .is_none()
                    && self
                        .graph
                        .neighbors_directed(v, Direction::Outgoing)
                        .next()
                        .is_none()
            })
            .collect()
    }

    /// Remove every edge lighter than `min_weight`, then every vertex left
    /// without edges.
    #[instrument(skip(self))]
    pub fn drop_light_edges(&mut self, min_weight: f64) -> LightEdgeDrop {
        let light: Vec<EdgeIndex> = self
            .graph
            .edge_references()
            .filter(|e| *e.weight() < min_weight)
            .map(|e| e.id())
            .collect();

        let mut report = LightEdgeDrop::default();
        for e in light {
            if self.graph.remove_edge(e).is_some() {
                report.edges_removed += 1;
            }
        }
        for v in self.isolated_vertices() {
            if self.remove_vertex(v) {
                report.vertices_removed += 1;
            }
        }

        debug!(
            edges_removed = report.edges_removed,
            vertices_removed = report.vertices_removed,
            "dropped light edges"
        );
        report
    }

    fn directed(&self, v: NodeIndex, dir: Direction) -> Vec<EdgeRecord<NodeIndex, EdgeIndex>> {
        if !self.graph.contains_node(v) {
            return Vec::new();
        }
        self.graph
            .edges_directed(v, dir)
            .map(record)
            .collect()
    }
}

impl DirectedWeightedGraph for WeightedGraph {
    type Vertex = NodeIndex;
    type Edge = EdgeIndex;

    fn vertices(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    fn edges(&self) -> Vec<EdgeRecord<NodeIndex, EdgeIndex>> {
        self.graph.edge_references().map(record).collect()
    }

    fn edges_into(&self, v: NodeIndex) -> Vec<EdgeRecord<NodeIndex, EdgeIndex>> {
        self.directed(v, Direction::Incoming)
    }

    fn edges_out_of(&self, v: NodeIndex) -> Vec<EdgeRecord<NodeIndex, EdgeIndex>> {
        self.directed(v, Direction::Outgoing)
    }

    fn weight(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        let e = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(e).copied()
    }

    fn remove_vertex(&mut self, v: NodeIndex) -> bool {
        match self.graph.remove_node(v) {
            Some(id) => {
                self.node_map.remove(&id);
                true
            }
            None => false,
        }
    }

    fn remove_edge(&mut self, e: EdgeIndex) -> bool {
        self.graph.remove_edge(e).is_some()
    }

    fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn label(&self, v: NodeIndex) -> String {
        self.vertex_id(v)
            .map_or_else(|| format!("{v:?}"), str::to_string)
    }
}

fn record(e: EdgeReference<'_, f64>) -> EdgeRecord<NodeIndex, EdgeIndex> {
    EdgeRecord {
        id: e.id(),
        source: e.source(),
        target: e.target(),
        weight: *e.weight(),
    }
}

fn check_edge(from: &str, to: &str, weight: f64) -> Result<(), GraphError> {
    if from == to {
        return Err(GraphError::SelfLoop(from.to_string()));
    }
    if !is_valid_weight(weight) {
        return Err(GraphError::InvalidWeight {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
