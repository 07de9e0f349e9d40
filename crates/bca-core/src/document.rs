//! JSON edge-list interchange format.
//!
//! ```json
//! {
//!   "vertices": [{ "id": "alice" }, { "id": "dave" }],
//!   "edges": [
//!     { "from": "alice", "to": "bob", "weight": 2.0 },
//!     { "from": "bob", "to": "carol" }
//!   ]
//! }
//! ```
//!
//! `vertices` is optional and only needed for vertices without edges.
//! An edge without `weight` gets [`IngestConfig::default_weight`]; the
//! centrality engine itself never sees a missing weight. Written documents
//! carry a `centrality` value per vertex when one is known.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::IngestConfig;
use crate::error::{GraphError, LoadError};
use crate::graph::{DirectedWeightedGraph, WeightedGraph};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GraphDocument {
    #[serde(default)]
    pub vertices: Vec<VertexEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centrality: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl GraphDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build a [`WeightedGraph`].
    ///
    /// Listed vertices are added first, in document order, then edges.
    /// Repeated `from → to` entries are summed when
    /// [`IngestConfig::merge_parallel`] is set. Light edges are dropped last
    /// when [`IngestConfig::min_edge_weight`] is set.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] for invalid weights, self loops, and (with
    /// merging disabled) duplicate edges.
    #[instrument(skip(self, ingest), fields(vertices = self.vertices.len(), edges = self.edges.len()))]
    pub fn to_graph(&self, ingest: &IngestConfig) -> Result<WeightedGraph, GraphError> {
        let mut g = WeightedGraph::with_capacity(self.vertices.len(), self.edges.len());

        for v in &self.vertices {
            g.add_vertex(&v.id);
        }

        for e in &self.edges {
            let weight = e.weight.unwrap_or(ingest.default_weight);
            if ingest.merge_parallel {
                g.accumulate_edge(&e.from, &e.to, weight)?;
            } else {
                g.add_edge(&e.from, &e.to, weight)?;
            }
        }

        if let Some(min) = ingest.min_edge_weight {
            let dropped = g.drop_light_edges(min);
            if dropped.edges_removed > 0 {
                warn!(
                    min_edge_weight = min,
                    edges_removed = dropped.edges_removed,
                    vertices_removed = dropped.vertices_removed,
                    "dropped edges below weight threshold"
                );
            }
        }

        debug!(
            vertices = g.vertex_count(),
            edges = g.edge_count(),
            "graph built from document"
        );
        Ok(g)
    }

    /// Snapshot a graph, attaching `scores` to the vertices that have one.
    ///
    /// Vertices and edges are emitted sorted by identity so output is
    /// reproducible.
    #[must_use]
    pub fn from_graph(g: &WeightedGraph, scores: &HashMap<NodeIndex, f64>) -> Self {
        let mut vertices: Vec<VertexEntry> = g
            .vertices()
            .into_iter()
            .filter_map(|v| {
                g.vertex_id(v).map(|id| VertexEntry {
                    id: id.to_string(),
                    centrality: scores.get(&v).copied(),
                })
            })
            .collect();
        vertices.sort_by(|a, b| a.id.cmp(&b.id));

        let mut edges: Vec<EdgeEntry> = g
            .edges()
            .into_iter()
            .filter_map(|e| g.edge_endpoints(e.id))
            .map(|(from, to, weight)| EdgeEntry {
                from: from.to_string(),
                to: to.to_string(),
                weight: Some(weight),
            })
            .collect();
        edges.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));

        Self { vertices, edges }
    }
}

/// Read a document from disk.
///
/// # Errors
///
/// Fails on I/O errors and with [`LoadError::Document`] on malformed JSON.
pub fn load_document(path: &Path) -> Result<GraphDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let doc = GraphDocument::from_json(&text).map_err(|source| LoadError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(doc)
}

/// Write a document to disk as pretty JSON.
///
/// # Errors
///
/// Fails on serialization or I/O errors.
pub fn save_document(path: &Path, doc: &GraphDocument) -> Result<()> {
    let text = doc.to_json().context("Failed to serialize graph document")?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "saved graph document");
    Ok(())
}
