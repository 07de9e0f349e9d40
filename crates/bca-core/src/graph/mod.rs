//! Weighted directed graph abstraction and its petgraph-backed store.
//!
//! # Overview
//!
//! The centrality engine never touches a concrete graph type. It works
//! against [`DirectedWeightedGraph`], which exposes exactly what a
//! destination-anchored Brandes pass needs: a stable vertex enumeration,
//! incoming/outgoing edge queries with weights, and irreversible deletion
//! for the pruning step.
//!
//! [`WeightedGraph`] is the store used by the CLI and tests: a petgraph
//! `StableDiGraph<String, f64>` plus an identity index so vertex handles
//! survive removals.
//!
//! ## Edge Direction
//!
//! An edge `A → B` has tail (source) `A` and head (target) `B`.
//! [`DirectedWeightedGraph::edges_into`] of `B` yields it;
//! [`DirectedWeightedGraph::edges_out_of`] of `A` yields it.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use bca_core::graph::{DirectedWeightedGraph, WeightedGraph};
//!
//! let mut g = WeightedGraph::new();
//! g.add_edge("alice", "bob", 1.0)?;
//! g.add_edge("bob", "carol", 0.5)?;
//! assert_eq!(g.vertex_count(), 3);
//! ```

pub mod hash;
pub mod store;

use std::fmt;
use std::hash::Hash;

pub use hash::content_hash;
pub use store::WeightedGraph;

/// One directed edge as seen through [`DirectedWeightedGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord<V, E> {
    /// Backend handle, valid until the edge is removed.
    pub id: E,
    /// Tail of the edge.
    pub source: V,
    /// Head of the edge.
    pub target: V,
    /// Step cost; finite and non-negative for a well-formed graph.
    pub weight: f64,
}

/// Storage-independent view of a weighted digraph.
///
/// Handles (`Vertex`, `Edge`) are cheap copies that stay valid until the
/// element is removed. Implementations must return vertices in the same
/// order on repeated calls as long as the graph is not mutated.
pub trait DirectedWeightedGraph {
    type Vertex: Copy + Eq + Hash + Ord + fmt::Debug;
    type Edge: Copy + Eq + Hash + fmt::Debug;

    /// All current vertex handles, in a stable order.
    fn vertices(&self) -> Vec<Self::Vertex>;

    /// All current edges.
    fn edges(&self) -> Vec<EdgeRecord<Self::Vertex, Self::Edge>>;

    /// Edges whose head is `v`. Empty for unknown handles.
    fn edges_into(&self, v: Self::Vertex) -> Vec<EdgeRecord<Self::Vertex, Self::Edge>>;

    /// Edges whose tail is `v`. Empty for unknown handles.
    fn edges_out_of(&self, v: Self::Vertex) -> Vec<EdgeRecord<Self::Vertex, Self::Edge>>;

    /// Weight of the first edge `from → to`, or `None` if they are not adjacent.
    fn weight(&self, from: Self::Vertex, to: Self::Vertex) -> Option<f64>;

    /// Remove `v` and every edge touching it. Returns `false` if `v` was
    /// already gone.
    fn remove_vertex(&mut self, v: Self::Vertex) -> bool;

    /// Remove a single edge. Returns `false` if it was already gone.
    fn remove_edge(&mut self, e: Self::Edge) -> bool;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Human-readable label for logs and reports.
    fn label(&self, v: Self::Vertex) -> String {
        format!("{v:?}")
    }
}
