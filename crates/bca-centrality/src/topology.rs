//! Read-only reverse-adjacency snapshot used by every anchor pass.
//!
//! Vertices are mapped to dense indices `0..n` in the order returned by
//! [`DirectedWeightedGraph::vertices`], which is also the anchor order.
//! `incoming[v]` lists `(w, weight(w → v))` for every in-neighbour `w`.
//!
//! Weights are validated once, here, before any shortest-path work starts.
//! When a backend reports several edges for the same ordered pair, the first
//! one returned by `edges_into` wins and the rest are ignored.
//!
//! Cycles made only of zero-weight edges are rejected: they put infinitely
//! many shortest walks between the vertices on them.

use std::collections::{HashMap, HashSet};

use bca_core::{DirectedWeightedGraph, error::is_valid_weight};
use tracing::{debug, instrument};

use crate::error::CentralityError;

#[derive(Debug, Clone)]
pub struct Topology<V> {
    ids: Vec<V>,
    index: HashMap<V, usize>,
    incoming: Vec<Vec<(usize, f64)>>,
    edge_count: usize,
}

impl<V> Topology<V>
where
    V: Copy + Eq + std::hash::Hash,
{
    /// Snapshot `g`.
    ///
    /// # Errors
    ///
    /// [`CentralityError::InvalidWeight`] for a negative or non-finite weight,
    /// [`CentralityError::UnknownVertex`] for an edge whose tail is not one
    /// of `g.vertices()`, [`CentralityError::ZeroWeightCycle`] when some
    /// cycle has total weight 0.
    #[instrument(skip(g))]
    pub fn snapshot<G>(g: &G) -> Result<Self, CentralityError>
    where
        G: DirectedWeightedGraph<Vertex = V>,
    {
        let ids = g.vertices();
        let index: HashMap<V, usize> = ids.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let mut incoming = vec![Vec::new(); ids.len()];
        let mut edge_count = 0;
        let mut ignored = 0usize;

        for (vi, &v) in ids.iter().enumerate() {
            let mut seen = HashSet::new();
            for e in g.edges_into(v) {
                if !is_valid_weight(e.weight) {
                    return Err(CentralityError::InvalidWeight {
                        from: g.label(e.source),
                        to: g.label(v),
                        weight: e.weight,
                    });
                }
                let Some(&wi) = index.get(&e.source) else {
                    return Err(CentralityError::UnknownVertex(g.label(e.source)));
                };
                if seen.insert(wi) {
                    incoming[vi].push((wi, e.weight));
                    edge_count += 1;
                } else {
                    ignored += 1;
                }
            }
        }

        if ignored > 0 {
            debug!(ignored, "parallel edges ignored; first edge per ordered pair kept");
        }
        if let Some(v) = zero_weight_cycle(&incoming) {
            return Err(CentralityError::ZeroWeightCycle(g.label(ids[v])));
        }

        Ok(Self {
            ids,
            index,
            incoming,
            edge_count,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of distinct ordered pairs joined by an edge.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// `(w, weight(w → v))` for each in-neighbour `w` of `v`.
    #[must_use]
    pub fn incoming(&self, v: usize) -> &[(usize, f64)] {
        &self.incoming[v]
    }

    #[must_use]
    pub fn id(&self, i: usize) -> V {
        self.ids[i]
    }

    #[must_use]
    pub fn ids(&self) -> &[V] {
        &self.ids
    }

    #[must_use]
    pub fn index_of(&self, v: V) -> Option<usize> {
        self.index.get(&v).copied()
    }
}

/// A vertex on a cycle of zero-weight edges, if any.
///
/// Kahn's algorithm over the zero-weight edges leaves behind the vertices on
/// such a cycle and those downstream of one. Each leftover has a leftover
/// in-neighbour, so walking back `n` steps ends on a cycle.
#[allow(clippy::float_cmp)]
fn zero_weight_cycle(incoming: &[Vec<(usize, f64)>]) -> Option<usize> {
    let n = incoming.len();
    let mut pending = vec![0usize; n];
    let mut outgoing = vec![Vec::new(); n];
    for (v, edges) in incoming.iter().enumerate() {
        for &(w, weight) in edges {
            if weight == 0.0 {
                pending[v] += 1;
                outgoing[w].push(v);
            }
        }
    }

    let mut ready: Vec<usize> = (0..n).filter(|&v| pending[v] == 0).collect();
    while let Some(w) = ready.pop() {
        for &v in &outgoing[w] {
            pending[v] -= 1;
            if pending[v] == 0 {
                ready.push(v);
            }
        }
    }

    let mut v = (0..n).find(|&v| pending[v] > 0)?;
    for _ in 0..n {
        v = incoming[v]
            .iter()
            .find(|&&(w, weight)| weight == 0.0 && pending[w] > 0)
            .map(|&(w, _)| w)?;
    }
    Some(v)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
