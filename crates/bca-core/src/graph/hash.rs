//! Content hash of a graph's vertex and edge set.
//!
//! The hash is computed over the sorted vertex identities and the sorted
//! `(source, target, weight)` triples, so it is independent of insertion
//! order and changes whenever topology or any weight changes.

use crate::graph::{DirectedWeightedGraph, WeightedGraph};

/// BLAKE3 hash of the graph contents, formatted as `blake3:<hex>`.
#[must_use]
pub fn content_hash(g: &WeightedGraph) -> String {
    let mut vertices: Vec<&str> = g
        .vertices()
        .into_iter()
        .filter_map(|v| g.vertex_id(v))
        .collect();
    vertices.sort_unstable();

    let mut edges: Vec<(&str, &str, u64)> = g
        .edges()
        .into_iter()
        .filter_map(|e| g.edge_endpoints(e.id))
        .map(|(a, b, w)| (a, b, w.to_bits()))
        .collect();
    edges.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for v in vertices {
        hasher.update(v.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (a, b, w) in edges {
        hasher.update(a.as_bytes());
        hasher.update(b"\x00");
        hasher.update(b.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&w.to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}
