//! Centrality results keyed by vertex handle.

use std::collections::HashMap;
use std::hash::Hash;

/// Betweenness score per vertex, in anchor order.
///
/// Scores are raw (unnormalized) sums of dependencies. Use
/// [`CentralityScores::normalized`] for the directed `1 / ((n-1)(n-2))`
/// scaling, where `n` is the vertex count at computation time.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityScores<V: Eq + Hash> {
    order: Vec<V>,
    values: HashMap<V, f64>,
    vertex_count: usize,
}

impl<V> CentralityScores<V>
where
    V: Copy + Eq + Hash + Ord,
{
    /// Pair `ids[i]` with `values[i]`.
    #[must_use]
    pub fn from_dense(ids: &[V], values: &[f64]) -> Self {
        let order = ids.to_vec();
        let values = ids.iter().copied().zip(values.iter().copied()).collect();
        Self {
            order,
            values,
            vertex_count: ids.len(),
        }
    }

    #[must_use]
    pub fn get(&self, v: V) -> Option<f64> {
        self.values.get(&v).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of vertices the scores were computed over, including any
    /// removed since.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// `(vertex, score)` in anchor order.
    pub fn iter(&self) -> impl Iterator<Item = (V, f64)> + '_ {
        self.order
            .iter()
            .filter_map(|v| self.values.get(v).map(|&s| (*v, s)))
    }

    #[must_use]
    pub const fn as_map(&self) -> &HashMap<V, f64> {
        &self.values
    }

    /// Highest score first; ties broken by vertex order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(V, f64)> {
        let mut out: Vec<(V, f64)> = self.iter().collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, s)| s).sum()
    }

    /// Scores scaled by `1 / ((n-1)(n-2))`. Graphs with fewer than three
    /// vertices have no intermediate vertices and are returned unchanged.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn normalized(&self) -> Self {
        let n = self.vertex_count;
        if n < 3 {
            return self.clone();
        }
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        Self {
            order: self.order.clone(),
            values: self.values.iter().map(|(&v, &s)| (v, s * scale)).collect(),
            vertex_count: n,
        }
    }

    /// Keep only the vertices for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(V) -> bool) {
        self.values.retain(|&v, _| keep(v));
        let values = &self.values;
        self.order.retain(|v| values.contains_key(v));
    }
}
