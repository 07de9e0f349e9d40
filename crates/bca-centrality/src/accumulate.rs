//! Brandes dependency back-propagation for one anchor.
//!
//! Drains the order of a [`ShortestPathTree`] from the back, so every vertex
//! is drained before the vertices that follow it toward the anchor. For each
//! drained `w` and each
//! predecessor `v` of `w`:
//!
//! ```text
//! dependency(v) += path_count(v) / path_count(w) * (1 + dependency(w))
//! ```
//!
//! and, unless `w` is the anchor, `centrality(w) += dependency(w)`.

use crate::shortest::ShortestPathTree;

/// Dense indices of a predecessor entry whose path counts are not positive.
///
/// Cannot happen for a correctly built tree; reported instead of dividing
/// by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inconsistency {
    pub vertex: usize,
    pub predecessor: usize,
}

/// Per-anchor dependency buffer, reused across anchors.
#[derive(Debug, Clone)]
pub struct DependencyAccumulator {
    dependency: Vec<f64>,
}

impl DependencyAccumulator {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            dependency: vec![0.0; n],
        }
    }

    /// Back-propagate `tree` and add each non-anchor dependency into
    /// `centrality`.
    ///
    /// # Errors
    ///
    /// Returns the first predecessor entry with a non-positive path count on
    /// either side. `centrality` may hold a partial update in that case.
    pub fn accumulate(
        &mut self,
        tree: &ShortestPathTree,
        centrality: &mut [f64],
    ) -> Result<(), Inconsistency> {
        self.dependency.fill(0.0);

        for &w in tree.order().iter().rev() {
            let sigma_w = tree.path_count(w);
            let delta_w = self.dependency[w];

            for &v in tree.predecessors(w) {
                let sigma_v = tree.path_count(v);
                if sigma_w <= 0.0 || sigma_v <= 0.0 {
                    return Err(Inconsistency {
                        vertex: w,
                        predecessor: v,
                    });
                }
                self.dependency[v] += (sigma_v / sigma_w) * (1.0 + delta_w);
            }

            if w != tree.anchor() {
                centrality[w] += delta_w;
            }
        }

        Ok(())
    }

    /// Dependency of `v` on the last accumulated anchor.
    #[must_use]
    pub fn dependency(&self, v: usize) -> f64 {
        self.dependency[v]
    }

    #[must_use]
    pub fn dependencies(&self) -> &[f64] {
        &self.dependency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;
    use bca_core::WeightedGraph;

    type Run = (
        WeightedGraph,
        Topology<petgraph::stable_graph::NodeIndex>,
        Vec<f64>,
        DependencyAccumulator,
    );

    fn run(edges: &[(&str, &str)], anchor: &str) -> Run {
        let mut g = WeightedGraph::new();
        for &(a, b) in edges {
            g.add_edge(a, b, 1.0).unwrap();
        }
        let topo = Topology::snapshot(&g).unwrap();
        let mut tree = ShortestPathTree::new(topo.len());
        let a = topo.index_of(g.find_vertex(anchor).unwrap()).unwrap();
        tree.build(&topo, a);

        let mut centrality = vec![0.0; topo.len()];
        let mut acc = DependencyAccumulator::new(topo.len());
        acc.accumulate(&tree, &mut centrality).unwrap();
        (g, topo, centrality, acc)
    }

    #[test]
    fn chain_dependencies_toward_anchor() {
        // x → y → z → t, anchored at t:
        // z carries x⇝t and y⇝t, y carries x⇝t.
        let (g, topo, centrality, acc) =
            run(&[("x", "y"), ("y", "z"), ("z", "t")], "t");
        let i = |id: &str| topo.index_of(g.find_vertex(id).unwrap()).unwrap();

        assert!((acc.dependency(i("z")) - 2.0).abs() < 1e-12);
        assert!((acc.dependency(i("y")) - 1.0).abs() < 1e-12);
        assert!(acc.dependency(i("x")).abs() < 1e-12);
        assert!((centrality[i("z")] - 2.0).abs() < 1e-12);
        assert!(centrality[i("t")].abs() < 1e-12, "anchor never credited");
    }

    #[test]
    fn split_paths_share_dependency() {
        let (g, topo, centrality, _) =
            run(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")], "d");
        let i = |id: &str| topo.index_of(g.find_vertex(id).unwrap()).unwrap();

        assert!((centrality[i("b")] - 0.5).abs() < 1e-12);
        assert!((centrality[i("c")] - 0.5).abs() < 1e-12);
        assert!(centrality[i("a")].abs() < 1e-12);
    }

    #[test]
    fn buffer_is_reset_between_anchors() {
        let mut g = WeightedGraph::new();
        g.add_edge("x", "y", 1.0).unwrap();
        g.add_edge("y", "z", 1.0).unwrap();
        let topo = Topology::snapshot(&g).unwrap();
        let i = |id: &str| topo.index_of(g.find_vertex(id).unwrap()).unwrap();

        let mut tree = ShortestPathTree::new(topo.len());
        let mut acc = DependencyAccumulator::new(topo.len());
        let mut centrality = vec![0.0; topo.len()];

        tree.build(&topo, i("z"));
        acc.accumulate(&tree, &mut centrality).unwrap();
        tree.build(&topo, i("x"));
        acc.accumulate(&tree, &mut centrality).unwrap();

        assert!(acc.dependencies().iter().all(|d| d.abs() < 1e-12));
        assert!((centrality[i("y")] - 1.0).abs() < 1e-12);
    }
}
