//! Single-destination shortest-path trees over the reverse adjacency.
//!
//! # Direction
//!
//! For anchor `a` the tree describes paths that **end** at `a`. Expansion
//! walks edges backwards: settling `v` relaxes every `w` with an edge
//! `w → v`, at cost `weight(w → v)`. This is Dijkstra on the transposed
//! graph rooted at `a`.
//!
//! After [`ShortestPathTree::build`]:
//!
//! - `distance(w)` is the length of the shortest path `w ⇝ a`
//!   (`f64::INFINITY` if `w` cannot reach `a`),
//! - `path_count(w)` is the number of distinct shortest `w ⇝ a` paths,
//! - `predecessors(w)` holds the vertices `v` that follow `w` on those paths,
//! - `order()` lists reached vertices so that every vertex comes after all
//!   of its predecessors; the accumulator drains it from the back.
//!
//! # Phases
//!
//! 1. Dijkstra settles final distances. The frontier is a `BinaryHeap`
//!    without decrease-key: improved distances push a fresh entry and stale
//!    entries are skipped when popped. Keys are the raw bits of non-negative
//!    finite `f64`s, whose integer order matches their numeric order.
//! 2. Every edge `w → v` between reached vertices with
//!    `distance(w) == distance(v) + weight(w → v)` becomes a predecessor
//!    link. This looks at final distances only, so heap pop order never
//!    decides which equal-length paths are kept.
//! 3. Path counts are summed along a topological order of those links,
//!    starting at the anchor.
//!
//! Zero-weight edges can tie vertices at the same distance. The links still
//! form a DAG because [`Topology::snapshot`] rejects zero-weight cycles.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;

use crate::topology::Topology;

/// Per-anchor working buffer, reused across anchors.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    anchor: usize,
    distance: Vec<f64>,
    path_count: Vec<f64>,
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
    /// Predecessors not yet placed in `order`.
    pending: Vec<usize>,
    /// Settlement order of phase 1.
    reached: Vec<usize>,
    order: Vec<usize>,
    settled: FixedBitSet,
    frontier: BinaryHeap<Reverse<(u64, usize)>>,
}

impl ShortestPathTree {
    /// Allocate buffers for a graph of `n` vertices.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            anchor: 0,
            distance: vec![f64::INFINITY; n],
            path_count: vec![0.0; n],
            predecessors: vec![Vec::new(); n],
            successors: vec![Vec::new(); n],
            pending: vec![0; n],
            reached: Vec::with_capacity(n),
            order: Vec::with_capacity(n),
            settled: FixedBitSet::with_capacity(n),
            frontier: BinaryHeap::new(),
        }
    }

    /// Reset every vertex, then seed `anchor` with distance 0 and one path.
    fn reset(&mut self, anchor: usize) {
        self.anchor = anchor;
        self.distance.fill(f64::INFINITY);
        self.path_count.fill(0.0);
        for links in self.predecessors.iter_mut().chain(&mut self.successors) {
            links.clear();
        }
        self.pending.fill(0);
        self.reached.clear();
        self.order.clear();
        self.settled.clear();
        self.frontier.clear();

        self.distance[anchor] = 0.0;
        self.path_count[anchor] = 1.0;
    }

    /// Compute the tree of shortest paths into `anchor`.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` or the topology size does not match the buffers
    /// this tree was allocated with.
    pub fn build<V>(&mut self, topo: &Topology<V>, anchor: usize)
    where
        V: Copy + Eq + std::hash::Hash,
    {
        assert_eq!(topo.len(), self.distance.len(), "tree sized for another graph");
        self.reset(anchor);
        self.settle_distances(topo);
        self.link_shortest_edges(topo);
        self.count_paths();
    }

    fn settle_distances<V>(&mut self, topo: &Topology<V>)
    where
        V: Copy + Eq + std::hash::Hash,
    {
        self.frontier.push(Reverse((0.0f64.to_bits(), self.anchor)));

        while let Some(Reverse((_, v))) = self.frontier.pop() {
            if self.settled.put(v) {
                // Stale entry: v was settled through a shorter key already.
                continue;
            }
            self.reached.push(v);
            let dv = self.distance[v];

            for &(w, weight) in topo.incoming(v) {
                let candidate = dv + weight;
                if candidate < self.distance[w] {
                    self.distance[w] = candidate;
                    self.frontier.push(Reverse((candidate.to_bits(), w)));
                }
            }
        }
    }

    /// Link `w` to `v` for every edge `w → v` that lies on a shortest path.
    #[allow(clippy::float_cmp)]
    fn link_shortest_edges<V>(&mut self, topo: &Topology<V>)
    where
        V: Copy + Eq + std::hash::Hash,
    {
        for &v in &self.reached {
            let dv = self.distance[v];
            for &(w, weight) in topo.incoming(v) {
                // Paths end at the anchor, so it has no predecessors. A sum
                // that overflowed to infinity never matches a finite distance.
                if w == self.anchor || !self.distance[w].is_finite() {
                    continue;
                }
                // Exact equality: only identical sums count as ties.
                if dv + weight == self.distance[w] {
                    self.predecessors[w].push(v);
                    self.successors[v].push(w);
                }
            }
        }
    }

    /// Kahn's algorithm over the links, with `order` doubling as the queue.
    /// A vertex is queued once all of its predecessors are, so its path count
    /// is complete by the time it is read.
    fn count_paths(&mut self) {
        for &v in &self.reached {
            self.pending[v] = self.predecessors[v].len();
        }
        self.order.push(self.anchor);

        let mut next = 0;
        while let Some(&v) = self.order.get(next) {
            next += 1;
            for &w in &self.successors[v] {
                self.path_count[w] += self.path_count[v];
                self.pending[w] -= 1;
                if self.pending[w] == 0 {
                    self.order.push(w);
                }
            }
        }
    }

    #[must_use]
    pub const fn anchor(&self) -> usize {
        self.anchor
    }

    #[must_use]
    pub fn distance(&self, v: usize) -> f64 {
        self.distance[v]
    }

    #[must_use]
    pub fn path_count(&self, v: usize) -> f64 {
        self.path_count[v]
    }

    #[must_use]
    pub fn predecessors(&self, v: usize) -> &[usize] {
        &self.predecessors[v]
    }

    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    #[must_use]
    pub fn is_reached(&self, v: usize) -> bool {
        self.distance[v].is_finite()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
