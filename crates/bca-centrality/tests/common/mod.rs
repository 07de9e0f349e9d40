//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use bca_core::WeightedGraph;

/// Build a graph with `nodes` added first (in order), then `edges`.
pub fn build_graph(nodes: &[&str], edges: &[(&str, &str, f64)]) -> WeightedGraph {
    let mut g = WeightedGraph::new();
    for id in nodes {
        g.add_vertex(id);
    }
    for &(a, b, w) in edges {
        g.add_edge(a, b, w).unwrap();
    }
    g
}

/// Unit-weight graph from an edge list.
pub fn unit_graph(edges: &[(&str, &str)]) -> WeightedGraph {
    let weighted: Vec<(&str, &str, f64)> = edges.iter().map(|&(a, b)| (a, b, 1.0)).collect();
    build_graph(&[], &weighted)
}

/// Every edge in both directions with the same weight.
pub fn mirrored(edges: &[(&str, &str, f64)]) -> WeightedGraph {
    let both: Vec<(&str, &str, f64)> = edges
        .iter()
        .flat_map(|&(a, b, w)| [(a, b, w), (b, a, w)])
        .collect();
    build_graph(&[], &both)
}

/// Textbook source-anchored Brandes with an O(n²) Dijkstra, keyed by
/// vertex label. Used as an independent reference.
pub fn forward_brandes(g: &WeightedGraph) -> HashMap<String, f64> {
    use bca_core::DirectedWeightedGraph;

    let ids = g.vertices();
    let n = ids.len();
    let index: HashMap<_, _> = ids.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let out: Vec<Vec<(usize, f64)>> = ids
        .iter()
        .map(|&v| {
            g.edges_out_of(v)
                .into_iter()
                .map(|e| (index[&e.target], e.weight))
                .collect()
        })
        .collect();

    let mut cb = vec![0.0; n];
    for s in 0..n {
        let mut dist = vec![f64::INFINITY; n];
        let mut sigma = vec![0.0; n];
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut done = vec![false; n];
        let mut stack = Vec::new();
        dist[s] = 0.0;
        sigma[s] = 1.0;

        loop {
            let next = (0..n)
                .filter(|&v| !done[v] && dist[v].is_finite())
                .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
            let Some(v) = next else { break };
            done[v] = true;
            stack.push(v);
            for &(w, weight) in &out[v] {
                let alt = dist[v] + weight;
                if alt < dist[w] {
                    dist[w] = alt;
                    sigma[w] = 0.0;
                    preds[w].clear();
                }
                if (dist[w] - alt).abs() < 1e-12 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0; n];
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    ids.iter()
        .zip(cb)
        .map(|(&v, score)| (g.label(v), score))
        .collect()
}

/// Betweenness by enumerating every simple path, keyed by vertex label.
///
/// With no zero-weight cycle every shortest walk is a simple path, so this
/// is exact for small integer weights including 0. Exponential in the
/// graph size.
#[allow(clippy::cast_precision_loss)]
pub fn path_enumeration(g: &WeightedGraph) -> HashMap<String, f64> {
    use bca_core::DirectedWeightedGraph;

    let ids = g.vertices();
    let n = ids.len();
    let index: HashMap<_, _> = ids.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let out: Vec<Vec<(usize, f64)>> = ids
        .iter()
        .map(|&v| {
            g.edges_out_of(v)
                .into_iter()
                .map(|e| (index[&e.target], e.weight))
                .collect()
        })
        .collect();

    let mut cb = vec![0.0; n];
    for s in 0..n {
        let mut paths = Vec::new();
        extend_paths(&out, &mut vec![s], 0.0, &mut paths);

        for t in (0..n).filter(|&t| t != s) {
            let to_t: Vec<&SimplePath> = paths.iter().filter(|p| p.target == t).collect();
            let Some(best) = to_t.iter().map(|p| p.length).min_by(f64::total_cmp) else {
                continue;
            };
            let shortest: Vec<&SimplePath> = to_t
                .into_iter()
                .filter(|p| (p.length - best).abs() < 1e-9)
                .collect();
            let share = 1.0 / shortest.len() as f64;
            for p in shortest {
                for &v in &p.interior {
                    cb[v] += share;
                }
            }
        }
    }

    ids.iter()
        .zip(cb)
        .map(|(&v, score)| (g.label(v), score))
        .collect()
}

struct SimplePath {
    target: usize,
    length: f64,
    interior: Vec<usize>,
}

fn extend_paths(
    out: &[Vec<(usize, f64)>],
    path: &mut Vec<usize>,
    length: f64,
    found: &mut Vec<SimplePath>,
) {
    let Some(&last) = path.last() else { return };
    for &(w, weight) in &out[last] {
        if path.contains(&w) {
            continue;
        }
        found.push(SimplePath {
            target: w,
            length: length + weight,
            interior: path[1..].to_vec(),
        });
        path.push(w);
        extend_paths(out, path, length + weight, found);
        path.pop();
    }
}

/// Scores keyed by vertex label.
pub fn by_label(
    g: &WeightedGraph,
    scores: &bca_centrality::CentralityScores<petgraph::stable_graph::NodeIndex>,
) -> HashMap<String, f64> {
    use bca_core::DirectedWeightedGraph;

    scores.iter().map(|(v, s)| (g.label(v), s)).collect()
}

pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}
