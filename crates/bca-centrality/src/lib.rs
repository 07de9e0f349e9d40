#![forbid(unsafe_code)]
//! bca-centrality library.
//!
//! Weighted betweenness centrality for directed graphs, computed with
//! Brandes' accumulation over single-destination shortest-path trees.
//!
//! # Pipeline
//!
//! ```text
//! DirectedWeightedGraph
//!        ↓  topology::Topology::snapshot()      (validate weights, index vertices)
//! for each anchor:
//!        ↓  shortest::ShortestPathTree::build()  (Dijkstra over reverse edges)
//!        ↓  accumulate::DependencyAccumulator    (furthest-first back-propagation)
//! CentralityScores
//!        ↓  prune::prune_non_positive()          (optional, mutates the graph)
//! ```
//!
//! # Conventions
//!
//! - **Errors**: [`CentralityError`] for everything the engine can reject.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! ```rust,ignore
//! use bca_centrality::analyze;
//! use bca_core::{WeightedGraph, config::CentralityConfig};
//!
//! let mut g = WeightedGraph::new();
//! g.add_edge("x", "y", 1.0)?;
//! g.add_edge("y", "z", 1.0)?;
//! let analysis = analyze(&mut g, &CentralityConfig::default())?;
//! ```

pub mod accumulate;
pub mod betweenness;
pub mod error;
pub mod prune;
pub mod scores;
pub mod shortest;
pub mod topology;

pub use betweenness::{AnchorPass, Analysis, analyze, anchor_pass, betweenness_centrality};
pub use error::CentralityError;
pub use prune::{PruneReport, prune_non_positive};
pub use scores::CentralityScores;
