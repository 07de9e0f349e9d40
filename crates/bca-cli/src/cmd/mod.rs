//! Subcommand handlers.

pub mod run;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use bca_core::WeightedGraph;
use bca_core::config::IngestConfig;
use bca_core::document::load_document;

/// Read `input` and build the graph under the given ingest settings.
fn load_graph(input: &Path, ingest: &IngestConfig) -> Result<WeightedGraph> {
    let doc = load_document(input)?;
    let graph = doc
        .to_graph(ingest)
        .with_context(|| format!("Failed to build graph from {}", input.display()))?;
    Ok(graph)
}
