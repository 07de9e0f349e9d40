//! `bca stats`: size and fingerprint of a graph document.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use bca_core::DirectedWeightedGraph;
use bca_core::config::load_config;
use bca_core::graph::content_hash;
use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `bca stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Graph document to inspect (JSON edge list).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Extra config file applied on top of user and project config.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Report payload for `bca stats`.
#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub input: String,
    pub vertices: usize,
    pub edges: usize,
    pub isolated_vertices: usize,
    pub total_weight: f64,
    pub content_hash: String,
}

/// Execute `bca stats`.
///
/// The graph is built with the configured ingest settings, so the numbers
/// describe exactly what `bca run` would analyze.
///
/// # Errors
///
/// Fails on unreadable or malformed config and input, and invalid graphs.
pub fn run_stats(args: &StatsArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let config = load_config(project_root, args.config.as_deref())?;
    let graph = super::load_graph(&args.input, &config.ingest)?;

    let stats = GraphStats {
        input: args.input.display().to_string(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        isolated_vertices: graph.isolated_vertices().len(),
        total_weight: graph.edges().iter().map(|e| e.weight).sum(),
        content_hash: content_hash(&graph),
    };

    render_mode(output, &stats, render_text, render_pretty)
}

fn render_text(stats: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "vertices\t{}", stats.vertices)?;
    writeln!(w, "edges\t{}", stats.edges)?;
    writeln!(w, "isolated\t{}", stats.isolated_vertices)?;
    writeln!(w, "total_weight\t{}", stats.total_weight)?;
    writeln!(w, "hash\t{}", stats.content_hash)
}

fn render_pretty(stats: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Graph stats")?;
    pretty_kv(w, "Input", &stats.input)?;
    pretty_kv(w, "Vertices", stats.vertices.to_string())?;
    pretty_kv(w, "Edges", stats.edges.to_string())?;
    pretty_kv(w, "Isolated", stats.isolated_vertices.to_string())?;
    pretty_kv(w, "Weight", format!("{:.4}", stats.total_weight))?;
    pretty_kv(w, "Hash", &stats.content_hash)
}
