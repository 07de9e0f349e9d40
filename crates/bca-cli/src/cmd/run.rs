//! `bca run`: compute betweenness centrality for a graph document.
//!
//! Pipeline: load config → load document → ingest filtering → centrality →
//! optional pruning → optional scored-document output → ranking.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bca_centrality::analyze;
use bca_core::DirectedWeightedGraph;
use bca_core::config::{AnalysisConfig, load_config};
use bca_core::document::{GraphDocument, save_document};
use bca_core::graph::content_hash;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `bca run`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Graph document to analyze (JSON edge list).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the scored (and pruned) graph to this file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extra config file applied on top of user and project config.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep vertices with zero centrality.
    #[arg(long)]
    pub no_prune: bool,

    /// Also report normalized scores.
    #[arg(long)]
    pub normalize: bool,

    /// Drop edges lighter than this before analysis.
    #[arg(long, value_name = "W")]
    pub min_edge_weight: Option<f64>,

    /// Show only the N highest-ranked vertices.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

impl RunArgs {
    /// Apply command-line overrides on top of the file-based config.
    fn apply(&self, config: &mut AnalysisConfig) {
        if self.no_prune {
            config.centrality.prune = false;
        }
        if self.normalize {
            config.centrality.normalize = true;
        }
        if self.min_edge_weight.is_some() {
            config.ingest.min_edge_weight = self.min_edge_weight;
        }
        if self.top.is_some() {
            config.output.top = self.top;
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedVertex {
    pub id: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<f64>,
}

/// Report payload for `bca run`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub input: String,
    /// Hash of the graph as analyzed, before pruning.
    pub content_hash: String,
    pub vertices: usize,
    pub edges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pruned_vertices: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pruned_edges: Option<usize>,
    pub remaining_vertices: usize,
    pub remaining_edges: usize,
    pub total: f64,
    pub ranking: Vec<RankedVertex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Execute `bca run`.
///
/// # Errors
///
/// Fails on unreadable or malformed config and input, invalid graphs, and
/// output write errors.
pub fn run_centrality(args: &RunArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let mut config = load_config(project_root, args.config.as_deref())?;
    args.apply(&mut config);
    config.validate().context("Invalid command-line overrides")?;

    let mut graph = super::load_graph(&args.input, &config.ingest)?;
    let hash = content_hash(&graph);
    let vertices = graph.vertex_count();
    let edges = graph.edge_count();

    let analysis = analyze(&mut graph, &config.centrality)
        .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    if let Some(ref path) = args.output {
        let doc = GraphDocument::from_graph(&graph, analysis.scores.as_map());
        save_document(path, &doc)?;
        info!(path = %path.display(), "wrote scored graph");
    }

    let limit = config.output.top.unwrap_or(usize::MAX);
    let ranking = analysis
        .scores
        .ranked()
        .into_iter()
        .take(limit)
        .map(|(v, score)| RankedVertex {
            id: graph.label(v),
            score,
            normalized: analysis.normalized.as_ref().and_then(|n| n.get(v)),
        })
        .collect();

    let report = RunReport {
        input: args.input.display().to_string(),
        content_hash: hash,
        vertices,
        edges,
        pruned_vertices: analysis.pruned.as_ref().map(|p| p.removed_vertices.len()),
        pruned_edges: analysis.pruned.as_ref().map(|p| p.removed_edges),
        remaining_vertices: graph.vertex_count(),
        remaining_edges: graph.edge_count(),
        total: analysis.scores.total(),
        ranking,
        output: args.output.as_ref().map(|p| p.display().to_string()),
    };

    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &RunReport, w: &mut dyn Write) -> io::Result<()> {
    for r in &report.ranking {
        match r.normalized {
            Some(n) => writeln!(w, "{}\t{}\t{n}", r.id, r.score)?,
            None => writeln!(w, "{}\t{}", r.id, r.score)?,
        }
    }
    Ok(())
}

fn render_pretty(report: &RunReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Betweenness centrality")?;
    pretty_kv(w, "Input", &report.input)?;
    pretty_kv(w, "Hash", &report.content_hash)?;
    pretty_kv(
        w,
        "Graph",
        format!("{} vertices, {} edges", report.vertices, report.edges),
    )?;
    if let (Some(v), Some(e)) = (report.pruned_vertices, report.pruned_edges) {
        pretty_kv(
            w,
            "Pruned",
            format!(
                "{v} vertices, {e} edges ({} vertices left)",
                report.remaining_vertices
            ),
        )?;
    }
    if let Some(ref path) = report.output {
        pretty_kv(w, "Written", path)?;
    }
    writeln!(w)?;

    if report.ranking.is_empty() {
        return writeln!(w, "No vertices to rank.");
    }
    let width = report
        .ranking
        .iter()
        .map(|r| r.id.len())
        .max()
        .unwrap_or(0)
        .max(6);
    for (rank, r) in report.ranking.iter().enumerate() {
        match r.normalized {
            Some(n) => writeln!(
                w,
                "{:>4}. {:<width$}  {:>12.4}  {n:>8.4}",
                rank + 1,
                r.id,
                r.score
            )?,
            None => writeln!(w, "{:>4}. {:<width$}  {:>12.4}", rank + 1, r.id, r.score)?,
        }
    }
    Ok(())
}
