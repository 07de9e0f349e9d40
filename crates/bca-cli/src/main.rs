#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "bca: weighted betweenness centrality for directed graphs",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (ignored when BCA_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Compute betweenness centrality",
        long_about = "Compute weighted betweenness centrality for a JSON graph document, \
                      prune vertices without betweenness, and print the ranking.",
        after_help = "EXAMPLES:\n    # Rank every vertex\n    bca run graph.json\n\n    # Keep all vertices and show the top 10\n    bca run graph.json --no-prune --top 10\n\n    # Save the scored, pruned graph\n    bca run graph.json --output scored.json"
    )]
    Run(cmd::run::RunArgs),

    #[command(
        about = "Show graph size and content hash",
        after_help = "EXAMPLES:\n    # Inspect a document\n    bca stats graph.json\n\n    # Emit machine-readable output\n    bca stats graph.json --json"
    )]
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("BCA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "bca=debug,info"
        } else {
            "bca=info,warn"
        })
    });
    let format = env::var("BCA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    let result = env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|project_root| match cli.command {
            Commands::Run(ref args) => cmd::run::run_centrality(args, output, &project_root),
            Commands::Stats(ref args) => cmd::stats::run_stats(args, output, &project_root),
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            let cli_error = CliError::from_anyhow(&err);
            if output::render_error(output, &cli_error).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
