#![forbid(unsafe_code)]
//! bca-core library.
//!
//! Graph storage, configuration and the JSON interchange format shared by
//! the centrality engine and the `bca` binary.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums at the graph boundary
//!   ([`error::GraphError`], [`error::LoadError`]); `anyhow::Result` for I/O glue.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod document;
pub mod error;
pub mod graph;

pub use error::{ErrorCode, GraphError, LoadError};
pub use graph::{DirectedWeightedGraph, EdgeRecord, WeightedGraph};
