//! Layered analysis configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults,
//! 2. user config at `<config dir>/bca/config.toml`,
//! 3. project config at `<root>/.bca/config.toml`,
//! 4. an explicit file passed by the caller.
//!
//! Layers are merged key by key, so a project file that only sets
//! `centrality.normalize` keeps every other value from the user layer.
//! Command-line flags are applied on top by the binary.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{LoadError, is_valid_weight};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub centrality: CentralityConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentralityConfig {
    /// Remove vertices with non-positive centrality after the pass.
    #[serde(default = "default_true")]
    pub prune: bool,
    /// Also report scores scaled by `1 / ((n-1)(n-2))`.
    #[serde(default)]
    pub normalize: bool,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            prune: default_true(),
            normalize: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Weight given to document edges that carry none.
    #[serde(default = "default_weight")]
    pub default_weight: f64,
    /// Edges lighter than this are dropped before analysis.
    #[serde(default)]
    pub min_edge_weight: Option<f64>,
    /// Sum repeated `from → to` entries instead of rejecting them.
    #[serde(default = "default_true")]
    pub merge_parallel: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_weight: default_weight(),
            min_edge_weight: None,
            merge_parallel: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Limit rankings to the first N vertices.
    #[serde(default)]
    pub top: Option<usize>,
}

const fn default_true() -> bool {
    true
}

const fn default_weight() -> f64 {
    1.0
}

impl AnalysisConfig {
    /// Check values that serde cannot express.
    ///
    /// # Errors
    ///
    /// Fails if a configured weight is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_weight(self.ingest.default_weight) {
            bail!(
                "ingest.default_weight must be finite and >= 0, got {}",
                self.ingest.default_weight
            );
        }
        if let Some(min) = self.ingest.min_edge_weight {
            if !is_valid_weight(min) {
                bail!("ingest.min_edge_weight must be finite and >= 0, got {min}");
            }
        }
        Ok(())
    }
}

/// Path of the project-level config file under `project_root`.
#[must_use]
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".bca/config.toml")
}

/// Path of the per-user config file, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bca/config.toml"))
}

/// Resolve the effective configuration for `project_root`.
///
/// # Errors
///
/// Returns an error if any present file cannot be read or parsed, if
/// `explicit` is given but missing, or if the merged values are invalid.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<AnalysisConfig> {
    let mut layers = Vec::new();

    if let Some(path) = user_config_path() {
        layers.extend(read_layer(&path)?);
    }
    layers.extend(read_layer(&project_config_path(project_root))?);
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        layers.extend(read_layer(path)?);
    }

    from_layers(layers)
}

/// Merge parsed layers (lowest precedence first) into a config.
///
/// # Errors
///
/// Fails if the merged table does not describe a valid [`AnalysisConfig`].
pub fn from_layers(layers: Vec<toml::Table>) -> Result<AnalysisConfig> {
    let mut merged = toml::Table::new();
    for layer in layers {
        merge_table(&mut merged, layer);
    }
    let config: AnalysisConfig = toml::Value::Table(merged)
        .try_into()
        .context("Failed to interpret merged configuration")?;
    config.validate()?;
    Ok(config)
}

fn read_layer(path: &Path) -> Result<Option<toml::Table>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let table = toml::from_str::<toml::Table>(&content).map_err(|source| LoadError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    // Catch type errors here so they are reported against the right file.
    toml::from_str::<AnalysisConfig>(&content).map_err(|source| LoadError::Config {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "loaded config layer");
    Ok(Some(table))
}

fn merge_table(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_table(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
