//! Shipyard configuration (ship.toml) parsing and validation
//!
//! All path-classification rules are configuration data: the classifier and
//! resolver never hardcode repository-specific path lists. A missing config
//! file falls back to defaults; a malformed one is an error.

use crate::core::error::{ConfigError, ResultExt, ShipError, ShipResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for shipyard
/// Searched in order: ship.toml, .ship.toml, .config/ship.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipConfig {
  #[serde(default)]
  pub classifier: ClassifierConfig,
  #[serde(default)]
  pub graph: GraphConfig,
}

/// Rules for classifying changed paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
  /// Path prefixes whose changes never affect any deployable unit
  #[serde(default = "default_ignored_prefixes")]
  pub ignored_prefixes: Vec<String>,

  /// File extensions that are never build inputs (docs, images, lockfiles)
  #[serde(default = "default_non_source_extensions")]
  pub non_source_extensions: Vec<String>,

  /// Exact file names that define build targets
  #[serde(default = "default_definition_files")]
  pub definition_files: Vec<String>,

  /// File extensions that define build targets (macros, rule definitions)
  #[serde(default = "default_definition_extensions")]
  pub definition_extensions: Vec<String>,
}

fn default_ignored_prefixes() -> Vec<String> {
  vec!["docs/".to_string(), ".github/".to_string(), "release/".to_string()]
}

fn default_non_source_extensions() -> Vec<String> {
  ["md", "txt", "png", "svg", "lock"].iter().map(|s| s.to_string()).collect()
}

fn default_definition_files() -> Vec<String> {
  ["BUILD", "BUILD.bazel", "WORKSPACE", "WORKSPACE.bazel"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_definition_extensions() -> Vec<String> {
  vec!["bzl".to_string()]
}

impl Default for ClassifierConfig {
  fn default() -> Self {
    Self {
      ignored_prefixes: default_ignored_prefixes(),
      non_source_extensions: default_non_source_extensions(),
      definition_files: default_definition_files(),
      definition_extensions: default_definition_extensions(),
    }
  }
}

/// Settings for the external graph-query tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
  /// Executable used for graph queries
  #[serde(default = "default_graph_bin")]
  pub bin: String,
}

fn default_graph_bin() -> String {
  "bazel".to_string()
}

impl Default for GraphConfig {
  fn default() -> Self {
    Self {
      bin: default_graph_bin(),
    }
  }
}

impl ShipConfig {
  /// Find config file in search order: ship.toml, .ship.toml, .config/ship.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("ship.toml"),
      path.join(".ship.toml"),
      path.join(".config").join("ship.toml"),
    ];

    candidates.into_iter().find(|c| c.is_file())
  }

  /// Load configuration from a workspace root, falling back to defaults when
  /// no config file exists. A present-but-broken file is an error, not a
  /// silent fallback.
  pub fn load(workspace_root: &Path) -> ShipResult<Self> {
    let Some(config_path) = Self::find_config_path(workspace_root) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ShipConfig = toml_edit::de::from_str(&content).map_err(|e| {
      ShipError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        detail: e.to_string(),
      })
    })?;

    config.validate(&config_path)?;
    Ok(config)
  }

  /// Validate classification rules
  fn validate(&self, config_path: &Path) -> ShipResult<()> {
    let invalid = |detail: String| {
      ShipError::Config(ConfigError::Invalid {
        path: config_path.to_path_buf(),
        detail,
      })
    };

    for prefix in &self.classifier.ignored_prefixes {
      if prefix.starts_with('/') {
        return Err(invalid(format!(
          "ignored prefix '{}' must be repo-relative (no leading slash)",
          prefix
        )));
      }
    }

    for ext in self
      .classifier
      .non_source_extensions
      .iter()
      .chain(&self.classifier.definition_extensions)
    {
      if ext.starts_with('.') {
        return Err(invalid(format!("extension '{}' must not include the leading dot", ext)));
      }
    }

    if self.graph.bin.trim().is_empty() {
      return Err(invalid("[graph] bin must not be empty".to_string()));
    }

    Ok(())
  }
}
