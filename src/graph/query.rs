//! Graph-query client
//!
//! The build graph is owned by the external build tool; the engine only ever
//! sees it through query results. `GraphQuery` is the seam between the two:
//! components depend on the trait, `BazelClient` drives the real binary, and
//! tests substitute an in-memory graph.

use crate::core::config::GraphConfig;
use crate::core::error::QueryError;
use crate::graph::expr::QueryExpr;
use crate::graph::label::TargetLabel;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Executes query expressions against the external build graph.
pub trait GraphQuery {
  /// Evaluate one expression, returning labels in the tool's stable output order.
  fn query(&self, expr: &QueryExpr) -> Result<Vec<TargetLabel>, QueryError>;
}

/// Graph-query client driving the Bazel binary.
pub struct BazelClient {
  workspace_root: PathBuf,
  bin: String,
}

impl BazelClient {
  pub fn new(workspace_root: &Path, config: &GraphConfig) -> Self {
    Self {
      workspace_root: workspace_root.to_path_buf(),
      bin: config.bin.clone(),
    }
  }

  /// Create a safe query command with isolated environment
  ///
  /// Mirrors the git layer: working directory pinned to the workspace root,
  /// environment cleared except PATH and HOME.
  fn query_cmd(&self) -> Command {
    let mut cmd = Command::new(&self.bin);

    cmd.current_dir(&self.workspace_root);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd
  }
}

impl GraphQuery for BazelClient {
  fn query(&self, expr: &QueryExpr) -> Result<Vec<TargetLabel>, QueryError> {
    let expression = expr.render();

    let output = self
      .query_cmd()
      .args(["query", "--output", "label", "--noshow_progress"])
      .arg(&expression)
      .output()
      .map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
          QueryError::ToolMissing { bin: self.bin.clone() }
        } else {
          QueryError::ToolFailed {
            expression: expression.clone(),
            stderr: e.to_string(),
          }
        }
      })?;

    if !output.status.success() {
      return Err(QueryError::ToolFailed {
        expression,
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| QueryError::MalformedOutput {
      expression: expression.clone(),
      detail: e.to_string(),
    })?;

    parse_label_output(&expression, &stdout)
  }
}

/// Parse `--output label` lines into labels.
///
/// Every non-empty line must be a label; anything else means the tool's
/// output contract was broken (wrong flags, injected warnings) and the whole
/// result is rejected rather than half-parsed.
fn parse_label_output(expression: &str, stdout: &str) -> Result<Vec<TargetLabel>, QueryError> {
  let mut labels = Vec::new();

  for line in stdout.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    if !line.starts_with("//") && !line.starts_with('@') {
      return Err(QueryError::MalformedOutput {
        expression: expression.to_string(),
        detail: format!("unexpected line '{}'", line),
      });
    }
    labels.push(TargetLabel::new(line));
  }

  Ok(labels)
}
