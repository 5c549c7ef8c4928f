//! Build-graph target labels
//!
//! A label names one node of the external build graph: `//package/path:name`.
//! Labels are opaque to the engine - equality is string equality - but the
//! package and target-name components are needed for batching resolver
//! queries and recovering unit identity.

use serde::Serialize;
use std::fmt;

/// Identifier for one build-graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetLabel(String);

impl TargetLabel {
  pub fn new(label: impl Into<String>) -> Self {
    Self(label.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Package path of the label: `//a/b:c` → `a/b`, `//:c` → ``.
  ///
  /// Labels without an explicit `:name` use the whole path as the package
  /// (the shorthand where the target is named after its package).
  pub fn package(&self) -> &str {
    let body = self.0.strip_prefix("//").unwrap_or(&self.0);
    match body.split_once(':') {
      Some((package, _)) => package,
      None => body,
    }
  }

  /// Target name of the label: `//a/b:c` → `c`, `//a/b` → `b`.
  pub fn name(&self) -> &str {
    let body = self.0.strip_prefix("//").unwrap_or(&self.0);
    match body.split_once(':') {
      Some((_, name)) => name,
      None => body.rsplit('/').next().unwrap_or(body),
    }
  }
}

impl fmt::Display for TargetLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<&str> for TargetLabel {
  fn from(s: &str) -> Self {
    Self::new(s)
  }
}
