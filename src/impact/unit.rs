//! Deployable units and their kinds
//!
//! A deployable unit is a releasable artifact (app or chart) represented in
//! the build graph by one metadata target. By convention the metadata target
//! is named after its rule kind (`app_metadata`, `chart_metadata`), so a
//! unit's identity is fully recoverable from its label: the target name
//! carries the kind, the package path carries domain and name.

use crate::core::error::ConfigError;
use crate::graph::label::TargetLabel;
use serde::Serialize;
use std::fmt;

/// Kind of deployable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
  App,
  Chart,
}

impl UnitKind {
  pub const ALL: [UnitKind; 2] = [UnitKind::App, UnitKind::Chart];

  /// Parse a user-supplied kind string.
  pub fn parse(value: &str) -> Result<Self, ConfigError> {
    match value.to_lowercase().as_str() {
      "app" => Ok(UnitKind::App),
      "chart" => Ok(UnitKind::Chart),
      _ => Err(ConfigError::UnknownKind {
        value: value.to_string(),
      }),
    }
  }

  /// Rule-kind marker of this unit's metadata target.
  pub fn metadata_kind(self) -> &'static str {
    match self {
      UnitKind::App => "app_metadata",
      UnitKind::Chart => "chart_metadata",
    }
  }

  /// Rule-kind pattern matching every unit kind (`a|b` alternation).
  pub fn metadata_pattern() -> String {
    let kinds: Vec<&str> = Self::ALL.iter().map(|k| k.metadata_kind()).collect();
    kinds.join("|")
  }

  pub fn as_str(self) -> &'static str {
    match self {
      UnitKind::App => "app",
      UnitKind::Chart => "chart",
    }
  }
}

impl fmt::Display for UnitKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// One releasable artifact, identified by its metadata target label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployableUnit {
  /// Short name (last package segment): `//apps/billing/api:app_metadata` → `api`
  pub name: String,

  /// Domain / namespace (segment before the name): → `billing`
  pub domain: String,

  /// Metadata target label identifying the unit in the build graph
  pub label: TargetLabel,

  /// Unit kind, recovered from the metadata target name
  pub kind: UnitKind,
}

impl DeployableUnit {
  /// Build a unit from a metadata label, or None when the target name is not
  /// a metadata marker (a non-unit label slipped through a kind query).
  pub fn from_metadata_label(label: TargetLabel) -> Option<Self> {
    let kind = UnitKind::ALL
      .into_iter()
      .find(|k| label.name() == k.metadata_kind())?;

    let mut segments = label.package().rsplit('/');
    let name = segments.next().unwrap_or("").to_string();
    if name.is_empty() {
      return None;
    }
    let domain = segments.next().unwrap_or("").to_string();

    Some(Self {
      name,
      domain,
      label,
      kind,
    })
  }

  /// Display path of the unit: `billing/api` (or just `api` without a domain).
  pub fn path(&self) -> String {
    if self.domain.is_empty() {
      self.name.clone()
    } else {
      format!("{}/{}", self.domain, self.name)
    }
  }
}
