//! Change-impact orchestration
//!
//! Given a base ref and the working-tree diff, determine which deployable
//! units are affected:
//! - Which targets the changed files directly touch (resolver)
//! - Which units transitively depend on those targets (bounded reachability)
//! - The final ordered unit set, optionally narrowed to one kind
//!
//! The flow is linear with three short-circuits: no base ref returns the
//! full listing (safe default for a first release), an empty diff returns
//! nothing, and an empty resolution skips the reachability query entirely.
//! A diff failure is treated like a missing base ref - the system prefers
//! over-building to silently under-building.

use crate::core::config::ClassifierConfig;
use crate::core::error::ShipResult;
use crate::core::vcs::DiffSource;
use crate::graph::label::TargetLabel;
use crate::graph::query::GraphQuery;
use crate::impact::classify::FileClassifier;
use crate::impact::directory::UnitDirectory;
use crate::impact::kind::filter_kind;
use crate::impact::reachability::reachable;
use crate::impact::resolve::resolve;
use crate::impact::unit::{DeployableUnit, UnitKind};
use std::collections::HashSet;

/// Complete impact analysis for one change set.
#[derive(Debug, Clone)]
pub struct ImpactAnalysis {
  /// Files that changed
  pub changed_files: Vec<String>,

  /// Targets the change set directly affects
  pub direct: Vec<TargetLabel>,

  /// Affected units, ordered and deduplicated
  pub units: Vec<DeployableUnit>,
}

impl ImpactAnalysis {
  fn none(changed_files: Vec<String>) -> Self {
    Self {
      changed_files,
      direct: Vec::new(),
      units: Vec::new(),
    }
  }
}

/// Sequences classifier, resolver, directory, reachability and kind filter
/// into one deterministic function of the invocation's inputs.
pub struct ImpactAnalyzer<'a> {
  graph: &'a dyn GraphQuery,
  diff: &'a dyn DiffSource,
  classifier: FileClassifier<'a>,
  directory: UnitDirectory<'a>,
}

impl<'a> ImpactAnalyzer<'a> {
  pub fn new(graph: &'a dyn GraphQuery, diff: &'a dyn DiffSource, config: &'a ClassifierConfig) -> Self {
    Self {
      graph,
      diff,
      classifier: FileClassifier::new(config),
      directory: UnitDirectory::new(graph),
    }
  }

  /// Affected units for a change set - the single public entry point.
  pub fn detect_affected(&self, base_ref: Option<&str>, kind: Option<UnitKind>) -> ShipResult<Vec<DeployableUnit>> {
    Ok(self.analyze(base_ref, kind)?.units)
  }

  /// Like [`detect_affected`], but keeps the intermediate results for display.
  ///
  /// [`detect_affected`]: ImpactAnalyzer::detect_affected
  pub fn analyze(&self, base_ref: Option<&str>, kind: Option<UnitKind>) -> ShipResult<ImpactAnalysis> {
    let Some(base) = base_ref else {
      return self.full_listing(kind);
    };

    let changed = match self.diff.changed_files(base) {
      Ok(files) => files,
      Err(e) => {
        eprintln!(
          "Warning: could not diff against '{}' ({}); treating every unit as affected",
          base, e
        );
        return self.full_listing(kind);
      }
    };

    if changed.is_empty() {
      return Ok(ImpactAnalysis::none(Vec::new()));
    }
    let changed_display: Vec<String> = changed.iter().map(|p| p.display().to_string()).collect();

    let classified = self.classifier.classify_all(&changed);
    let direct = resolve(self.graph, &classified);
    if direct.is_empty() {
      // Nothing directly touched: skip the expensive reachability query
      return Ok(ImpactAnalysis::none(changed_display));
    }

    // The sole whole-graph query; failure here is fatal (no universe, no answer)
    let units = self.directory.list_all()?;
    if units.is_empty() {
      return Ok(ImpactAnalysis {
        changed_files: changed_display,
        direct,
        units: Vec::new(),
      });
    }

    let universe: Vec<TargetLabel> = units.iter().map(|u| u.label.clone()).collect();
    let reached = reachable(self.graph, &direct, &universe);
    let kept = filter_kind(self.graph, &self.directory, &reached, kind);

    // Translate labels back to units in listing order: stable tool output +
    // per-invocation cache make identical inputs produce identical sequences
    let kept_set: HashSet<&TargetLabel> = kept.iter().collect();
    let affected: Vec<DeployableUnit> = units.into_iter().filter(|u| kept_set.contains(&u.label)).collect();

    Ok(ImpactAnalysis {
      changed_files: changed_display,
      direct,
      units: affected,
    })
  }

  fn full_listing(&self, kind: Option<UnitKind>) -> ShipResult<ImpactAnalysis> {
    Ok(ImpactAnalysis {
      changed_files: Vec::new(),
      direct: Vec::new(),
      units: self.directory.list(kind)?,
    })
  }
}
