//! Target resolution: changed files → directly affected target labels
//!
//! Changed packages are batched into at most two queries regardless of how
//! many files changed: one recursive-subtree query for packages with a
//! definition change (a definition edit can alter any target declared
//! anywhere under it) and one package-local wildcard query for packages with
//! a source change (a source edit cannot redefine targets outside its own
//! package). A failed batch degrades to the other batch's result instead of
//! aborting the resolution.

use crate::graph::expr::QueryExpr;
use crate::graph::label::TargetLabel;
use crate::graph::query::GraphQuery;
use crate::impact::classify::{ChangedFile, FileClass};
use std::collections::{BTreeSet, HashSet};

/// Resolve a classified change set to the targets it directly affects.
///
/// External calls are bounded by O(distinct changed packages), not by the
/// number of changed files; the result is ordered and deduplicated.
pub fn resolve(graph: &dyn GraphQuery, files: &[ChangedFile]) -> Vec<TargetLabel> {
  // BTreeSet: distinct packages in stable order, so rendered queries (and
  // thus results) are deterministic for identical change sets
  let mut definition_packages: BTreeSet<String> = BTreeSet::new();
  let mut source_packages: BTreeSet<String> = BTreeSet::new();

  for file in files {
    match file.class {
      FileClass::Ignored => {}
      FileClass::Definition => {
        definition_packages.insert(file.package());
      }
      FileClass::Source => {
        source_packages.insert(file.package());
      }
    }
  }

  let mut labels = Vec::new();
  let mut seen: HashSet<TargetLabel> = HashSet::new();
  let mut collect = |batch: Vec<TargetLabel>| {
    for label in batch {
      if seen.insert(label.clone()) {
        labels.push(label);
      }
    }
  };

  if !definition_packages.is_empty() {
    let expr = QueryExpr::union(
      definition_packages
        .iter()
        .map(|p| QueryExpr::subtree(p.clone()))
        .collect(),
    );
    match graph.query(&expr) {
      Ok(batch) => collect(batch),
      Err(e) => eprintln!(
        "Warning: subtree query for {} definition-changed package(s) failed ({}); continuing with partial resolution",
        definition_packages.len(),
        e
      ),
    }
  }

  if !source_packages.is_empty() {
    let expr = QueryExpr::union(
      source_packages
        .iter()
        .map(|p| QueryExpr::package_wildcard(p.clone()))
        .collect(),
    );
    match graph.query(&expr) {
      Ok(batch) => collect(batch),
      Err(e) => eprintln!(
        "Warning: package query for {} source-changed package(s) failed ({}); continuing with partial resolution",
        source_packages.len(),
        e
      ),
    }
  }

  labels
}
