//! Kind filter
//!
//! Narrows a target set to one rule kind with a query restricted to exactly
//! that set - never the whole graph. Absent kind is a pass-through. A failed
//! filter query falls back to the directory's cached kind tags, which gives
//! the same answer without trusting the tool twice.

use crate::graph::expr::QueryExpr;
use crate::graph::label::TargetLabel;
use crate::graph::query::GraphQuery;
use crate::impact::directory::UnitDirectory;
use crate::impact::unit::UnitKind;
use std::collections::HashSet;

/// Keep only targets of `kind`; pass everything through when `kind` is None.
pub fn filter_kind(
  graph: &dyn GraphQuery,
  directory: &UnitDirectory<'_>,
  targets: &[TargetLabel],
  kind: Option<UnitKind>,
) -> Vec<TargetLabel> {
  let Some(kind) = kind else {
    return targets.to_vec();
  };
  if targets.is_empty() {
    return Vec::new();
  }

  let expr = QueryExpr::kind(kind.metadata_kind(), QueryExpr::set(targets.to_vec()));

  match graph.query(&expr) {
    Ok(labels) => {
      // Restrict to the input set; the filter must never widen it
      let input: HashSet<&TargetLabel> = targets.iter().collect();
      labels.into_iter().filter(|l| input.contains(l)).collect()
    }
    Err(e) => {
      eprintln!(
        "Warning: kind filter query failed ({}); falling back to cached unit kinds",
        e
      );
      // The directory listing is already cached by the time a kind filter
      // runs, so this fallback issues no new query
      let tagged: HashSet<TargetLabel> = match directory.list(Some(kind)) {
        Ok(units) => units.into_iter().map(|u| u.label).collect(),
        Err(_) => HashSet::new(),
      };
      targets.iter().filter(|l| tagged.contains(*l)).cloned().collect()
    }
  }
}
