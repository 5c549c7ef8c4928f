//! Bounded reverse-dependency reachability
//!
//! One scoped query answers "which universe members transitively depend on
//! the seed". Scoping the query to the universe - instead of walking reverse
//! dependencies across the whole graph and filtering afterwards - is what
//! keeps the search tractable on a large graph: both the search space and
//! the result are bounded by the deployable units, not by every target.

use crate::graph::expr::QueryExpr;
use crate::graph::label::TargetLabel;
use crate::graph::query::GraphQuery;
use std::collections::HashSet;

/// Universe members that transitively depend on any seed member.
///
/// Guarantees `result ⊆ universe` regardless of what the tool returns. An
/// empty seed (or universe) returns empty without touching the tool. On
/// query failure the result degrades to `seed ∩ universe`: only directly
/// touched units are assumed affected.
pub fn reachable(graph: &dyn GraphQuery, seed: &[TargetLabel], universe: &[TargetLabel]) -> Vec<TargetLabel> {
  if seed.is_empty() || universe.is_empty() {
    return Vec::new();
  }

  let members: HashSet<&TargetLabel> = universe.iter().collect();

  let expr = QueryExpr::rdeps(
    QueryExpr::set(universe.to_vec()),
    QueryExpr::set(seed.to_vec()),
  );

  match graph.query(&expr) {
    // The closure of the universe contains intermediate, non-unit targets;
    // keep only actual universe members
    Ok(labels) => labels.into_iter().filter(|l| members.contains(l)).collect(),
    Err(e) => {
      eprintln!(
        "Warning: reverse-dependency query failed ({}); assuming only directly touched units are affected",
        e
      );
      seed.iter().filter(|l| members.contains(l)).cloned().collect()
    }
  }
}
