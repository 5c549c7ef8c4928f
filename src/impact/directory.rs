//! Deployable-unit directory
//!
//! The one place allowed to query the whole graph: a single `kind` query
//! over `//...` enumerates every unit's metadata target. The listing is
//! memoized in this object for the rest of the invocation; the cache lives
//! and dies with the directory, never in module state. An empty listing is a
//! normal terminal state ("nothing can ever be affected"), while a failed
//! listing is fatal because no downstream step can run without a universe.

use crate::core::error::ShipResult;
use crate::graph::expr::QueryExpr;
use crate::graph::label::TargetLabel;
use crate::graph::query::GraphQuery;
use crate::impact::unit::{DeployableUnit, UnitKind};
use std::cell::RefCell;

/// Enumerates deployable units, one whole-graph query per invocation.
pub struct UnitDirectory<'a> {
  graph: &'a dyn GraphQuery,

  /// Invocation-scoped memo of the full listing. RefCell, not a lock: the
  /// engine is single-threaded and the cache never crosses an invocation.
  cache: RefCell<Option<Vec<DeployableUnit>>>,
}

impl<'a> UnitDirectory<'a> {
  pub fn new(graph: &'a dyn GraphQuery) -> Self {
    Self {
      graph,
      cache: RefCell::new(None),
    }
  }

  /// All known units, in the graph tool's stable listing order.
  pub fn list_all(&self) -> ShipResult<Vec<DeployableUnit>> {
    if let Some(units) = self.cache.borrow().as_ref() {
      return Ok(units.clone());
    }

    let expr = QueryExpr::kind(UnitKind::metadata_pattern(), QueryExpr::subtree(""));
    let labels = self.graph.query(&expr)?;

    let units: Vec<DeployableUnit> = labels
      .into_iter()
      .filter_map(DeployableUnit::from_metadata_label)
      .collect();

    *self.cache.borrow_mut() = Some(units.clone());
    Ok(units)
  }

  /// Units of one kind, or every unit when `kind` is None.
  pub fn list(&self, kind: Option<UnitKind>) -> ShipResult<Vec<DeployableUnit>> {
    let units = self.list_all()?;
    Ok(match kind {
      Some(kind) => units.into_iter().filter(|u| u.kind == kind).collect(),
      None => units,
    })
  }

  /// Metadata labels of every known unit: the bounded universe for
  /// reverse-dependency search.
  pub fn universe(&self) -> ShipResult<Vec<TargetLabel>> {
    Ok(self.list_all()?.into_iter().map(|u| u.label).collect())
  }
}
