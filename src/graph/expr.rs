//! Typed query expressions for the external build graph
//!
//! Queries are constructed as tagged variants and rendered to the query
//! tool's textual grammar only at the subprocess boundary. Nothing outside
//! `render` concatenates query strings.

use crate::graph::label::TargetLabel;
use std::fmt;

/// One query against the build graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
  /// Every target declared anywhere under a package: `//pkg/...`
  RecursiveSubtree { package: String },

  /// Every target declared directly in a package: `//pkg:*`
  PackageWildcard { package: String },

  /// Targets of one rule kind within an expression: `kind("pattern", expr)`
  Kind { pattern: String, of: Box<QueryExpr> },

  /// Members of `universe`'s closure that transitively depend on `seed`:
  /// `rdeps(universe, seed)`
  Rdeps {
    universe: Box<QueryExpr>,
    seed: Box<QueryExpr>,
  },

  /// An explicit set of labels: `set(//a:x //b:y)`
  SetLiteral { labels: Vec<TargetLabel> },

  /// Union of expressions: `(a + b)`
  Union { terms: Vec<QueryExpr> },
}

impl QueryExpr {
  pub fn subtree(package: impl Into<String>) -> Self {
    QueryExpr::RecursiveSubtree {
      package: package.into(),
    }
  }

  pub fn package_wildcard(package: impl Into<String>) -> Self {
    QueryExpr::PackageWildcard {
      package: package.into(),
    }
  }

  pub fn kind(pattern: impl Into<String>, of: QueryExpr) -> Self {
    QueryExpr::Kind {
      pattern: pattern.into(),
      of: Box::new(of),
    }
  }

  pub fn rdeps(universe: QueryExpr, seed: QueryExpr) -> Self {
    QueryExpr::Rdeps {
      universe: Box::new(universe),
      seed: Box::new(seed),
    }
  }

  pub fn set(labels: Vec<TargetLabel>) -> Self {
    QueryExpr::SetLiteral { labels }
  }

  pub fn union(terms: Vec<QueryExpr>) -> Self {
    QueryExpr::Union { terms }
  }

  /// Render to the query tool's textual grammar.
  pub fn render(&self) -> String {
    match self {
      QueryExpr::RecursiveSubtree { package } => {
        if package.is_empty() {
          "//...".to_string()
        } else {
          format!("//{}/...", package)
        }
      }
      QueryExpr::PackageWildcard { package } => {
        if package.is_empty() {
          "//:*".to_string()
        } else {
          format!("//{}:*", package)
        }
      }
      QueryExpr::Kind { pattern, of } => format!("kind(\"{}\", {})", pattern, of.render()),
      QueryExpr::Rdeps { universe, seed } => {
        format!("rdeps({}, {})", universe.render(), seed.render())
      }
      QueryExpr::SetLiteral { labels } => {
        let joined: Vec<&str> = labels.iter().map(TargetLabel::as_str).collect();
        format!("set({})", joined.join(" "))
      }
      QueryExpr::Union { terms } => {
        if terms.is_empty() {
          // An empty union has no members; render the empty set
          return "set()".to_string();
        }
        let rendered: Vec<String> = terms.iter().map(QueryExpr::render).collect();
        format!("({})", rendered.join(" + "))
      }
    }
  }
}

impl fmt::Display for QueryExpr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.render())
  }
}
