//! Typed access to the external build graph
//!
//! - **label**: target-label newtype (package + name accessors)
//! - **expr**: tagged-variant query expressions, rendered at the boundary
//! - **query**: the `GraphQuery` seam and the Bazel subprocess client

pub mod expr;
pub mod label;
pub mod query;

pub use expr::QueryExpr;
pub use label::TargetLabel;
pub use query::{BazelClient, GraphQuery};
