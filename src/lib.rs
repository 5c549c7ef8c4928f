//! Change-impact analysis for Bazel monorepos
//!
//! Given a base git ref, shipyard determines which deployable units (apps,
//! charts) are affected by the working-tree diff and must be rebuilt,
//! retested or released. The build graph stays where it lives - in the
//! external build tool - and is only ever consulted through a handful of
//! bounded queries.

pub mod commands;
pub mod core;
pub mod graph;
pub mod impact;
