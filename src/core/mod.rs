//! Core building blocks shared by all shipyard commands:
//!
//! - **config**: ship.toml parsing and validation (classification rules as data)
//! - **context**: unified invocation context built once in main
//! - **error**: error types with contextual help messages and exit codes
//! - **vcs**: git operations abstraction (SystemGit diff provider)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
