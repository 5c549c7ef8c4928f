//! Git operations abstraction

pub mod system_git;

pub use system_git::SystemGit;

use crate::core::error::DiffError;
use std::path::PathBuf;

/// Source of changed files between a base ref and the working tree.
///
/// The engine only ever asks one question of version control; keeping it
/// behind a trait lets tests inject change sets without a repository.
pub trait DiffSource {
  /// Repo-relative paths that differ between `base_ref` and the working tree
  fn changed_files(&self, base_ref: &str) -> Result<Vec<PathBuf>, DiffError>;
}
