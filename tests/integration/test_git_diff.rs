//! SystemGit diff provider against real temporary repositories

use crate::helpers::TestRepo;
use anyhow::Result;
use shipyard::core::error::{DiffError, ShipError};
use shipyard::core::vcs::{DiffSource, SystemGit};
use std::path::PathBuf;

#[test]
fn test_changed_files_cover_commits_and_worktree() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("apps/api/main.go", "package main\n")?;
  let base = repo.commit("add api")?;

  // One change committed after the base, one left uncommitted
  repo.write_file("shared/lib/util.go", "package lib\n")?;
  repo.commit("add lib")?;
  repo.write_file("apps/api/main.go", "package main // v2\n")?;

  let git = SystemGit::open(&repo.path)?;
  let mut files = git.changed_files(&base)?;
  files.sort();

  assert_eq!(
    files,
    vec![PathBuf::from("apps/api/main.go"), PathBuf::from("shared/lib/util.go")]
  );
  Ok(())
}

#[test]
fn test_clean_worktree_yields_empty_diff() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("apps/api/main.go", "package main\n")?;
  repo.commit("add api")?;

  let git = SystemGit::open(&repo.path)?;
  assert!(git.changed_files("HEAD")?.is_empty());
  Ok(())
}

#[test]
fn test_unknown_ref_is_a_diff_error() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("apps/api/main.go", "package main\n")?;
  repo.commit("add api")?;

  let git = SystemGit::open(&repo.path)?;
  let err = git.changed_files("no-such-ref").unwrap_err();
  assert!(matches!(err, DiffError::UnknownRef { .. }), "got: {}", err);
  Ok(())
}

#[test]
fn test_open_outside_repository_fails() -> Result<()> {
  let dir = tempfile::tempdir()?;
  let err = SystemGit::open(dir.path()).unwrap_err();
  assert!(
    matches!(err, ShipError::Diff(DiffError::RepoNotFound { .. })),
    "got: {}",
    err
  );
  Ok(())
}

#[test]
fn test_open_from_subdirectory_finds_work_tree() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("apps/api/main.go", "package main\n")?;
  repo.commit("add api")?;

  let sub = repo.path.join("apps").join("api");
  let git = SystemGit::open(&sub)?;
  assert_eq!(git.work_tree().canonicalize()?, repo.path.canonicalize()?);
  Ok(())
}
