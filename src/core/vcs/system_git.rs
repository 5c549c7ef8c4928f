//! System git backend - zero dependencies, maximum performance
//!
//! Uses git plumbing commands for all operations:
//! - Safe subprocess execution (isolated environment)
//! - One metadata call on open, one diff call per invocation

use crate::core::error::{DiffError, ShipError, ShipResult};
use crate::core::vcs::DiffSource;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
#[derive(Debug)]
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,

  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> ShipResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .map_err(|e| {
        ShipError::Diff(DiffError::CommandFailed {
          command: "git rev-parse --show-toplevel".to_string(),
          stderr: e.to_string(),
        })
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ShipError::Diff(DiffError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ShipError::Diff(DiffError::CommandFailed {
        command: "git rev-parse --show-toplevel".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root (directory containing .git)
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Files that differ between `base_ref` and the working tree.
  ///
  /// Uses `git diff --name-only <base>`: covers commits after the base plus
  /// staged and unstaged edits. Untracked files are outside the diff
  /// contract, as with plain `git diff`.
  pub fn changed_files_since(&self, base_ref: &str) -> Result<Vec<PathBuf>, DiffError> {
    let output = self
      .git_cmd()
      .args(["diff", "--name-only", base_ref])
      .output()
      .map_err(|e| DiffError::CommandFailed {
        command: format!("git diff --name-only {}", base_ref),
        stderr: e.to_string(),
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("unknown revision") || stderr.contains("bad revision") {
        return Err(DiffError::UnknownRef {
          reference: base_ref.to_string(),
        });
      }
      return Err(DiffError::CommandFailed {
        command: format!("git diff --name-only {}", base_ref),
        stderr: stderr.to_string(),
      });
    }

    Ok(parse_name_only(&String::from_utf8_lossy(&output.stdout)))
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}

impl DiffSource for SystemGit {
  fn changed_files(&self, base_ref: &str) -> Result<Vec<PathBuf>, DiffError> {
    self.changed_files_since(base_ref)
  }
}

/// Parse `--name-only` output into repo-relative paths
fn parse_name_only(stdout: &str) -> Vec<PathBuf> {
  stdout
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(PathBuf::from)
    .collect()
}
