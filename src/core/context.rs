//! Unified invocation context - build once, pass everywhere
//!
//! ShipContext bundles everything one invocation needs (workspace root,
//! configuration, git, graph client) so commands receive a single reference
//! instead of loading their own state. Nothing in here is global: a second
//! invocation builds a second context with its own caches.

use crate::core::config::ShipConfig;
use crate::core::error::ShipResult;
use crate::core::vcs::SystemGit;
use crate::graph::query::BazelClient;
use std::path::{Path, PathBuf};

/// Everything a command needs for one invocation.
pub struct ShipContext {
  /// Monorepo root (git working tree root, absolute)
  pub root: PathBuf,

  /// ship.toml settings (defaults when absent)
  pub config: ShipConfig,

  /// Diff provider
  pub git: SystemGit,

  /// Graph-query client
  pub graph: BazelClient,
}

impl ShipContext {
  /// Build an invocation context from any directory inside the checkout.
  pub fn build(dir: &Path) -> ShipResult<Self> {
    let git = SystemGit::open(dir)?;
    let root = git.work_tree().to_path_buf();
    let config = ShipConfig::load(&root)?;
    let graph = BazelClient::new(&root, &config.graph);

    Ok(Self {
      root,
      config,
      git,
      graph,
    })
  }
}
