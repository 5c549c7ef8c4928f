//! Changed-file classification
//!
//! `classify` is a pure function of the path and the configured rules. The
//! three classes drive structurally different invalidation downstream: a
//! definition change invalidates its package's whole subtree, a source
//! change only its own package, an ignored change nothing at all.

use crate::core::config::ClassifierConfig;
use std::path::{Path, PathBuf};

/// Classification of one changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
  /// Never affects any target (docs, CI config, non-source assets)
  Ignored,
  /// Defines build targets; edits can reshape the package's whole subtree
  Definition,
  /// Ordinary build input; edits stay within the declaring package
  Source,
}

/// A changed path together with its classification.
#[derive(Debug, Clone)]
pub struct ChangedFile {
  pub path: PathBuf,
  pub class: FileClass,
}

impl ChangedFile {
  /// Owning package of the path (its parent directory, repo-relative).
  /// Files at the repository root belong to the root package ``.
  pub fn package(&self) -> String {
    let parent = self.path.parent().unwrap_or(Path::new(""));
    let parent = parent.to_string_lossy().replace('\\', "/");
    if parent == "." { String::new() } else { parent }
  }
}

/// Classifies changed paths according to configured rules.
pub struct FileClassifier<'a> {
  config: &'a ClassifierConfig,
}

impl<'a> FileClassifier<'a> {
  pub fn new(config: &'a ClassifierConfig) -> Self {
    Self { config }
  }

  /// Classify one repo-relative path.
  pub fn classify(&self, path: &Path) -> FileClass {
    let rel = path.to_string_lossy().replace('\\', "/");
    let rel = rel.trim_start_matches("./");

    if self.config.ignored_prefixes.iter().any(|p| rel.starts_with(p.as_str())) {
      return FileClass::Ignored;
    }

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if self.config.definition_files.iter().any(|f| f == file_name)
      || self.config.definition_extensions.iter().any(|e| e == extension)
    {
      return FileClass::Definition;
    }

    if self.config.non_source_extensions.iter().any(|e| e == extension) {
      return FileClass::Ignored;
    }

    FileClass::Source
  }

  /// Classify a whole change set.
  pub fn classify_all(&self, paths: &[PathBuf]) -> Vec<ChangedFile> {
    paths
      .iter()
      .map(|path| ChangedFile {
        path: path.clone(),
        class: self.classify(path),
      })
      .collect()
  }
}
