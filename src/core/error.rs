//! Error types for shipyard with contextual messages and exit codes
//!
//! One top-level error type categorizes failures by the external collaborator
//! that produced them (graph-query tool, git, configuration). Every error can
//! carry a help message guiding the user toward resolution.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for shipyard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown kind)
  User = 1,
  /// System error (graph tool, git, I/O)
  System = 2,
  /// Validation failure
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for shipyard
#[derive(Debug)]
pub enum ShipError {
  /// Configuration errors
  Config(ConfigError),

  /// Graph-query tool errors
  Query(QueryError),

  /// Diff provider (git) errors
  Diff(DiffError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ShipError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ShipError::Message { message, context, help } => ShipError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ShipError::Config(_) => ExitCode::User,
      ShipError::Query(_) => ExitCode::System,
      ShipError::Diff(_) => ExitCode::System,
      ShipError::Io(_) => ExitCode::System,
      ShipError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ShipError::Config(e) => e.help_message(),
      ShipError::Query(e) => e.help_message(),
      ShipError::Diff(e) => e.help_message(),
      ShipError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ShipError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ShipError::Config(e) => write!(f, "{}", e),
      ShipError::Query(e) => write!(f, "{}", e),
      ShipError::Diff(e) => write!(f, "{}", e),
      ShipError::Io(e) => write!(f, "I/O error: {}", e),
      ShipError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ShipError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ShipError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ShipError {
  fn from(err: io::Error) -> Self {
    ShipError::Io(err)
  }
}

impl From<String> for ShipError {
  fn from(msg: String) -> Self {
    ShipError::message(msg)
  }
}

impl From<&str> for ShipError {
  fn from(msg: &str) -> Self {
    ShipError::message(msg)
  }
}

impl From<ConfigError> for ShipError {
  fn from(err: ConfigError) -> Self {
    ShipError::Config(err)
  }
}

impl From<QueryError> for ShipError {
  fn from(err: QueryError) -> Self {
    ShipError::Query(err)
  }
}

impl From<DiffError> for ShipError {
  fn from(err: DiffError) -> Self {
    ShipError::Diff(err)
  }
}

impl From<toml_edit::de::Error> for ShipError {
  fn from(err: toml_edit::de::Error) -> Self {
    ShipError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ShipError {
  fn from(err: serde_json::Error) -> Self {
    ShipError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ShipError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ShipError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Convert anyhow::Error to ShipError (for transition period)
impl From<anyhow::Error> for ShipError {
  fn from(err: anyhow::Error) -> Self {
    ShipError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// ship.toml exists but cannot be parsed or fails validation
  Invalid { path: PathBuf, detail: String },

  /// Unknown deployable-unit kind passed on the command line
  UnknownKind { value: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { path, .. } => Some(format!(
        "Fix the configuration in {} or delete it to fall back to defaults.",
        path.display()
      )),
      ConfigError::UnknownKind { .. } => Some("Valid kinds: app, chart.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, detail } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), detail)
      }
      ConfigError::UnknownKind { value } => {
        write!(f, "Unknown unit kind '{}'", value)
      }
    }
  }
}

impl std::error::Error for ConfigError {}

/// Graph-query tool errors
#[derive(Debug)]
pub enum QueryError {
  /// Query tool exited non-zero
  ToolFailed { expression: String, stderr: String },

  /// Query tool binary could not be spawned
  ToolMissing { bin: String },

  /// Query tool produced output that is not a label list
  MalformedOutput { expression: String, detail: String },
}

impl QueryError {
  fn help_message(&self) -> Option<String> {
    match self {
      QueryError::ToolMissing { bin } => Some(format!(
        "Install '{}' or point [graph] bin in ship.toml at the query tool.",
        bin
      )),
      _ => None,
    }
  }
}

impl fmt::Display for QueryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QueryError::ToolFailed { expression, stderr } => {
        write!(f, "Graph query failed: {}\n{}", expression, stderr)
      }
      QueryError::ToolMissing { bin } => {
        write!(f, "Graph query tool '{}' not found", bin)
      }
      QueryError::MalformedOutput { expression, detail } => {
        write!(f, "Malformed output from graph query {}: {}", expression, detail)
      }
    }
  }
}

impl std::error::Error for QueryError {}

/// Diff provider errors
#[derive(Debug)]
pub enum DiffError {
  /// Not inside a git repository
  RepoNotFound { path: PathBuf },

  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Base ref does not resolve
  UnknownRef { reference: String },
}

impl DiffError {
  fn help_message(&self) -> Option<String> {
    match self {
      DiffError::RepoNotFound { path } => Some(format!(
        "Run shipyard from inside the monorepo checkout (looked at: {}).",
        path.display()
      )),
      DiffError::UnknownRef { .. } => {
        Some("Fetch the base ref first (git fetch origin) or pass a valid ref to --since.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for DiffError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DiffError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      DiffError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      DiffError::UnknownRef { reference } => {
        write!(f, "Unknown git ref: {}", reference)
      }
    }
  }
}

impl std::error::Error for DiffError {}

/// Result type alias for shipyard
pub type ShipResult<T> = Result<T, ShipError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ShipResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ShipError>,
{
  fn context(self, ctx: impl Into<String>) -> ShipResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with colors and help text
pub fn print_error(error: &ShipError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
