//! Error types for pytriage with contextual messages and exit codes
//!
//! A selection pipeline that cannot trust its own static analysis must not
//! silently run an arbitrary subset of tests, so parse failures and git
//! failures abort the run. Test failures are never errors here: they travel
//! through the test runner's own report.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for pytriage
///
/// These cover *pipeline* failures only. A completed run exits 0 even when
/// the selected tests fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad config, malformed source, invalid args)
  User = 1,
  /// System error (git, interpreter spawn, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for pytriage
#[derive(Debug)]
pub enum TriageError {
  /// A component was driven out of its required call order
  Usage(String),

  /// A source or candidate test file could not be parsed
  Parse(ParseFailure),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl TriageError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    TriageError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    TriageError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      TriageError::Message { message, context, help } => TriageError::Message {
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
      TriageError::Usage(_) => ExitCode::System,
      TriageError::Parse(_) => ExitCode::User,
      TriageError::Git(_) => ExitCode::System,
      TriageError::Io(_) => ExitCode::System,
      TriageError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      TriageError::Parse(e) => e.help_message(),
      TriageError::Git(e) => e.help_message(),
      TriageError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for TriageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TriageError::Usage(msg) => write!(f, "Contract violation: {}", msg),
      TriageError::Parse(e) => write!(f, "{}", e),
      TriageError::Git(e) => write!(f, "{}", e),
      TriageError::Io(e) => write!(f, "I/O error: {}", e),
      TriageError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for TriageError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      TriageError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for TriageError {
  fn from(err: io::Error) -> Self {
    TriageError::Io(err)
  }
}

impl From<String> for TriageError {
  fn from(msg: String) -> Self {
    TriageError::message(msg)
  }
}

impl From<&str> for TriageError {
  fn from(msg: &str) -> Self {
    TriageError::message(msg)
  }
}

impl From<toml_edit::de::Error> for TriageError {
  fn from(err: toml_edit::de::Error) -> Self {
    TriageError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for TriageError {
  fn from(err: serde_json::Error) -> Self {
    TriageError::message(format!("JSON error: {}", err))
  }
}

impl From<globset::Error> for TriageError {
  fn from(err: globset::Error) -> Self {
    TriageError::with_help(
      format!("Invalid filename pattern: {}", err),
      "Patterns are filename globs such as 'integration*.py'.",
    )
  }
}

impl From<walkdir::Error> for TriageError {
  fn from(err: walkdir::Error) -> Self {
    TriageError::message(format!("Corpus walk error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for TriageError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    TriageError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// A file the static analysis could not parse
#[derive(Debug)]
pub struct ParseFailure {
  pub path: PathBuf,
  pub detail: String,
}

impl ParseFailure {
  fn help_message(&self) -> Option<String> {
    Some("Selection is refused when analysis cannot be trusted. Fix the syntax error and re-run.".to_string())
  }
}

impl fmt::Display for ParseFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Failed to parse {}: {}", self.path.display(), self.detail)
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { .. } => {
        Some("Pass the changed files explicitly with --files, or run inside a git repository.".to_string())
      }
      GitError::CommandFailed { command, .. } if command.contains("@{1}") => {
        Some("The default ref '@{1}' needs a previous checkout in the reflog. Pass --since <ref> or --files.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Result type alias for pytriage
pub type TriageResult<T> = Result<T, TriageError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> TriageResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> TriageResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<TriageError>,
{
  fn context(self, ctx: impl Into<String>) -> TriageResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> TriageResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &TriageError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
