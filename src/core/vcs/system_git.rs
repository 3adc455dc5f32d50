//! System git backend - zero dependencies, maximum portability
//!
//! Uses git plumbing commands for the one query this tool needs: the list
//! of files changed since a ref. Subprocess execution is isolated (clean
//! environment, safe configuration overrides) so user config cannot change
//! what the diff reports.

use crate::core::error::{GitError, ResultExt, TriageError, TriageResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  repo_path: PathBuf,

  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to locate the working tree.
  pub fn open(path: &Path) -> TriageResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(TriageError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(TriageError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Files changed between `since` and the working tree.
  ///
  /// Paths come back relative to the repository root and are resolved
  /// against the working tree, so callers can read them from any cwd.
  /// Deleted files are still listed; reading one later is a hard error by
  /// design.
  pub fn changed_files_since(&self, since: &str) -> TriageResult<Vec<PathBuf>> {
    let output = self
      .git_cmd()
      .args(["diff", "--name-only", since])
      .output()
      .context("Failed to run git diff")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(TriageError::Git(GitError::CommandFailed {
        command: format!("git diff --name-only {}", since),
        stderr: stderr.to_string(),
      }));
    }

    let files = String::from_utf8_lossy(&output.stdout)
      .lines()
      .map(|s| s.trim())
      .filter(|s| !s.is_empty())
      .map(|s| self.work_tree.join(s))
      .collect();

    Ok(files)
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

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
