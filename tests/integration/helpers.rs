//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch Python project with git history
///
/// Layout:
/// - `mycode/base.py` defines the `Workflow` base class
/// - `mycode/thing.py` defines `X(Workflow)`
/// - `tests/integration_thing.py` imports `X` and defines one passing test
pub struct PythonProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl PythonProject {
  /// Create a new project with basic structure and one commit
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    let project = Self { _root: root, path };

    project.write_file("mycode/__init__.py", "")?;
    project.write_file("mycode/base.py", "class Workflow:\n    pass\n")?;
    project.write_file(
      "mycode/thing.py",
      "from mycode.base import Workflow\n\n\nclass X(Workflow):\n    pass\n",
    )?;
    project.write_file(
      "tests/integration_thing.py",
      "import unittest\n\nfrom mycode.thing import X\n\n\nclass TestX(unittest.TestCase):\n    def test_name(self):\n        self.assertEqual(X.__name__, 'X')\n",
    )?;

    project.commit("Initial project")?;

    Ok(project)
  }

  /// Write a file, creating parent directories as needed
  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(rel);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the pytriage CLI from a directory; callers assert on status/output
pub fn run_pytriage(cwd: &Path, args: &[&str]) -> Result<Output> {
  let pytriage_bin = env!("CARGO_BIN_EXE_pytriage");

  Command::new(pytriage_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run pytriage")
}

/// True when a python3 interpreter is on PATH; execution tests skip without one
pub fn python3_available() -> bool {
  Command::new("python3")
    .arg("--version")
    .output()
    .map(|o| o.status.success())
    .unwrap_or(false)
}
