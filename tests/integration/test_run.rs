//! Integration tests for the `pytriage run` command
//!
//! Tests that execute the Python interpreter skip silently when no
//! `python3` is on PATH; the selection-side behavior is covered without it.

use crate::helpers::{PythonProject, python3_available, run_pytriage};
use anyhow::Result;

#[test]
fn test_run_dry_run_shows_plan_without_executing() -> Result<()> {
  let project = PythonProject::new()?;

  let output = run_pytriage(
    &project.path,
    &[
      "run",
      "Workflow",
      "--files",
      "mycode/thing.py",
      "--start-directory",
      "tests",
      "--dry-run",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
  assert!(stdout.contains("Test Plan"), "got: {}", stdout);
  assert!(stdout.contains("DRY RUN"), "got: {}", stdout);
  assert!(stdout.contains("integration_thing.py"), "got: {}", stdout);
  assert!(!stdout.contains("Executing"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_run_empty_selection_runs_nothing() -> Result<()> {
  let project = PythonProject::new()?;
  project.write_file("mycode/util.py", "def helper():\n    return 1\n")?;

  let output = run_pytriage(
    &project.path,
    &["run", "Workflow", "--files", "mycode/util.py", "--start-directory", "tests"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(output.status.success());
  assert!(stdout.contains("No affected test files"), "got: {}", stdout);
  assert!(stdout.contains("Nothing to run"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_run_executes_selected_tests() -> Result<()> {
  if !python3_available() {
    return Ok(());
  }

  let project = PythonProject::new()?;

  let output = run_pytriage(
    &project.path,
    &["run", "Workflow", "--files", "mycode/thing.py", "--start-directory", "tests"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(output.status.success(), "stderr: {}", stderr);
  assert!(stdout.contains("Executing 1 test file(s)"), "got: {}", stdout);
  assert!(stdout.contains("Selected tests passed"), "got: {}", stdout);
  // The unittest text runner reports on stderr
  assert!(stderr.contains("Ran 1 test"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_run_failing_tests_still_exit_zero() -> Result<()> {
  if !python3_available() {
    return Ok(());
  }

  let project = PythonProject::new()?;
  project.write_file(
    "tests/integration_failing.py",
    "import unittest\n\nfrom mycode.thing import X\n\n\nclass TestFailing(unittest.TestCase):\n    def test_wrong(self):\n        self.assertEqual(X.__name__, 'Y')\n",
  )?;

  let output = run_pytriage(
    &project.path,
    &["run", "Workflow", "--files", "mycode/thing.py", "--start-directory", "tests"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);

  // Test failures are the runner's report, not a pytriage error
  assert!(output.status.success(), "stderr: {}", stderr);
  assert!(stdout.contains("reported failures"), "got: {}", stdout);
  assert!(stderr.contains("FAILED"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_run_zero_case_locator_is_skipped() -> Result<()> {
  if !python3_available() {
    return Ok(());
  }

  let project = PythonProject::new()?;
  // Matches the pattern and imports an impacted class, but defines no tests
  project.write_file("tests/integration_helpers.py", "from mycode.thing import X\n\nFIXTURE = X\n")?;

  let output = run_pytriage(
    &project.path,
    &[
      "run",
      "Workflow",
      "--files",
      "mycode/thing.py",
      "--start-directory",
      "tests",
      "--pattern",
      "integration_h*.py",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
  assert!(stdout.contains("Selected test files: 1"), "got: {}", stdout);
  assert!(stdout.contains("no test cases"), "got: {}", stdout);
  assert!(stdout.contains("Nothing to run"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_run_aggregates_multiple_selected_files() -> Result<()> {
  if !python3_available() {
    return Ok(());
  }

  let project = PythonProject::new()?;
  project.write_file(
    "tests/integration_more.py",
    "import unittest\n\nfrom mycode.thing import X\n\n\nclass TestMore(unittest.TestCase):\n    def test_is_class(self):\n        self.assertTrue(isinstance(X, type))\n\n    def test_subclass_link(self):\n        self.assertTrue(hasattr(X, '__bases__'))\n",
  )?;

  let output = run_pytriage(
    &project.path,
    &["run", "Workflow", "--files", "mycode/thing.py", "--start-directory", "tests"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(output.status.success(), "stderr: {}", stderr);
  assert!(stdout.contains("Executing 2 test file(s)"), "got: {}", stdout);
  // One aggregated run, not one per file
  assert!(stderr.contains("Ran 3 tests"), "got: {}", stderr);

  Ok(())
}
