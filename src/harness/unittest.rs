//! Python unittest harness
//!
//! Shells out to the system interpreter with short generated driver
//! programs, the same way changed files are obtained from system git. The
//! run driver aggregates every locator into one suite and runs it once, so
//! the interpreter's own text runner produces a single report.

use crate::analysis::Locator;
use crate::core::error::{TriageError, TriageResult};
use crate::harness::{RunReport, TestHarness};
use std::process::Command;

/// Counts the test cases discoverable under one (directory, filename) scope.
const DISCOVER_DRIVER: &str = "\
import sys, unittest
suite = unittest.TestLoader().discover(sys.argv[1], sys.argv[2])
print(suite.countTestCases())
";

/// Aggregates every (directory, filename) scope into one suite, installs
/// the interrupt handler, and runs the text runner once. Exits 0/1 on
/// suite success/failure; pytriage reads only that status.
const RUN_DRIVER: &str = "\
import sys, unittest
loader = unittest.TestLoader()
suite = unittest.TestSuite()
args = sys.argv[1:]
for start, pattern in zip(args[0::2], args[1::2]):
    suite.addTests(loader.discover(start, pattern))
unittest.installHandler()
result = unittest.TextTestRunner().run(suite)
sys.exit(0 if result.wasSuccessful() else 1)
";

/// Harness backed by the `unittest` module of a Python interpreter.
pub struct UnittestHarness {
  python: String,
}

impl UnittestHarness {
  pub fn new(python: impl Into<String>) -> Self {
    Self { python: python.into() }
  }
}

impl Default for UnittestHarness {
  fn default() -> Self {
    Self::new("python3")
  }
}

impl TestHarness for UnittestHarness {
  fn discover(&self, locator: &Locator) -> TriageResult<usize> {
    let output = Command::new(&self.python)
      .arg("-c")
      .arg(DISCOVER_DRIVER)
      .arg(&locator.directory)
      .arg(&locator.filename)
      .output()
      .map_err(|e| TriageError::message(format!("Failed to spawn {} for test discovery: {}", self.python, e)))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(TriageError::message(format!(
        "Test discovery failed for {}: {}",
        locator,
        stderr.trim()
      )));
    }

    let stdout = String::from_utf8(output.stdout)?;
    stdout
      .trim()
      .parse::<usize>()
      .map_err(|_| TriageError::message(format!("Unexpected discovery output for {}: {:?}", locator, stdout.trim())))
  }

  fn execute(&self, batch: &[Locator]) -> TriageResult<RunReport> {
    let mut cmd = Command::new(&self.python);
    cmd.arg("-c").arg(RUN_DRIVER);
    for locator in batch {
      cmd.arg(&locator.directory).arg(&locator.filename);
    }

    // The text runner reports on the inherited stderr; only the exit
    // status comes back here.
    let status = cmd
      .status()
      .map_err(|e| TriageError::message(format!("Failed to spawn {} for test execution: {}", self.python, e)))?;

    Ok(RunReport {
      success: status.success(),
    })
  }
}
