//! Test discovery and execution collaborators
//!
//! The selection pipeline never talks to a test framework directly; it
//! drives this narrow seam. Commands inject the concrete harness, tests
//! substitute a stub.

pub mod unittest;

pub use unittest::UnittestHarness;

use crate::analysis::Locator;
use crate::core::error::TriageResult;

/// Summary of one aggregated test execution.
///
/// The detailed per-test report streams through the collaborator's own
/// output channel; callers only learn whether the suite passed.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
  pub success: bool,
}

/// Discovery/execution seam for a test framework.
pub trait TestHarness {
  /// Count of test cases loadable from one locator's scope.
  fn discover(&self, locator: &Locator) -> TriageResult<usize>;

  /// Execute every locator in one aggregated run.
  fn execute(&self, batch: &[Locator]) -> TriageResult<RunReport>;
}
