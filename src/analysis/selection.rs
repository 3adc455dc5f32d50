//! Test selection from changed files
//!
//! Given a set of changed files, determine:
//! - Which classes directly subclass the configured workflow base
//! - Which candidate test files import any of those classes
//! - The minimal set of test files that need executing

use crate::analysis::inspector::InheritanceInspector;
use crate::analysis::scanner::scan_imports;
use crate::core::error::{TriageError, TriageResult};
use globset::Glob;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A candidate test file selected for execution.
///
/// The directory doubles as the discovery scope handed to the test
/// harness, the filename as its discovery pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Locator {
  /// Directory the file was found in
  pub directory: PathBuf,

  /// Filename within that directory
  pub filename: String,
}

impl Locator {
  pub fn path(&self) -> PathBuf {
    self.directory.join(&self.filename)
  }
}

impl fmt::Display for Locator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.path().display())
  }
}

/// Impacted names and the test files they select.
#[derive(Debug, Clone)]
pub struct ImpactSet {
  /// Classes in changed files that directly subclass the base
  pub classes: HashSet<String>,

  /// Test files whose imports reference an impacted class
  pub locators: HashSet<Locator>,
}

/// Complete selection analysis.
#[derive(Debug, Clone)]
pub struct SelectionAnalysis {
  /// Files that changed
  pub changed_files: Vec<String>,

  /// Impact set
  pub impact: ImpactSet,
}

/// Analyze which test files are affected by the changed files.
///
/// Algorithm:
/// 1. Inspect every changed file for direct subclasses of `base_class`
/// 2. Union the per-file reports into one impacted-name set
/// 3. Walk `start_directory`, scanning files whose names match `pattern`
///
/// Inspection failures (unparseable or missing files) abort immediately;
/// an empty impacted set is a valid outcome that selects nothing.
pub fn analyze(
  changed_files: &[PathBuf],
  base_class: &str,
  start_directory: &Path,
  pattern: &str,
) -> TriageResult<SelectionAnalysis> {
  let mut inspectors: Vec<_> = changed_files
    .iter()
    .map(|f| InheritanceInspector::new(f, base_class))
    .collect();

  for inspector in &mut inspectors {
    inspector.inspect()?;
  }

  let mut classes = HashSet::new();
  for inspector in &inspectors {
    classes.extend(inspector.report()?.iter().cloned());
  }

  let locators = find_matches(start_directory, pattern, &classes)?;

  Ok(SelectionAnalysis {
    changed_files: changed_files.iter().map(|p| p.display().to_string()).collect(),
    impact: ImpactSet { classes, locators },
  })
}

/// Walk the corpus and scan every pattern-matching file against the targets.
///
/// The walk runs even when `targets` is empty: a malformed candidate file
/// must abort the run before any test executes, empty diff or not.
fn find_matches(start_directory: &Path, pattern: &str, targets: &HashSet<String>) -> TriageResult<HashSet<Locator>> {
  if !start_directory.is_dir() {
    return Err(TriageError::with_help(
      format!("Test corpus directory not found: {}", start_directory.display()),
      "Pass --start-directory or set selection.start-directory in triage.toml.",
    ));
  }

  let matcher = Glob::new(pattern)?.compile_matcher();
  let mut locators = HashSet::new();

  for entry in WalkDir::new(start_directory) {
    let entry = entry?;
    if !entry.file_type().is_file() {
      continue;
    }
    let filename = entry.file_name().to_string_lossy();
    if !matcher.is_match(filename.as_ref()) {
      continue;
    }

    let source = fs::read_to_string(entry.path())
      .map_err(|e| TriageError::message(format!("Failed to read candidate file {}: {}", entry.path().display(), e)))?;

    if scan_imports(entry.path(), &source, targets)? {
      let directory = entry
        .path()
        .parent()
        .unwrap_or(start_directory)
        .to_path_buf();
      locators.insert(Locator {
        directory,
        filename: filename.into_owned(),
      });
    }
  }

  Ok(locators)
}
