//! `pytriage affected` - Show which tests are selected by the changes
//!
//! This command analyzes file changes and determines:
//! - Which classes in the changed files directly subclass the workflow base
//! - Which candidate test files import any of those classes
//! - The minimal set of test files that would execute

use crate::analysis::{self, SelectionAnalysis};
use crate::commands::{resolve_selection, sorted};
use crate::core::context::TriageContext;
use crate::core::error::{TriageError, TriageResult};
use std::path::PathBuf;

/// Output format for affected command
#[derive(Debug, Clone, Copy)]
enum OutputFormat {
  Text,
  Json,
  NamesOnly,
}

impl OutputFormat {
  fn from_str(s: &str) -> TriageResult<Self> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "names" | "names-only" => Ok(Self::NamesOnly),
      _ => Err(TriageError::message(format!(
        "Unknown format '{}'. Valid formats: text, json, names-only",
        s
      ))),
    }
  }
}

/// Run the affected command
#[allow(clippy::too_many_arguments)]
pub fn run_affected(
  ctx: &TriageContext,
  base_class: String,
  files: Option<Vec<PathBuf>>,
  since: Option<String>,
  start_directory: Option<PathBuf>,
  pattern: Option<String>,
  format: String,
  dry_run: bool,
) -> TriageResult<()> {
  let output_format = OutputFormat::from_str(&format)?;

  let settings = resolve_selection(ctx, base_class, files, since, start_directory, pattern)?;

  if dry_run {
    println!("DRY RUN: Would analyze {} changed files", settings.changed_files.len());
    for file in &settings.changed_files {
      println!("  - {}", file.display());
    }
    return Ok(());
  }

  let analysis = analysis::analyze(
    &settings.changed_files,
    &settings.base_class,
    &settings.start_directory,
    &settings.pattern,
  )?;

  display_results(&analysis, output_format)
}

/// Display selection analysis results
fn display_results(analysis: &SelectionAnalysis, format: OutputFormat) -> TriageResult<()> {
  match format {
    OutputFormat::Text => display_text(analysis),
    OutputFormat::Json => display_json(analysis),
    OutputFormat::NamesOnly => display_names_only(analysis),
  }
}

/// Display results in human-readable text format
fn display_text(analysis: &SelectionAnalysis) -> TriageResult<()> {
  println!("Selection Analysis");
  println!("==================");
  println!();

  println!("Changed files: {}", analysis.changed_files.len());
  if !analysis.changed_files.is_empty() && analysis.changed_files.len() <= 20 {
    for file in &analysis.changed_files {
      println!("  {}", file);
    }
    println!();
  }

  let classes = sorted(&analysis.impact.classes);
  let locators = sorted(&analysis.impact.locators);

  println!("Impacted classes: {}", classes.len());
  for class_name in &classes {
    println!("  📦 {}", class_name);
  }
  println!();

  println!("Selected test files: {}", locators.len());
  for locator in &locators {
    println!("  🎯 {}", locator);
  }

  Ok(())
}

/// Display results in JSON format
fn display_json(analysis: &SelectionAnalysis) -> TriageResult<()> {
  use serde_json::json;

  let classes = sorted(&analysis.impact.classes);
  let locators = sorted(&analysis.impact.locators);
  let test_files: Vec<String> = locators.iter().map(|l| l.path().display().to_string()).collect();

  let output = json!({
      "changed_files": analysis.changed_files,
      "impact": {
          "classes": classes,
          "test_files": test_files
      },
      "summary": {
          "changed_files_count": analysis.changed_files.len(),
          "classes_count": classes.len(),
          "test_files_count": test_files.len()
      }
  });

  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}

/// Display only selected test file paths
fn display_names_only(analysis: &SelectionAnalysis) -> TriageResult<()> {
  for locator in sorted(&analysis.impact.locators) {
    println!("{}", locator);
  }

  Ok(())
}
