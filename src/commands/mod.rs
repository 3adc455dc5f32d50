//! CLI commands for pytriage
//!
//! - **affected**: show which integration tests the current changes select
//! - **run**: select those tests and execute them
//!
//! Both commands accept `&TriageContext` so configuration loads once, and
//! resolve their inputs the same way: explicit flag, then triage.toml,
//! then built-in default.

pub mod affected;
pub mod run;

pub use affected::run_affected;
pub use run::run_run;

use crate::core::context::TriageContext;
use crate::core::error::TriageResult;
use crate::core::vcs::SystemGit;
use std::path::PathBuf;

pub(crate) const DEFAULT_SINCE: &str = "@{1}";
pub(crate) const DEFAULT_START_DIRECTORY: &str = ".";
pub(crate) const DEFAULT_PATTERN: &str = "integration*.py";

/// Fully resolved inputs for one selection pass.
pub(crate) struct SelectionSettings {
  pub base_class: String,
  pub changed_files: Vec<PathBuf>,
  pub start_directory: PathBuf,
  pub pattern: String,
}

/// Resolve changed files and selection knobs from flags, config, defaults.
///
/// Without `--files` the changed set comes from git, diffing against
/// `--since` / `selection.since` / the previous checkout.
pub(crate) fn resolve_selection(
  ctx: &TriageContext,
  base_class: String,
  files: Option<Vec<PathBuf>>,
  since: Option<String>,
  start_directory: Option<PathBuf>,
  pattern: Option<String>,
) -> TriageResult<SelectionSettings> {
  let selection = ctx.selection();

  let changed_files = match files {
    Some(files) => files,
    None => {
      let since = since
        .or_else(|| selection.since.clone())
        .unwrap_or_else(|| DEFAULT_SINCE.to_string());
      let git = SystemGit::open(ctx.root())?;
      git.changed_files_since(&since)?
    }
  };

  let start_directory = start_directory
    .or_else(|| selection.start_directory.clone())
    .unwrap_or_else(|| PathBuf::from(DEFAULT_START_DIRECTORY));

  let pattern = pattern
    .or_else(|| selection.pattern.clone())
    .unwrap_or_else(|| DEFAULT_PATTERN.to_string());

  Ok(SelectionSettings {
    base_class,
    changed_files,
    start_directory,
    pattern,
  })
}

/// Sorted copy of a set, for stable display and stable batch submission.
pub(crate) fn sorted<T: Ord + Clone>(items: &std::collections::HashSet<T>) -> Vec<T> {
  let mut v: Vec<_> = items.iter().cloned().collect();
  v.sort();
  v
}
