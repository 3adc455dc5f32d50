//! Invocation context - build once, pass everywhere
//!
//! Commands receive one `TriageContext` instead of loading configuration
//! independently, so a run has a single view of the invocation root and
//! its triage.toml.

use crate::core::config::{HarnessConfig, SelectionConfig, TriageConfig};
use crate::core::error::TriageResult;
use std::path::{Path, PathBuf};

/// Shared invocation state for all commands.
pub struct TriageContext {
  /// Directory pytriage was invoked from (absolute path)
  pub root: PathBuf,

  /// Parsed triage.toml (defaults when no file exists)
  pub config: TriageConfig,
}

impl TriageContext {
  /// Build the context: resolve the root and load optional configuration.
  pub fn build(root: &Path) -> TriageResult<Self> {
    let config = TriageConfig::load(root)?;
    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn selection(&self) -> &SelectionConfig {
    &self.config.selection
  }

  pub fn harness(&self) -> &HarnessConfig {
    &self.config.harness
  }
}
