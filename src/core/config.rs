//! Optional triage.toml configuration
//!
//! Everything here is a fallback for a CLI flag: explicit flags win, then
//! config values, then built-in defaults. The base-class name is always an
//! explicit argument and never configured.

use crate::core::error::{ResultExt, TriageResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for pytriage
/// Searched in order: triage.toml, .triage.toml, .config/triage.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
  #[serde(default)]
  pub selection: SelectionConfig,
  #[serde(default)]
  pub harness: HarnessConfig,
}

/// Defaults for the selection pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SelectionConfig {
  /// Directory to walk for candidate test files (default: ".")
  #[serde(default)]
  pub start_directory: Option<PathBuf>,

  /// Filename glob candidates must match (default: "integration*.py")
  #[serde(default)]
  pub pattern: Option<String>,

  /// Git ref to diff against when --files is omitted (default: "@{1}")
  #[serde(default)]
  pub since: Option<String>,
}

/// Defaults for the test harness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HarnessConfig {
  /// Python interpreter used for discovery and execution (default: "python3")
  #[serde(default)]
  pub python: Option<String>,
}

impl TriageConfig {
  /// Find config file in search order: triage.toml, .triage.toml, .config/triage.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("triage.toml"),
      path.join(".triage.toml"),
      path.join(".config").join("triage.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the first location that exists, or defaults when none does.
  ///
  /// A config file that exists but fails to parse is an error, not a
  /// fallback to defaults: a typo must not silently change what runs.
  pub fn load(path: &Path) -> TriageResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: TriageConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    Ok(config)
  }
}
