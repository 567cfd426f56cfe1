//! Configuration management for DevFlow.
//!
//! Handles loading configuration from TOML files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{DevflowError, Result};

/// Local config file name, looked up in the workspace root.
pub const LOCAL_CONFIG_FILE: &str = ".devflow.toml";

/// Directory names never copied out of a template unless configured otherwise.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &["node_modules", ".git"];

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template synchronization settings
    pub template: TemplateConfig,

    /// Review report settings
    pub review: ReviewConfig,
}

/// Template synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template source directory (defaults to the bundled template)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Directory names never copied out of the template
    pub ignore_dirs: Vec<String>,
}

/// Review report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Number of recent commits listed in a review
    pub commit_limit: usize,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            root: None,
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|d| (*d).to_string()).collect(),
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self { commit_limit: 5 }
    }
}

impl Config {
    /// Load configuration for a workspace.
    ///
    /// Looks for config in:
    /// 1. `.devflow.toml` in the workspace root
    /// 2. `~/.config/devflow/config.toml`
    /// 3. Falls back to defaults
    pub fn load(workspace: &Path) -> Result<Self> {
        let local_config = workspace.join(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(config_dir) = Self::config_dir() {
            let global_config = config_dir.join("config.toml");
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DevflowError::io("read", path, e))?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| DevflowError::Config(format!("{}: {e}", path.display())))?;

        // A relative template root is relative to the file that names it.
        if let (Some(root), Some(base)) = (config.template.root.as_ref(), path.parent()) {
            if root.is_relative() {
                config.template.root = Some(base.join(root));
            }
        }

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Get the global config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("devflow"))
    }
}
