//! On-disk records kept under `.devflow`.
//!
//! Reads are lenient: a missing or malformed record yields `None` so callers
//! can fall back to defaults. Writes replace the whole file.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{DevflowError, Result};
use super::steps::{first_step_identifier, STEP_DEFINITIONS};

/// Status value that marks a passing build check.
pub const BUILD_STATUS_OK: &str = "ok";

/// Prompt stored in the preset record until the wizard has run.
pub const INITIAL_GUIDANCE_PROMPT: &str =
    "No scenario selected yet. Run `devflow wizard \"<your goal>\"` first to pick a matching workflow scenario.";

/// Singleton session record (`.devflow/state.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub active_session: Option<String>,
    pub current_step: Option<String>,
    pub completed: Vec<String>,
    pub suggested_next: Option<String>,
    pub last_build_status: Option<String>,
    pub metrics: Metrics,
    pub updated_at: Option<String>,
}

/// Progress counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    pub total_steps: u32,
    pub passed: u32,
    pub failed: u32,
    pub warnings: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            active_session: None,
            current_step: None,
            completed: Vec::new(),
            suggested_next: Some(first_step_identifier()),
            last_build_status: None,
            metrics: Metrics::default(),
            updated_at: None,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            total_steps: STEP_DEFINITIONS.len() as u32,
            passed: 0,
            failed: 0,
            warnings: 0,
        }
    }
}

impl SessionState {
    /// Whether the last recorded build check failed (or reported anything but `ok`).
    pub fn build_needs_attention(&self) -> bool {
        self.last_build_status.as_deref().is_some_and(|status| status != BUILD_STATUS_OK)
    }
}

/// Persisted projection of a scenario match (`.devflow/preset.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRecord {
    pub intent: Option<String>,
    pub detected_at: Option<String>,
    pub preset: Option<PresetSummary>,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub guidance_prompt: String,
}

/// Identity of the chosen scenario inside a [`PresetRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSummary {
    pub id: String,
    pub title: String,
    pub summary: String,
}

impl PresetRecord {
    /// Record written by setup and cleanup before any wizard run.
    pub fn initial() -> Self {
        Self {
            intent: None,
            detected_at: None,
            preset: None,
            matched_keywords: Vec::new(),
            recommendations: Vec::new(),
            guidance_prompt: INITIAL_GUIDANCE_PROMPT.to_string(),
        }
    }
}

/// Read and parse a JSON record, returning `None` when it is missing or invalid.
pub async fn read_json_lenient<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Record not readable");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed record");
            None
        }
    }
}

/// Serialize `value` as pretty JSON, replacing any existing file.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DevflowError::io("create directory", parent, e))?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|source| DevflowError::Json { path: path.to_path_buf(), source })?;

    tokio::fs::write(path, content).await.map_err(|e| DevflowError::io("write", path, e))
}
