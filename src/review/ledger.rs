//! Step ledger: which of the seven artifacts exist.

use std::path::{Path, PathBuf};

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::core::{
    read_json_lenient, SessionState, StepDefinition, WorkspacePaths, STEP_DEFINITIONS,
};

/// Advisory fields read from a step artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StepRecord {
    pub summary: Option<String>,
    pub status: Option<String>,
}

/// Presence and advisory fields of one step artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStatus {
    pub definition: StepDefinition,
    pub path: PathBuf,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl StepStatus {
    /// `step-NN.kind`
    pub fn identifier(&self) -> String {
        self.definition.identifier()
    }
}

/// Load all seven steps in slot order.
///
/// Existence is decided by the filesystem alone; an artifact that cannot be
/// parsed still counts as present, just without summary or status.
pub async fn load_steps(root: &Path) -> Vec<StepStatus> {
    let steps_dir = WorkspacePaths::new(root).steps_dir();
    join_all(STEP_DEFINITIONS.iter().map(|definition| load_step(*definition, &steps_dir))).await
}

async fn load_step(definition: StepDefinition, steps_dir: &Path) -> StepStatus {
    let path = definition.artifact_path(steps_dir);
    let exists = tokio::fs::metadata(&path).await.is_ok_and(|meta| meta.is_file());

    let record = if exists {
        read_json_lenient::<serde_json::Value>(&path)
            .await
            .map(|value| record_fields(&value))
            .unwrap_or_default()
    } else {
        StepRecord::default()
    };

    StepStatus { definition, path, exists, summary: record.summary, status: record.status }
}

/// Pick `summary`/`status` out of an artifact, ignoring fields of other types.
fn record_fields(value: &serde_json::Value) -> StepRecord {
    let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(str::to_string);
    StepRecord { summary: text("summary"), status: text("status") }
}

/// Read the session state, falling back to the default record.
pub async fn load_session_state(root: &Path) -> SessionState {
    let state_file = WorkspacePaths::new(root).state_file();
    read_json_lenient(&state_file).await.unwrap_or_default()
}
