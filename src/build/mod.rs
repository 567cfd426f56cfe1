//! Build check runner.
//!
//! Runs the typecheck/build/lint chain of every toolchain found in a project
//! and collects the outcome of each step into a [`BuildReport`]. Failures of
//! the tools themselves are recorded, never raised.

mod plan;
mod runner;

pub use plan::{plan_chains, TaskSpec};
pub use runner::{run_chain, run_task};

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{now_iso, read_json_lenient, write_json, Result, SessionState, WorkspacePaths};

/// Outcome of a single build task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Ok,
    Failed,
    Skipped,
}

/// Overall verdict of a build check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Ok,
    Failed,
}

impl BuildStatus {
    /// Value stored in `lastBuildStatus`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one task in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTask {
    pub label: String,
    pub command: String,
    pub status: TaskStatus,
    /// `None` when the process never ran or was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Aggregated build check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub started_at: String,
    pub finished_at: String,
    pub status: BuildStatus,
    pub tasks: Vec<BuildTask>,
}

impl BuildReport {
    /// Build a report, failing it if any task failed.
    pub fn from_tasks(started_at: String, finished_at: String, tasks: Vec<BuildTask>) -> Self {
        let status = if tasks.iter().any(|t| t.status == TaskStatus::Failed) {
            BuildStatus::Failed
        } else {
            BuildStatus::Ok
        };
        Self { started_at, finished_at, status, tasks }
    }

    /// Whether every task passed or was skipped.
    pub fn is_ok(&self) -> bool {
        self.status == BuildStatus::Ok
    }
}

/// Run every detected chain in `root`, one after another.
pub async fn run_build_check(root: &Path) -> BuildReport {
    let started_at = now_iso();
    let chains = plan_chains(root);
    tracing::debug!(chains = chains.len(), "Planned build check");

    let mut tasks = Vec::new();
    for chain in &chains {
        tasks.extend(run_chain(chain, root).await);
    }

    BuildReport::from_tasks(started_at, now_iso(), tasks)
}

/// Store the verdict of `report` in the workspace session state.
pub async fn record_build_status(root: &Path, report: &BuildReport) -> Result<SessionState> {
    let paths = WorkspacePaths::new(root);
    let state_file = paths.state_file();

    let mut state: SessionState = read_json_lenient(&state_file).await.unwrap_or_default();
    state.last_build_status = Some(report.status.as_str().to_string());
    state.updated_at = Some(report.finished_at.clone());

    write_json(&state_file, &state).await?;
    tracing::info!(status = %report.status, path = %state_file.display(), "Recorded build status");
    Ok(state)
}
