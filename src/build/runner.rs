//! Process execution for build tasks.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use super::{BuildTask, TaskSpec, TaskStatus};

/// Run one task in `cwd`. Never fails: problems become a failed entry.
pub async fn run_task(spec: &TaskSpec, cwd: &Path) -> BuildTask {
    let command = spec.command_line();

    if spec.optional && which::which(&spec.program).is_err() {
        tracing::debug!(program = %spec.program, "Optional tool not found");
        return BuildTask {
            label: spec.label.clone(),
            command,
            status: TaskStatus::Skipped,
            exit_code: None,
            stdout: String::new(),
            stderr: format!("{} not found, skipped.", spec.program),
        };
    }

    tracing::debug!(command = %command, cwd = %cwd.display(), "Running build task");
    let result = Command::new(&spec.program)
        .args(&spec.args)
        .current_dir(cwd)
        .env("FORCE_COLOR", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await;

    match result {
        Ok(output) => BuildTask {
            label: spec.label.clone(),
            command,
            status: if output.status.success() { TaskStatus::Ok } else { TaskStatus::Failed },
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        },
        Err(e) => {
            tracing::warn!(command = %command, error = %e, "Failed to spawn build task");
            BuildTask {
                label: spec.label.clone(),
                command,
                status: TaskStatus::Failed,
                exit_code: None,
                stdout: String::new(),
                stderr: e.to_string(),
            }
        }
    }
}

/// Run a chain in order, stopping after the first failed task.
pub async fn run_chain(chain: &[TaskSpec], cwd: &Path) -> Vec<BuildTask> {
    let mut tasks = Vec::with_capacity(chain.len());

    for spec in chain {
        let task = run_task(spec, cwd).await;
        let failed = task.status == TaskStatus::Failed;
        tasks.push(task);
        if failed {
            break;
        }
    }

    tasks
}
