//! Workflow review.
//!
//! Combines the step ledger with detected test commands and recent commits
//! into a [`ReviewReport`], rendered as Markdown for the user.

mod aggregate;
mod ledger;
mod render;

pub use aggregate::{aggregate, build_report, recommend_next, ExternalSignals, ReviewReport};
pub use ledger::{load_session_state, load_steps, StepRecord, StepStatus};
pub use render::render_markdown;

use std::path::{Path, PathBuf};

use crate::core::{Config, DevflowError, Result};
use crate::git::recent_commits;
use crate::scanner::detect_test_commands;

/// Gather toolchain and history signals for `root`.
///
/// Both collaborators block, so they run on the blocking pool side by side.
pub async fn collect_signals(root: &Path, commit_limit: usize) -> ExternalSignals {
    let scan_root = root.to_path_buf();
    let git_root = root.to_path_buf();

    let (tests, commits) = tokio::join!(
        tokio::task::spawn_blocking(move || detect_test_commands(&scan_root)),
        tokio::task::spawn_blocking(move || recent_commits(&git_root, commit_limit)),
    );

    let test_commands = tests.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Toolchain detection did not finish");
        Vec::new()
    });
    let recent_commits = commits.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Commit lookup did not finish");
        Vec::new()
    });

    ExternalSignals { test_commands, recent_commits }
}

/// Review the workspace at `root` using its configuration.
pub async fn review_workspace(root: &Path, config: &Config) -> ReviewReport {
    let signals = collect_signals(root, config.review.commit_limit).await;
    aggregate(root, signals).await
}

/// Write a rendered report, creating parent directories.
pub async fn write_report(path: &Path, markdown: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DevflowError::io("create directory", parent, e))?;
    }

    tokio::fs::write(path, markdown).await.map_err(|e| DevflowError::io("write", path, e))?;
    tracing::debug!(path = %path.display(), "Wrote review report");
    Ok(path.to_path_buf())
}
