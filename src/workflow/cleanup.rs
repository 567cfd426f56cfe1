//! Cleanup: retire the current session and reset the control records.
//!
//! Step artifacts are archived under `.devflow/history/<stamp>/` (or deleted
//! with `purge`), `state.json` and `preset.json` are replaced with their
//! initial records and transient queue files are removed. Nothing here is
//! locked; running cleanup alongside another command on the same workspace
//! is the caller's problem.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;

use crate::core::{
    file_stamp, now_iso, write_json, DevflowError, PresetRecord, Result, SessionState,
    WorkspacePaths, QUEUE_KEEP_MARKER, STEPS_KEEP_MARKER,
};

/// Options for [`cleanup_project`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupOptions {
    /// Delete step artifacts instead of archiving them
    pub purge: bool,
    /// Print the actions without performing any of them
    pub dry_run: bool,
}

/// What a cleanup did (or, in a dry run, would do).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    /// Archive directory, when step files were archived
    pub archive_dir: Option<PathBuf>,
    /// Step files moved into the archive
    pub archived: Vec<PathBuf>,
    /// Step files deleted by `purge`
    pub purged: Vec<PathBuf>,
    /// Queue files removed
    pub queue_removed: Vec<PathBuf>,
}

/// Reset the workspace at `root`.
pub async fn cleanup_project(root: &Path, options: &CleanupOptions) -> Result<CleanupSummary> {
    let paths = WorkspacePaths::new(root);
    let steps_dir = paths.steps_dir();

    let is_dir = tokio::fs::metadata(&steps_dir).await.is_ok_and(|meta| meta.is_dir());
    if !is_dir {
        return Err(DevflowError::NotInitialized { path: steps_dir });
    }

    let step_files = list_files(&steps_dir, STEPS_KEEP_MARKER).await?;
    let mut summary = CleanupSummary::default();

    if options.purge {
        summary.purged = purge_steps(&paths, step_files, options.dry_run).await?;
    } else {
        let archive = archive_steps(&paths, step_files, options.dry_run).await?;
        if let Some((dir, archived)) = archive {
            summary.archive_dir = Some(dir);
            summary.archived = archived;
        }
    }

    reset_records(&paths, options.dry_run).await?;
    summary.queue_removed = clear_queue(&paths, options.dry_run).await?;

    if options.dry_run {
        println!("DRY RUN: cleanup simulated, nothing was changed.");
    } else {
        println!("Cleanup complete, ready for a new DevFlow session.");
    }

    Ok(summary)
}

/// Regular files in `dir` other than `keep`, sorted by name.
async fn list_files(dir: &Path, keep: &str) -> Result<Vec<PathBuf>> {
    let mut entries =
        tokio::fs::read_dir(dir).await.map_err(|e| DevflowError::io("read directory", dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) =
        entries.next_entry().await.map_err(|e| DevflowError::io("read directory", dir, e))?
    {
        let file_type =
            entry.file_type().await.map_err(|e| DevflowError::io("stat", entry.path(), e))?;
        if file_type.is_file() && entry.file_name() != keep {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

async fn archive_steps(
    paths: &WorkspacePaths,
    step_files: Vec<PathBuf>,
    dry_run: bool,
) -> Result<Option<(PathBuf, Vec<PathBuf>)>> {
    if step_files.is_empty() {
        println!("No step files to archive.");
        return Ok(None);
    }

    let archive_dir = paths.history_dir().join(file_stamp(&now_iso()));
    let moves: Vec<(PathBuf, PathBuf)> = step_files
        .into_iter()
        .filter_map(|source| {
            let target = archive_dir.join(source.file_name()?);
            Some((source, target))
        })
        .collect();

    if dry_run {
        println!("DRY RUN: would create archive {}", paths.display_relative(&archive_dir));
        for (source, target) in &moves {
            println!(
                "DRY RUN: would move {} -> {}",
                paths.display_relative(source),
                paths.display_relative(target)
            );
        }
    } else {
        tokio::fs::create_dir_all(&archive_dir)
            .await
            .map_err(|e| DevflowError::io("create directory", &archive_dir, e))?;

        try_join_all(moves.iter().map(|(source, target)| async move {
            tokio::fs::rename(source, target)
                .await
                .map_err(|e| DevflowError::io("rename", source, e))?;
            println!(
                "Archived {} -> {}",
                paths.display_relative(source),
                paths.display_relative(target)
            );
            Ok::<_, DevflowError>(())
        }))
        .await?;
    }

    let archived = moves.into_iter().map(|(_, target)| target).collect();
    Ok(Some((archive_dir, archived)))
}

async fn purge_steps(
    paths: &WorkspacePaths,
    step_files: Vec<PathBuf>,
    dry_run: bool,
) -> Result<Vec<PathBuf>> {
    if step_files.is_empty() {
        println!("No step files to delete.");
        return Ok(step_files);
    }

    if dry_run {
        for path in &step_files {
            println!("DRY RUN: would delete {}", paths.display_relative(path));
        }
        return Ok(step_files);
    }

    try_join_all(step_files.iter().map(|path| async move {
        tokio::fs::remove_file(path).await.map_err(|e| DevflowError::io("remove", path, e))?;
        println!("Deleted {}", paths.display_relative(path));
        Ok::<_, DevflowError>(())
    }))
    .await?;

    Ok(step_files)
}

/// Replace both records wholesale; existing content is never merged.
async fn reset_records(paths: &WorkspacePaths, dry_run: bool) -> Result<()> {
    let state_file = paths.state_file();
    let preset_file = paths.preset_file();

    if dry_run {
        println!(
            "DRY RUN: would reset {} and {}",
            paths.display_relative(&state_file),
            paths.display_relative(&preset_file)
        );
        return Ok(());
    }

    write_json(&state_file, &SessionState::default()).await?;
    write_json(&preset_file, &PresetRecord::initial()).await?;
    println!(
        "Reset {} and {}",
        paths.display_relative(&state_file),
        paths.display_relative(&preset_file)
    );
    Ok(())
}

async fn clear_queue(paths: &WorkspacePaths, dry_run: bool) -> Result<Vec<PathBuf>> {
    let queue_dir = paths.queue_dir();
    if !tokio::fs::try_exists(&queue_dir).await.unwrap_or(false) {
        tracing::debug!(path = %queue_dir.display(), "No queue directory");
        return Ok(Vec::new());
    }

    let files = list_files(&queue_dir, QUEUE_KEEP_MARKER).await?;

    if dry_run {
        for path in &files {
            println!("DRY RUN: would remove {}", paths.display_relative(path));
        }
        return Ok(files);
    }

    try_join_all(files.iter().map(|path| async move {
        tokio::fs::remove_file(path).await.map_err(|e| DevflowError::io("remove", path, e))
    }))
    .await?;

    if !files.is_empty() {
        tracing::info!(count = files.len(), "Removed queue files");
    }
    Ok(files)
}
