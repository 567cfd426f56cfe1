//! Conflict-aware copy of a template tree into a project.
//!
//! Every file ends up in exactly one of three states: `copied` (new at the
//! destination), `overwritten` (existed, replaced because of `force`) or
//! `skipped` (existed, left untouched). Directories are created as needed and
//! never reported.

use std::fmt;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use serde::Serialize;
use walkdir::WalkDir;

use crate::core::{DevflowError, Result, DEFAULT_IGNORE_DIRS};

/// Reason attached to `skipped` outcomes.
pub const ALREADY_EXISTS: &str = "already exists";

/// Outcome of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyStatus {
    Copied,
    Overwritten,
    Skipped,
}

impl CopyStatus {
    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copied => "copied",
            Self::Overwritten => "overwritten",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-file result of a synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyResult {
    /// Path relative to the template root, `/`-separated
    pub path: String,

    /// What happened to the file
    pub status: CopyStatus,

    /// Why, when not obvious
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

type PathFilter = dyn Fn(&Path) -> bool + Send + Sync;

/// Options for [`synchronize`].
pub struct SyncOptions {
    /// Replace files that already exist at the destination
    pub force: bool,

    filter: Option<Box<PathFilter>>,
    ignore_dirs: Vec<String>,
}

impl SyncOptions {
    /// Options with the default filter.
    pub fn new(force: bool) -> Self {
        Self { force, ..Self::default() }
    }

    /// Directory names rejected by the default filter unless overridden.
    pub fn default_ignore_dirs() -> Vec<String> {
        DEFAULT_IGNORE_DIRS.iter().map(|d| (*d).to_string()).collect()
    }

    /// Use a custom filter on relative paths instead of the default one.
    pub fn with_filter(mut self, filter: impl Fn(&Path) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Directory names rejected by the default filter.
    pub fn with_ignore_dirs(mut self, ignore_dirs: Vec<String>) -> Self {
        self.ignore_dirs = ignore_dirs;
        self
    }

    /// Whether a relative path takes part in the synchronization.
    pub fn accepts(&self, relative: &Path) -> bool {
        match &self.filter {
            Some(filter) => filter(relative),
            None => !relative.components().any(|component| {
                let name = component.as_os_str().to_string_lossy();
                self.ignore_dirs.iter().any(|ignored| *ignored == name)
            }),
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { force: false, filter: None, ignore_dirs: Self::default_ignore_dirs() }
    }
}

impl fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("force", &self.force)
            .field("custom_filter", &self.filter.is_some())
            .field("ignore_dirs", &self.ignore_dirs)
            .finish()
    }
}

/// Entries of the source tree that pass the filter.
struct TreePlan {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

fn plan_tree(source: &Path, options: &SyncOptions) -> Result<TreePlan> {
    if !source.is_dir() {
        return Err(DevflowError::TemplateNotFound(source.to_path_buf()));
    }

    let mut plan = TreePlan { dirs: Vec::new(), files: Vec::new() };

    // Ignored directory names reject everything below them, so the default
    // filter can prune. A custom filter is asked about every path instead.
    let prune = options.filter.is_none();
    let walker =
        WalkDir::new(source).min_depth(1).sort_by_file_name().into_iter().filter_entry(|entry| {
            !prune || entry.path().strip_prefix(source).map_or(true, |rel| options.accepts(rel))
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| source.to_path_buf(), Path::to_path_buf);
            DevflowError::io("walk", path, e.into())
        })?;

        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        if !options.accepts(relative) {
            continue;
        }

        if entry.file_type().is_dir() {
            plan.dirs.push(relative.to_path_buf());
        } else if entry.file_type().is_file() {
            plan.files.push(relative.to_path_buf());
        }
    }

    Ok(plan)
}

fn display_path(relative: &Path) -> String {
    relative.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
}

async fn sync_file(
    source: &Path,
    destination: &Path,
    relative: &Path,
    force: bool,
) -> Result<CopyResult> {
    let from = source.join(relative);
    let to = destination.join(relative);
    let path = display_path(relative);

    let exists =
        tokio::fs::try_exists(&to).await.map_err(|e| DevflowError::io("stat", &to, e))?;

    if exists && !force {
        tracing::debug!(path = %path, "Skipping existing file");
        return Ok(CopyResult {
            path,
            status: CopyStatus::Skipped,
            reason: Some(ALREADY_EXISTS.to_string()),
        });
    }

    if let Some(parent) = to.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DevflowError::io("create directory", parent, e))?;
    }
    tokio::fs::copy(&from, &to).await.map_err(|e| DevflowError::io("copy", &from, e))?;

    let status = if exists { CopyStatus::Overwritten } else { CopyStatus::Copied };
    tracing::debug!(path = %path, status = %status, "Synchronized file");

    Ok(CopyResult { path, status, reason: None })
}

/// Reproduce the `source` tree under `destination`.
///
/// Results are sorted by relative path. The first I/O failure aborts the
/// whole run; files already written stay in place.
pub async fn synchronize(
    source: &Path,
    destination: &Path,
    options: &SyncOptions,
) -> Result<Vec<CopyResult>> {
    let plan = plan_tree(source, options)?;

    tokio::fs::create_dir_all(destination)
        .await
        .map_err(|e| DevflowError::io("create directory", destination, e))?;

    for dir in &plan.dirs {
        let target = destination.join(dir);
        tokio::fs::create_dir_all(&target)
            .await
            .map_err(|e| DevflowError::io("create directory", &target, e))?;
    }

    let mut results = try_join_all(
        plan.files.iter().map(|relative| sync_file(source, destination, relative, options.force)),
    )
    .await?;

    results.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(results)
}

/// List the files a synchronization would consider, sorted.
pub fn list_files(source: &Path, options: &SyncOptions) -> Result<Vec<String>> {
    let plan = plan_tree(source, options)?;
    let mut files: Vec<String> = plan.files.iter().map(|p| display_path(p)).collect();
    files.sort();
    Ok(files)
}

/// Count outcomes as `(copied, overwritten, skipped)`.
pub fn summarize(results: &[CopyResult]) -> (usize, usize, usize) {
    results.iter().fold((0, 0, 0), |(c, o, s), r| match r.status {
        CopyStatus::Copied => (c + 1, o, s),
        CopyStatus::Overwritten => (c, o + 1, s),
        CopyStatus::Skipped => (c, o, s + 1),
    })
}
