//! Layout of the `.devflow` control directory.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

/// Name of the control directory inside a workspace.
pub const DEVFLOW_DIR: &str = ".devflow";

/// Marker kept in the steps directory so it survives version control.
pub const STEPS_KEEP_MARKER: &str = ".keep";

/// Marker kept in the queue directory.
pub const QUEUE_KEEP_MARKER: &str = ".gitkeep";

/// Resolved paths of one workspace's control directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    root: PathBuf,
    devflow: PathBuf,
}

impl WorkspacePaths {
    /// Create the layout for a workspace root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let devflow = root.join(DEVFLOW_DIR);
        Self { root, devflow }
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `.devflow`
    pub fn devflow_dir(&self) -> &Path {
        &self.devflow
    }

    /// `.devflow/steps`
    pub fn steps_dir(&self) -> PathBuf {
        self.devflow.join("steps")
    }

    /// `.devflow/history`
    pub fn history_dir(&self) -> PathBuf {
        self.devflow.join("history")
    }

    /// `.devflow/queue`
    pub fn queue_dir(&self) -> PathBuf {
        self.devflow.join("queue")
    }

    /// `.devflow/reports`
    pub fn reports_dir(&self) -> PathBuf {
        self.devflow.join("reports")
    }

    /// `.devflow/state.json`
    pub fn state_file(&self) -> PathBuf {
        self.devflow.join("state.json")
    }

    /// `.devflow/preset.json`
    pub fn preset_file(&self) -> PathBuf {
        self.devflow.join("preset.json")
    }

    /// Default location for a review document generated at `stamp`.
    pub fn review_report(&self, stamp: &str) -> PathBuf {
        self.reports_dir().join(format!("review-{stamp}.md"))
    }

    /// Path relative to the workspace root, for display.
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root).unwrap_or(path).display().to_string()
    }
}

/// Current UTC time as an ISO-8601 string with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Make an ISO timestamp safe for file names (`:` and `.` become `-`).
pub fn file_stamp(iso: &str) -> String {
    iso.replace([':', '.'], "-")
}
