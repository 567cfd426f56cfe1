//! Error types shared by the DevFlow library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for DevFlow operations.
pub type Result<T> = std::result::Result<T, DevflowError>;

/// Errors that can occur while driving a DevFlow workspace.
#[derive(Debug, Error)]
pub enum DevflowError {
    /// The workspace has no `.devflow/steps` directory.
    #[error("{} not found, make sure you are in a DevFlow project root (run `devflow setup` first)", path.display())]
    NotInitialized { path: PathBuf },

    /// The template source directory does not exist.
    #[error("Template directory not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Filesystem operation failed.
    #[error("{} failed for {}: {source}", op, path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized or parsed.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The wizard was given no description of the work.
    #[error("No intent provided, the wizard has been aborted")]
    EmptyIntent,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DevflowError {
    /// Wrap an I/O error with the operation and path it happened on.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { op, path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_names_path_and_op() {
        let err = DevflowError::io(
            "copy",
            "/tmp/x/state.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("copy"));
        assert!(msg.contains("state.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_not_initialized_message() {
        let err = DevflowError::NotInitialized { path: PathBuf::from(".devflow/steps") };
        assert!(err.to_string().contains(".devflow/steps"));
    }
}
