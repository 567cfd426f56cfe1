//! Toolchain scanners for discovering test commands.
//!
//! Each scanner looks for a marker file (`package.json`, `go.mod`, ...) and
//! recommends the commands that check the project. Scanners run in a fixed
//! order so project-local scripts come before ecosystem defaults.

mod cargo;
mod go_lang;
mod makefile;
mod npm;
mod python;

pub use cargo::CargoScanner;
pub use go_lang::GoScanner;
pub use makefile::{find_makefile, parse_makefile_targets, MakefileScanner};
pub use npm::{detect_package_manager, parse_package_json, script_command, NpmScanner, PackageJson};
pub use python::PythonScanner;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A command worth running to check the project, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCommand {
    /// Shell command line
    pub command: String,

    /// Marker that triggered the recommendation
    pub reason: String,
}

impl TestCommand {
    /// Create a new recommendation.
    pub fn new(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { command: command.into(), reason: reason.into() }
    }
}

/// Trait for toolchain scanners.
pub trait Scanner: Send + Sync {
    /// Get the name of this scanner.
    fn name(&self) -> &str;

    /// Scan the directory and return recommended commands.
    fn scan(&self, path: &Path) -> anyhow::Result<Vec<TestCommand>>;
}

/// Runs every toolchain scanner against one directory.
pub struct ProjectScanner {
    /// Root directory to scan
    root: PathBuf,

    /// Scanners in recommendation order
    scanners: Vec<Box<dyn Scanner>>,
}

impl ProjectScanner {
    /// Create a new project scanner for the given directory.
    pub fn new(root: &Path) -> Self {
        let scanners: Vec<Box<dyn Scanner>> = vec![
            Box::new(NpmScanner),
            Box::new(GoScanner),
            Box::new(CargoScanner),
            Box::new(PythonScanner),
            Box::new(MakefileScanner),
        ];

        Self { root: root.to_path_buf(), scanners }
    }

    /// Scan the project and return all recommendations, in scanner order.
    ///
    /// A failing scanner is logged and skipped.
    pub fn scan(&self) -> Vec<TestCommand> {
        let mut all_commands = Vec::new();

        for scanner in &self.scanners {
            match scanner.scan(&self.root) {
                Ok(commands) => {
                    if !commands.is_empty() {
                        tracing::debug!(
                            scanner = scanner.name(),
                            count = commands.len(),
                            "Discovered test commands"
                        );
                        all_commands.extend(commands);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        scanner = scanner.name(),
                        error = %e,
                        "Scanner failed"
                    );
                }
            }
        }

        all_commands
    }

    /// Get the number of scanners.
    pub fn scanner_count(&self) -> usize {
        self.scanners.len()
    }
}

/// Scan `root` for recommended test commands.
pub fn detect_test_commands(root: &Path) -> Vec<TestCommand> {
    ProjectScanner::new(root).scan()
}
