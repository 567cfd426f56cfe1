//! Python project scanner.
//!
//! Recommends pytest when a Python test or project marker is present.

use std::path::Path;

use super::{Scanner, TestCommand};

/// Marker files, checked in order.
const PYTHON_MARKERS: [&str; 3] = ["pytest.ini", "pyproject.toml", "requirements.txt"];

/// Scanner for Python projects.
pub struct PythonScanner;

impl Scanner for PythonScanner {
    fn name(&self) -> &str {
        "python"
    }

    fn scan(&self, dir: &Path) -> anyhow::Result<Vec<TestCommand>> {
        let Some(marker) = PYTHON_MARKERS.iter().find(|marker| dir.join(marker).exists()) else {
            return Ok(Vec::new());
        };

        Ok(vec![TestCommand::new(
            "pytest",
            format!("Python test configuration found ({marker}); run pytest"),
        )])
    }
}
