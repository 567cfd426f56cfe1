//! Go project scanner.
//!
//! Scans go.mod to recommend the Go test runner.

use std::path::Path;

use super::{Scanner, TestCommand};

/// Scanner for Go projects.
pub struct GoScanner;

impl Scanner for GoScanner {
    fn name(&self) -> &str {
        "go"
    }

    fn scan(&self, dir: &Path) -> anyhow::Result<Vec<TestCommand>> {
        let go_mod_path = dir.join("go.mod");
        if !go_mod_path.exists() {
            return Ok(Vec::new());
        }

        let reason = match parse_go_mod(&go_mod_path)? {
            Some(module) => format!("go.mod found (module {module}); run the Go unit tests"),
            None => "go.mod found; run the Go unit tests".to_string(),
        };

        Ok(vec![TestCommand::new("go test ./...", reason)])
    }
}

/// Parse go.mod and return the module path, if declared.
fn parse_go_mod(path: &Path) -> anyhow::Result<Option<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(module_name(&content))
}

fn module_name(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        line.trim().strip_prefix("module ").map(|name| name.trim().trim_matches('"').to_string())
    })
}
