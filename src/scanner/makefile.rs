//! Makefile scanner.
//!
//! Recommends `make test`, noting whether the Makefile declares the target.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::{Scanner, TestCommand};

/// Makefile names in GNU make lookup order.
const MAKEFILE_NAMES: [&str; 3] = ["GNUmakefile", "Makefile", "makefile"];

/// Scanner for Makefile targets.
pub struct MakefileScanner;

impl Scanner for MakefileScanner {
    fn name(&self) -> &str {
        "make"
    }

    fn scan(&self, path: &Path) -> anyhow::Result<Vec<TestCommand>> {
        let Some(makefile_path) = find_makefile(path) else {
            return Ok(Vec::new());
        };
        let file_name = makefile_path.file_name().and_then(|n| n.to_str()).unwrap_or("Makefile");

        let content = std::fs::read_to_string(&makefile_path)?;
        let targets = parse_makefile_targets(&content)?;

        let reason = if targets.iter().any(|t| t == "test") {
            format!("{file_name} declares a `test` target")
        } else {
            format!("{file_name} found; try `make test`")
        };

        Ok(vec![TestCommand::new("make test", reason)])
    }
}

/// Find the Makefile in the given directory.
pub fn find_makefile(path: &Path) -> Option<PathBuf> {
    MAKEFILE_NAMES.iter().map(|name| path.join(name)).find(|candidate| candidate.is_file())
}

/// Parse Makefile content and extract rule target names in declaration order.
pub fn parse_makefile_targets(content: &str) -> anyhow::Result<Vec<String>> {
    // "target: deps" or "target:", but not "VAR = value" or "VAR := value"
    let target_re = Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_.-]*):(?:[^=]|$)")?;

    let mut targets: Vec<String> = Vec::new();
    for line in content.lines() {
        // Recipe lines start with a tab
        if line.starts_with('\t') {
            continue;
        }

        if let Some(target) = target_re.captures(line.trim()).and_then(|c| c.get(1)) {
            let target = target.as_str();
            if !targets.iter().any(|t| t == target) {
                targets.push(target.to_string());
            }
        }
    }

    Ok(targets)
}
