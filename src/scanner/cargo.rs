//! Cargo/Rust project scanner.
//!
//! Scans Cargo.toml to recommend the Rust test runner.

use std::path::Path;

use serde::Deserialize;

use super::{Scanner, TestCommand};

/// Scanner for Rust/Cargo projects.
pub struct CargoScanner;

impl Scanner for CargoScanner {
    fn name(&self) -> &str {
        "cargo"
    }

    fn scan(&self, dir: &Path) -> anyhow::Result<Vec<TestCommand>> {
        let cargo_toml_path = dir.join("Cargo.toml");
        if !cargo_toml_path.exists() {
            return Ok(Vec::new());
        }

        // An unparsable manifest still marks a Rust project.
        let config = match parse_cargo_toml(&cargo_toml_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(error = %e, "Could not parse Cargo.toml");
                CargoToml::default()
            }
        };

        let reason = if config.workspace.is_some() {
            "Cargo.toml declares a workspace; run the Rust tests".to_string()
        } else if let Some(name) = config.package.and_then(|p| p.name) {
            format!("Cargo.toml found (package {name}); run the Rust tests")
        } else {
            "Cargo.toml found; run the Rust tests".to_string()
        };

        Ok(vec![TestCommand::new("cargo test", reason)])
    }
}

/// The parts of Cargo.toml the scanner cares about.
#[derive(Debug, Default, Deserialize)]
struct CargoToml {
    package: Option<CargoPackage>,
    workspace: Option<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: Option<String>,
}

fn parse_cargo_toml(path: &Path) -> anyhow::Result<CargoToml> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cargo_scanner_name() {
        let scanner = CargoScanner;
        assert_eq!(scanner.name(), "cargo");
    }

    #[test]
    fn test_scan_package() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();

        let commands = CargoScanner.scan(dir.path()).unwrap();
        assert_eq!(commands[0].command, "cargo test");
        assert!(commands[0].reason.contains("demo"));
    }

    #[test]
    fn test_scan_workspace() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[workspace]\nmembers = [\"a\"]\n").unwrap();

        let commands = CargoScanner.scan(dir.path()).unwrap();
        assert!(commands[0].reason.contains("workspace"));
    }

    #[test]
    fn test_scan_malformed_manifest_still_recommends() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package\n").unwrap();

        let commands = CargoScanner.scan(dir.path()).unwrap();
        assert_eq!(commands.len(), 1);
    }
}
