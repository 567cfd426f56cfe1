//! NPM/Yarn/PNPM/Bun package.json scanner.
//!
//! Recommends the `test`, `lint` and `typecheck` scripts when defined.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::{Scanner, TestCommand};

/// Scripts recommended when present, in recommendation order.
const CHECK_SCRIPTS: [&str; 3] = ["test", "lint", "typecheck"];

/// Scanner for package.json scripts.
pub struct NpmScanner;

impl Scanner for NpmScanner {
    fn name(&self) -> &str {
        "npm"
    }

    fn scan(&self, path: &Path) -> anyhow::Result<Vec<TestCommand>> {
        if !path.join("package.json").exists() {
            return Ok(Vec::new());
        }

        let package = parse_package_json(path)?;
        let package_manager = detect_package_manager(path);

        let commands = CHECK_SCRIPTS
            .iter()
            .filter(|script| package.has_script(script))
            .map(|script| {
                TestCommand::new(
                    script_command(package_manager, script),
                    format!("package.json defines a `{script}` script"),
                )
            })
            .collect();

        Ok(commands)
    }
}

/// Parsed package.json structure.
#[derive(Debug, Default, Deserialize)]
pub struct PackageJson {
    /// Package name
    pub name: Option<String>,

    /// Scripts defined in package.json
    pub scripts: Option<HashMap<String, String>>,
}

impl PackageJson {
    /// Whether a script with this name is defined.
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.as_ref().is_some_and(|scripts| scripts.contains_key(name))
    }
}

/// Detect which package manager is being used.
pub fn detect_package_manager(path: &Path) -> &'static str {
    if path.join("bun.lockb").exists() {
        "bun"
    } else if path.join("pnpm-lock.yaml").exists() {
        "pnpm"
    } else if path.join("yarn.lock").exists() {
        "yarn"
    } else {
        "npm"
    }
}

/// Command line that runs `script` with `package_manager`.
pub fn script_command(package_manager: &str, script: &str) -> String {
    match package_manager {
        "yarn" => format!("yarn {script}"),
        pm => format!("{pm} run {script}"),
    }
}

/// Parse package.json from a directory.
pub fn parse_package_json(path: &Path) -> anyhow::Result<PackageJson> {
    let content = std::fs::read_to_string(path.join("package.json"))?;
    let package: PackageJson = serde_json::from_str(&content)?;
    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_package_json_with_scripts() {
        let json = r#"{
            "name": "test-package",
            "version": "1.0.0",
            "scripts": {
                "test": "jest",
                "build": "tsc"
            }
        }"#;

        let package: PackageJson = serde_json::from_str(json).unwrap();
        assert_eq!(package.name, Some("test-package".to_string()));
        assert!(package.has_script("test"));
        assert!(package.has_script("build"));
        assert!(!package.has_script("lint"));
    }

    #[test]
    fn test_package_without_scripts() {
        let package: PackageJson = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert!(!package.has_script("test"));
    }

    #[test]
    fn test_detect_package_manager() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_package_manager(dir.path()), "npm");

        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(detect_package_manager(dir.path()), "yarn");

        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(detect_package_manager(dir.path()), "pnpm");

        std::fs::write(dir.path().join("bun.lockb"), "").unwrap();
        assert_eq!(detect_package_manager(dir.path()), "bun");
    }

    #[test]
    fn test_script_command() {
        assert_eq!(script_command("npm", "test"), "npm run test");
        assert_eq!(script_command("pnpm", "lint"), "pnpm run lint");
        assert_eq!(script_command("bun", "typecheck"), "bun run typecheck");
        assert_eq!(script_command("yarn", "test"), "yarn test");
    }

    #[test]
    fn test_scan_orders_check_scripts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"scripts": {"typecheck": "tsc", "build": "vite build", "test": "vitest", "lint": "eslint ."}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();

        let commands = NpmScanner.scan(dir.path()).unwrap();
        let lines: Vec<&str> = commands.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(lines, vec!["pnpm run test", "pnpm run lint", "pnpm run typecheck"]);
        assert!(commands[0].reason.contains("`test`"));
    }

    #[test]
    fn test_scan_invalid_package_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), "not json").unwrap();
        assert!(NpmScanner.scan(dir.path()).is_err());
    }

    #[test]
    fn test_npm_scanner_name() {
        let scanner = NpmScanner;
        assert_eq!(scanner.name(), "npm");
    }
}
