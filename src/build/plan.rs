//! Which tasks to run for which marker files.

use std::path::Path;

use crate::scanner::{detect_package_manager, parse_package_json};

/// A command to run as part of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    /// Display label
    pub label: String,

    /// Executable name
    pub program: String,

    /// Arguments
    pub args: Vec<String>,

    /// Skip instead of fail when the program is not installed
    pub optional: bool,
}

impl TaskSpec {
    /// A required task, labelled by its command line.
    pub fn new(program: &str, args: &[&str]) -> Self {
        let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        let label = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        Self { label, program: program.to_string(), args, optional: false }
    }

    /// Mark the task optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Run a package.json script with the given package manager.
    pub fn script(package_manager: &str, script: &str) -> Self {
        if package_manager == "yarn" {
            Self::new("yarn", &[script])
        } else {
            Self::new(package_manager, &["run", script])
        }
    }

    /// Full command line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Scripts run for a Node project, in order, when defined.
const NODE_SCRIPTS: [&str; 3] = ["typecheck", "build", "lint"];

/// One chain per detected toolchain, in a fixed order.
pub fn plan_chains(root: &Path) -> Vec<Vec<TaskSpec>> {
    let mut chains = Vec::new();

    if root.join("package.json").exists() {
        match parse_package_json(root) {
            Ok(package) => {
                let pm = detect_package_manager(root);
                let chain: Vec<TaskSpec> = NODE_SCRIPTS
                    .iter()
                    .filter(|script| package.has_script(script))
                    .map(|script| TaskSpec::script(pm, script))
                    .collect();
                if !chain.is_empty() {
                    chains.push(chain);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping Node checks, package.json is unreadable");
            }
        }
    }

    if root.join("go.mod").exists() {
        chains.push(vec![
            TaskSpec::new("go", &["mod", "tidy"]),
            TaskSpec::new("go", &["build", "./..."]),
            TaskSpec::new("golangci-lint", &["run"]).optional(),
        ]);
    }

    if root.join("Cargo.toml").exists() {
        chains.push(vec![
            TaskSpec::new("cargo", &["check"]),
            TaskSpec::new("cargo", &["clippy", "--all-targets"]),
        ]);
    }

    if root.join("pyproject.toml").exists() || root.join("requirements.txt").exists() {
        chains.push(vec![
            TaskSpec::new("pip", &["check"]),
            TaskSpec::new("flake8", &["."]).optional(),
        ]);
    }

    chains
}
