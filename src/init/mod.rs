//! Project initialization and setup.
//!
//! This module copies the DevFlow template into a project without clobbering
//! files the user already has.

mod sync;
mod templates;

pub use sync::{
    list_files, summarize, synchronize, CopyResult, CopyStatus, SyncOptions, ALREADY_EXISTS,
};
pub use templates::{
    extract_bundled_template, resolve_template_source, BundledFile, PreparedTemplate,
    TemplateSource, BUNDLED_TEMPLATE, TEMPLATE_DIR_ENV,
};

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::{DevflowError, Result, DEVFLOW_DIR};

/// Options for project setup.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Template directory to copy from
    pub template_root: PathBuf,
    /// Overwrite existing files without prompting
    pub force: bool,
    /// Answer yes to prompts
    pub yes: bool,
    /// Only preview the files that would be written
    pub dry_run: bool,
    /// Only list the template files
    pub list: bool,
    /// Directory names excluded from the copy
    pub ignore_dirs: Vec<String>,
}

impl SetupOptions {
    /// Options for the given template with everything else off.
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
            force: false,
            yes: false,
            dry_run: false,
            list: false,
            ignore_dirs: SyncOptions::default_ignore_dirs(),
        }
    }
}

/// What a setup run ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Files were listed, nothing written
    Listed(Vec<String>),
    /// The user declined to continue
    Cancelled,
    /// The template was synchronized
    Synced(Vec<CopyResult>),
}

/// Scaffold DevFlow into `path`.
pub async fn setup_project(path: &Path, options: &SetupOptions) -> Result<SetupOutcome> {
    let sync_options =
        SyncOptions::new(options.force).with_ignore_dirs(options.ignore_dirs.clone());

    if options.list || options.dry_run {
        let files = list_files(&options.template_root, &sync_options)?;
        println!("Template files ({}):", files.len());
        for file in &files {
            println!("  {file}");
        }
        if options.dry_run {
            println!("Dry run complete. No files were written.");
        }
        return Ok(SetupOutcome::Listed(files));
    }

    if path.join(DEVFLOW_DIR).exists() && !options.force {
        let proceed = options.yes || confirm("A .devflow directory already exists. Continue?")?;
        if !proceed {
            println!("Cancelled. Use --force to overwrite without prompting.");
            return Ok(SetupOutcome::Cancelled);
        }
    }

    tracing::info!(
        template = %options.template_root.display(),
        target = %path.display(),
        force = options.force,
        "Synchronizing template"
    );
    let results = synchronize(&options.template_root, path, &sync_options).await?;

    print_results(&results);
    print_next_steps();

    Ok(SetupOutcome::Synced(results))
}

fn confirm(message: &str) -> Result<bool> {
    print!("{message} [y/N] ");
    io::stdout().flush().map_err(|e| DevflowError::io("flush", "<stdout>", e))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| DevflowError::io("read", "<stdin>", e))?;

    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn print_results(results: &[CopyResult]) {
    if results.is_empty() {
        eprintln!("Warning: no files were written (the template may be empty).");
        return;
    }

    for result in results {
        let reason = result.reason.as_ref().map(|r| format!(" ({r})")).unwrap_or_default();
        println!("{:<11} {}{}", result.status.as_str(), result.path, reason);
    }

    println!();
    for line in summary_lines(results) {
        println!("{line}");
    }
}

/// Outcome counts, zero overwritten/skipped counts omitted.
fn summary_lines(results: &[CopyResult]) -> Vec<String> {
    let (copied, overwritten, skipped) = summarize(results);
    let mut lines = vec![format!("Copied: {copied}")];
    if overwritten > 0 {
        lines.push(format!("Overwritten: {overwritten}"));
    }
    if skipped > 0 {
        lines.push(format!("Skipped: {skipped} (use --force to overwrite)"));
    }
    lines
}

fn print_next_steps() {
    println!();
    println!("✨ DevFlow scaffolding is ready. Next steps:");
    println!("  1. devflow wizard \"describe your goal\"   # pick a scenario and write the preset");
    println!("  2. Share .devflow/bootstrap/session-start.md with your assistant");
    println!("  3. Work through the steps; use `devflow review` and `devflow cleanup` as needed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_setup_copies_bundled_template() {
        let dest = TempDir::new().unwrap();
        let template = TemplateSource::Bundled.prepare().unwrap();
        let options = SetupOptions::new(template.path());

        let outcome = setup_project(dest.path(), &options).await.unwrap();
        let SetupOutcome::Synced(results) = outcome else {
            panic!("expected a sync");
        };
        assert!(results.iter().any(|r| r.path == ".devflow/state.json"));
        assert!(results.iter().all(|r| r.status == CopyStatus::Copied));
        assert!(dest.path().join(".devflow/steps/.keep").is_file());
    }

    #[tokio::test]
    async fn test_setup_dry_run_writes_nothing() {
        let dest = TempDir::new().unwrap();
        let template = TemplateSource::Bundled.prepare().unwrap();
        let mut options = SetupOptions::new(template.path());
        options.dry_run = true;

        let outcome = setup_project(dest.path(), &options).await.unwrap();
        assert!(matches!(outcome, SetupOutcome::Listed(ref files) if !files.is_empty()));
        assert!(!dest.path().join(DEVFLOW_DIR).exists());
    }

    #[tokio::test]
    async fn test_setup_existing_with_yes_skips_conflicts() {
        let dest = TempDir::new().unwrap();
        let template = TemplateSource::Bundled.prepare().unwrap();
        let mut options = SetupOptions::new(template.path());
        setup_project(dest.path(), &options).await.unwrap();

        options.yes = true;
        let outcome = setup_project(dest.path(), &options).await.unwrap();
        let SetupOutcome::Synced(results) = outcome else {
            panic!("expected a sync");
        };
        assert!(results.iter().all(|r| r.status == CopyStatus::Skipped));
    }

    #[test]
    fn test_summary_lines_cover_every_outcome() {
        let result =
            |path: &str, status| CopyResult { path: path.to_string(), status, reason: None };
        let results = vec![
            result("a", CopyStatus::Copied),
            result("b", CopyStatus::Overwritten),
            result("c", CopyStatus::Skipped),
            result("d", CopyStatus::Skipped),
        ];

        assert_eq!(
            summary_lines(&results),
            vec!["Copied: 1", "Overwritten: 1", "Skipped: 2 (use --force to overwrite)"]
        );
        assert_eq!(summary_lines(&results[..1]), vec!["Copied: 1"]);
    }
}
