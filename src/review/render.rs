//! Markdown rendering of a [`ReviewReport`].

use std::fmt::Write;

use super::aggregate::ReviewReport;
use crate::core::WorkspacePaths;

/// Render the report as a Markdown document.
pub fn render_markdown(report: &ReviewReport, paths: &WorkspacePaths) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write_document(&mut out, report, paths);
    out
}

fn write_document(
    out: &mut String,
    report: &ReviewReport,
    paths: &WorkspacePaths,
) -> std::fmt::Result {
    writeln!(out, "# DevFlow Review ({})", report.generated_at)?;
    writeln!(out)?;

    writeln!(out, "## Status")?;
    let current = report.state.current_step.as_deref().unwrap_or("not started");
    writeln!(out, "- Current step: {current}")?;
    writeln!(
        out,
        "- Recommended next: {}",
        report.recommended_next.as_deref().unwrap_or("all steps complete")
    )?;
    writeln!(out, "- Progress: {}/{}", report.completed_count(), report.total_count())?;
    if let Some(build) = &report.state.last_build_status {
        writeln!(out, "- Last build check: {build}")?;
    }
    writeln!(out)?;

    if !report.completed_steps.is_empty() {
        writeln!(out, "## Completed steps")?;
        for step in &report.completed_steps {
            write!(out, "- {} ({})", step.identifier(), step.definition.title)?;
            if let Some(status) = &step.status {
                write!(out, " [{status}]")?;
            }
            if let Some(summary) = &step.summary {
                write!(out, ": {summary}")?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    if !report.missing_steps.is_empty() {
        writeln!(out, "## Missing step artifacts")?;
        for step in &report.missing_steps {
            writeln!(
                out,
                "- {} ({}): missing `{}`",
                step.identifier(),
                step.definition.title,
                paths.display_relative(&step.path)
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Recommended commands")?;
    if report.recommended_tests.is_empty() {
        writeln!(out, "- No commands detected; choose checks that fit the project's stack.")?;
    } else {
        for test in &report.recommended_tests {
            writeln!(out, "- `{}`: {}", test.command, test.reason)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Recent commits")?;
    if report.recent_commits.is_empty() {
        writeln!(out, "- Not a Git repository, or the commit history could not be read.")?;
    } else {
        for commit in &report.recent_commits {
            writeln!(out, "- {} ({}) {}", commit.hash, commit.date, commit.message)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Next steps")?;
    for suggestion in &report.suggestions {
        writeln!(out, "- {suggestion}")?;
    }

    Ok(())
}
