//! Review aggregation: step ledger plus external signals.

use std::path::Path;

use serde::Serialize;

use super::ledger::{load_session_state, load_steps, StepStatus};
use crate::core::{find_step, now_iso, SessionState};
use crate::git::CommitInfo;
use crate::scanner::TestCommand;

/// Signals gathered outside the control directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalSignals {
    /// Detected test/lint/typecheck commands, most specific first
    pub test_commands: Vec<TestCommand>,

    /// Recent commits, newest first
    pub recent_commits: Vec<CommitInfo>,
}

/// Everything a review shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub generated_at: String,
    pub state: SessionState,
    pub steps: Vec<StepStatus>,
    pub completed_steps: Vec<StepStatus>,
    pub missing_steps: Vec<StepStatus>,
    pub recommended_next: Option<String>,
    pub recommended_tests: Vec<TestCommand>,
    pub recent_commits: Vec<CommitInfo>,
    pub suggestions: Vec<String>,
}

impl ReviewReport {
    /// Number of steps whose artifact exists.
    pub fn completed_count(&self) -> usize {
        self.completed_steps.len()
    }

    /// Number of steps in the workflow.
    pub fn total_count(&self) -> usize {
        self.steps.len()
    }
}

/// Aggregate the workspace at `root` with the given signals.
///
/// Never fails: unreadable records degrade to absent or default values.
pub async fn aggregate(root: &Path, signals: ExternalSignals) -> ReviewReport {
    let (steps, state) = tokio::join!(load_steps(root), load_session_state(root));
    build_report(now_iso(), state, steps, signals)
}

/// Derive a report from already loaded inputs.
pub fn build_report(
    generated_at: String,
    state: SessionState,
    steps: Vec<StepStatus>,
    signals: ExternalSignals,
) -> ReviewReport {
    let (completed_steps, missing_steps): (Vec<StepStatus>, Vec<StepStatus>) =
        steps.iter().cloned().partition(|step| step.exists);

    let next = recommend_next(&state, &missing_steps);
    let suggestions = build_suggestions(next, &state, &signals.test_commands);
    let recommended_next = next.map(StepStatus::identifier);

    ReviewReport {
        generated_at,
        state,
        steps,
        completed_steps,
        missing_steps,
        recommended_next,
        recommended_tests: signals.test_commands,
        recent_commits: signals.recent_commits,
        suggestions,
    }
}

/// Pick the step to work on next.
///
/// `suggestedNext` wins only while it names a missing step; a stale override
/// is ignored in favour of the first missing step.
pub fn recommend_next<'a>(
    state: &SessionState,
    missing: &'a [StepStatus],
) -> Option<&'a StepStatus> {
    let first_missing = missing.first();

    let Some(suggested) = state.suggested_next.as_deref() else {
        return first_missing;
    };

    if let Some(step) = missing.iter().find(|step| step.identifier() == suggested) {
        return Some(step);
    }

    match (first_missing, find_step(suggested)) {
        (Some(step), None) => tracing::warn!(
            suggested,
            using = %step.identifier(),
            "Ignoring suggestedNext, it does not name a workflow step"
        ),
        (Some(step), Some(_)) => tracing::warn!(
            suggested,
            using = %step.identifier(),
            "Ignoring suggestedNext, that step artifact already exists"
        ),
        (None, _) => tracing::debug!(suggested, "All steps exist, ignoring suggestedNext"),
    }
    first_missing
}

fn build_suggestions(
    next: Option<&StepStatus>,
    state: &SessionState,
    test_commands: &[TestCommand],
) -> Vec<String> {
    let mut suggestions = Vec::new();

    match next {
        Some(step) => suggestions.push(format!(
            "Generate {} ({}) to keep the workflow complete.",
            step.definition.file_name(),
            step.definition.title
        )),
        None => suggestions.push(
            "All step artifacts exist; confirm each `status` is approved and its summary is current."
                .to_string(),
        ),
    }

    if let Some(first) = test_commands.first() {
        suggestions.push(format!("Run the recommended check, e.g. `{}`.", first.command));
    }

    if state.build_needs_attention() {
        suggestions.push(
            "The last build check did not pass; fix the build or tests before proceeding."
                .to_string(),
        );
    }

    suggestions
}
