//! The fixed seven-step workflow.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One stage of the workflow and the artifact it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    /// Ordinal position, 1..=7
    pub slot: u8,

    /// Artifact kind (e.g. `requirements`)
    pub kind: &'static str,

    /// Human-readable title
    pub title: &'static str,
}

/// All workflow steps in slot order.
pub const STEP_DEFINITIONS: [StepDefinition; 7] = [
    StepDefinition { slot: 1, kind: "requirements", title: "Requirements" },
    StepDefinition { slot: 2, kind: "api-contract", title: "API Contract" },
    StepDefinition { slot: 3, kind: "plan", title: "Development Plan" },
    StepDefinition { slot: 4, kind: "todos", title: "Task List" },
    StepDefinition { slot: 5, kind: "impl", title: "Implementation" },
    StepDefinition { slot: 6, kind: "build-check", title: "Build Check" },
    StepDefinition { slot: 7, kind: "summary", title: "Summary" },
];

impl StepDefinition {
    /// `step-NN`
    pub fn id(&self) -> String {
        format!("step-{:02}", self.slot)
    }

    /// `step-NN.kind`, the identifier used by `suggestedNext`.
    pub fn identifier(&self) -> String {
        format!("step-{:02}.{}", self.slot, self.kind)
    }

    /// `step-NN.kind.json`
    pub fn file_name(&self) -> String {
        format!("{}.json", self.identifier())
    }

    /// Canonical artifact path inside a steps directory.
    pub fn artifact_path(&self, steps_dir: &Path) -> PathBuf {
        steps_dir.join(self.file_name())
    }
}

/// Look up a step by its `step-NN.kind` identifier.
pub fn find_step(identifier: &str) -> Option<&'static StepDefinition> {
    STEP_DEFINITIONS.iter().find(|step| step.identifier() == identifier)
}

/// Identifier of the first step, used as the initial `suggestedNext`.
pub fn first_step_identifier() -> String {
    STEP_DEFINITIONS[0].identifier()
}
