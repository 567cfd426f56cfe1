//! Core types shared across DevFlow.
//!
//! This module contains the fundamental data structures used throughout
//! the application: the workspace layout, the fixed step table, the on-disk
//! records, configuration and the error type.

mod config;
mod error;
mod paths;
mod state;
mod steps;

pub use config::{Config, ReviewConfig, TemplateConfig, DEFAULT_IGNORE_DIRS, LOCAL_CONFIG_FILE};
pub use error::{DevflowError, Result};
pub use paths::{
    file_stamp, now_iso, WorkspacePaths, DEVFLOW_DIR, QUEUE_KEEP_MARKER, STEPS_KEEP_MARKER,
};
pub use state::{
    read_json_lenient, write_json, Metrics, PresetRecord, PresetSummary, SessionState,
    BUILD_STATUS_OK, INITIAL_GUIDANCE_PROMPT,
};
pub use steps::{find_step, first_step_identifier, StepDefinition, STEP_DEFINITIONS};
