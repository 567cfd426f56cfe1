//! Session workflow commands.
//!
//! - [`run_wizard`] classifies an intent and writes `.devflow/preset.json`
//! - [`cleanup_project`] archives step artifacts and resets the session

mod cleanup;
mod wizard;

pub use cleanup::{cleanup_project, CleanupOptions, CleanupSummary};
pub use wizard::{preset_record, read_intent, run_wizard};
