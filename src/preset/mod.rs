//! Scenario presets.
//!
//! A [`PresetCatalog`] holds the built-in workflow scenarios; the
//! [`IntentMatcher`] scores a free-text intent against it and picks one
//! deterministically (score descending, id ascending, `general` when nothing
//! matches).

mod catalog;
mod matcher;

pub use catalog::{PresetCatalog, Scenario, GENERAL_ID};
pub use matcher::{match_preset, IntentMatcher, MatchResult, ScenarioScore};
