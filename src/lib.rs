#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::cast_possible_truncation)]

//! # DevFlow
//!
//! Scaffolding and bookkeeping for a seven-step, assistant-driven development
//! workflow: requirements, API contract, plan, todos, implementation, build
//! check and summary.
//!
//! ## Features
//!
//! - **Setup**: copies the `.devflow` template into a project without
//!   clobbering files the user already edited
//! - **Wizard**: classifies a free-text intent into a workflow scenario
//! - **Review**: reports which step artifacts exist, what to do next and which
//!   checks to run
//! - **Cleanup**: archives the current session and resets its records
//! - **Build check**: runs the typecheck/build/lint chain of every detected
//!   toolchain
//!
//! ## Quick Start
//!
//! ```bash
//! # Scaffold the current directory
//! devflow
//!
//! # Pick a scenario
//! devflow wizard "fix the login bug and add tests"
//!
//! # See where the session stands
//! devflow review
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::use_self)]

pub mod build;
pub mod core;
pub mod git;
pub mod init;
pub mod preset;
pub mod review;
pub mod scanner;
pub mod workflow;

// Re-export commonly used types
pub use core::{Config, DevflowError, Result, SessionState, WorkspacePaths};
pub use preset::{match_preset, MatchResult, PresetCatalog};
pub use review::ReviewReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "devflow";
