//! CLI command handlers for course-columns.
//!
//! This module provides headless, scriptable access to layout planning and
//! settings management for automation and testing.

pub mod common;
pub mod defaults;
pub mod plan;
pub mod render;
pub mod settings;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use defaults::DefaultsArgs;
pub use plan::PlanArgs;
pub use render::RenderArgs;
pub use settings::SettingsArgs;
