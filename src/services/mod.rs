//! Service layer for business logic.
//!
//! This module contains the collaborators around the planner: settings
//! storage, course outline loading, and the service that coordinates them.

pub mod layout;
pub mod sections;
pub mod settings;

// Re-export commonly used types and functions
pub use layout::{plan_outline, CourseLayoutService, CoursePlan, SettingsUpdate};
pub use sections::{load_outline, OutlineDirectory, SectionProvider};
pub use settings::{FileSettingsStore, MemorySettingsStore, ResetScope, SettingsStore};
