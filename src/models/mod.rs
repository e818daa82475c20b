//! Data models for course sections and layout settings.

pub mod course;
pub mod section;
pub mod settings;

// Re-export commonly used types
pub use course::{CourseOutline, HiddenSections};
pub use section::{Section, GENERAL_SECTION};
pub use settings::{CourseDisplay, CourseId, LayoutConfig, Orientation, StoredLayout};
