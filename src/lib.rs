//! Course Columns Library
//!
//! This library provides the core of the Course Columns tools: the column
//! layout planner for course sections, per-course settings storage, course
//! outline loading and HTML/markdown rendering of planned layouts.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod planner;
pub mod services;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use models::{CourseOutline, LayoutConfig, Orientation, Section};
pub use planner::{ColumnLayoutPlanner, LayoutError, LayoutResult};
