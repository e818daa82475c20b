//! Rendering of planned layouts.
//!
//! The planner has no opinion on markup; renderers consume its output.

pub mod html;
pub mod summary;

use crate::models::{CourseOutline, LayoutConfig};
use crate::planner::LayoutResult;

pub use html::HtmlColumnsRenderer;
pub use summary::{generate_layout_summary, MarkdownSummaryRenderer};

/// Turns a planned layout into text.
pub trait LayoutRenderer {
    /// Renders `layout`, planned from `outline` with `settings`.
    fn render(&self, outline: &CourseOutline, settings: &LayoutConfig, layout: &LayoutResult) -> String;
}
