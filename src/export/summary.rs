//! Markdown summary of a planned layout.

use std::fmt::Write as _;

use crate::export::LayoutRenderer;
use crate::models::{CourseOutline, LayoutConfig};
use crate::planner::{ClampBound, ColumnWidth, LayoutResult};

/// Renders a human-readable markdown overview of a layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSummaryRenderer;

impl LayoutRenderer for MarkdownSummaryRenderer {
    fn render(&self, outline: &CourseOutline, settings: &LayoutConfig, layout: &LayoutResult) -> String {
        generate_layout_summary(outline, settings, layout)
    }
}

/// Generates the markdown summary.
///
/// Lists the effective settings, then every column with its sections.
/// Hidden sections are marked, stealth sections are listed last.
pub fn generate_layout_summary(
    outline: &CourseOutline,
    settings: &LayoutConfig,
    layout: &LayoutResult,
) -> String {
    let mut output = String::new();

    let title = if outline.name.is_empty() {
        format!("Course {}", outline.id)
    } else {
        format!("{} (course {})", outline.name, outline.id)
    };
    let _ = writeln!(output, "# Layout: {title}\n");

    let _ = writeln!(output, "- **Columns:** {}", describe_columns(layout));
    let _ = writeln!(output, "- **Orientation:** {}", layout.orientation);
    let _ = writeln!(output, "- **Width:** {}", describe_width(layout.width));
    let _ = writeln!(output, "- **Course display:** {}", settings.course_display);
    output.push('\n');

    if layout.is_empty() {
        output.push_str("_No sections to lay out._\n");
    }

    for (i, column) in layout.columns().iter().enumerate() {
        let _ = writeln!(output, "## Column {}\n", i + 1);
        if column.is_empty() {
            output.push_str("_(empty)_\n\n");
            continue;
        }
        for placement in column {
            let name = outline
                .section(placement.section)
                .map_or_else(|| format!("Topic {}", placement.section), |s| s.display_name());
            let marker = if placement.shown { "" } else { " _(hidden)_" };
            let _ = writeln!(output, "- {}. {}{}", placement.section, name, marker);
        }
        output.push('\n');
    }

    if !layout.stealth.is_empty() {
        output.push_str("## Orphaned sections\n\n");
        for index in &layout.stealth {
            let name = outline
                .section(*index)
                .map_or_else(|| format!("Topic {index}"), |s| s.display_name());
            let _ = writeln!(output, "- {}. {}", index, name);
        }
        output.push('\n');
    }

    output
}

fn describe_columns(layout: &LayoutResult) -> String {
    let clamp = layout.clamp;
    match clamp.bound {
        None => clamp.effective.to_string(),
        Some(bound) => {
            let reason = match bound {
                ClampBound::SectionCount => "limited by section count",
                ClampBound::Maximum => "above maximum",
                ClampBound::Minimum => "below minimum",
            };
            format!("{} (requested {}, {})", clamp.effective, clamp.requested, reason)
        }
    }
}

fn describe_width(width: ColumnWidth) -> String {
    match width {
        ColumnWidth::Container(pct) => format!("{pct:.2}% per column"),
        ColumnWidth::PerSection(pct) => format!("{pct:.2}% per section"),
        ColumnWidth::Bucket(columns) => format!("class `cn-col-{columns}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Orientation, Section};
    use crate::services::plan_outline;

    #[test]
    fn test_summary_lists_columns() {
        let mut outline = CourseOutline::with_visible_sections(9, 4);
        outline.name = "Biology".to_string();
        outline.sections[3] = Section::hidden(3);
        let settings = LayoutConfig::new(2, Orientation::Vertical);
        let layout = plan_outline(&outline, settings, false, 1.0).unwrap();

        let summary = generate_layout_summary(&outline, &settings, &layout);
        assert!(summary.contains("# Layout: Biology (course 9)"));
        assert!(summary.contains("## Column 1"));
        assert!(summary.contains("## Column 2"));
        assert!(summary.contains("3. Topic 3 _(hidden)_"));
        assert!(summary.contains("49.00% per column"));
    }

    #[test]
    fn test_summary_reports_clamp() {
        let outline = CourseOutline::with_visible_sections(1, 2);
        let settings = LayoutConfig::new(4, Orientation::Horizontal);
        let layout = plan_outline(&outline, settings, false, 1.0).unwrap();

        let summary = generate_layout_summary(&outline, &settings, &layout);
        assert!(summary.contains("2 (requested 4, limited by section count)"));
        assert!(summary.contains("class `cn-col-2`"));
    }

    #[test]
    fn test_summary_empty_course() {
        let outline = CourseOutline::with_visible_sections(1, 0);
        let settings = LayoutConfig::new(2, Orientation::Vertical);
        let layout = plan_outline(&outline, settings, false, 1.0).unwrap();

        let summary = generate_layout_summary(&outline, &settings, &layout);
        assert!(summary.contains("No sections to lay out"));
    }
}
