//! HTML fragment renderer for column layouts.
//!
//! Emits the general section in its own full-width list, one list per opened
//! column, and stealth sections after the columns. Activity content is the
//! host's business; only section headers and summaries are rendered.

use std::fmt::Write as _;

use crate::export::LayoutRenderer;
use crate::models::{CourseDisplay, CourseOutline, HiddenSections, LayoutConfig, Section};
use crate::planner::{ColumnWidth, LayoutResult, Placement};

/// Renders a layout as nested `<ul>` column containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlColumnsRenderer;

impl LayoutRenderer for HtmlColumnsRenderer {
    fn render(&self, outline: &CourseOutline, settings: &LayoutConfig, layout: &LayoutResult) -> String {
        let mut out = String::new();

        if let Some(general) = outline.general() {
            out.push_str("<ul class=\"cntopics\">\n");
            push_section(&mut out, general, settings.course_display, None, &[]);
            out.push_str("</ul>\n");
        }

        for column in layout.columns() {
            let _ = writeln!(out, "{}", column_start(layout.width));
            for placement in &column {
                push_placement(&mut out, outline, settings, layout.width, placement);
            }
            out.push_str("</ul>\n");
        }

        if !layout.stealth.is_empty() {
            out.push_str("<ul class=\"cntopics stealth\">\n");
            for index in &layout.stealth {
                if let Some(section) = outline.section(*index) {
                    push_section(&mut out, section, CourseDisplay::Single, None, &["orphaned", "hidden"]);
                }
            }
            out.push_str("</ul>\n");
        }

        out
    }
}

fn column_start(width: ColumnWidth) -> String {
    match width {
        ColumnWidth::Container(pct) => format!(
            "<ul class=\"cntopics topics\" style=\"width:{}%; float:left;\">",
            format_percent(pct)
        ),
        ColumnWidth::PerSection(_) => "<ul class=\"cntopics topics cn-horizontal\">".to_string(),
        ColumnWidth::Bucket(columns) => {
            format!("<ul class=\"cntopics topics cn-horizontal cn-col-{columns}\">")
        }
    }
}

fn push_placement(
    out: &mut String,
    outline: &CourseOutline,
    settings: &LayoutConfig,
    width: ColumnWidth,
    placement: &Placement,
) {
    let Some(section) = outline.section(placement.section) else {
        return;
    };
    let item_width = match width {
        ColumnWidth::PerSection(pct) => Some(pct),
        _ => None,
    };

    if placement.shown {
        let extra: &[&str] = if section.available { &[] } else { &["restricted"] };
        push_section(out, section, settings.course_display, item_width, extra);
    } else if outline.hidden_sections == HiddenSections::Collapsed && !section.visible {
        push_placeholder(out, section, item_width);
    }
}

fn item_open(out: &mut String, index: u32, classes: &[&str], width: Option<f64>) {
    let mut class = String::from("section main clearfix");
    for extra in classes {
        class.push(' ');
        class.push_str(extra);
    }
    let _ = write!(out, "<li id=\"section-{index}\" class=\"{class}\"");
    if let Some(pct) = width {
        let _ = write!(out, " style=\"width:{}%;\"", format_percent(pct));
    }
    out.push('>');
}

fn push_section(
    out: &mut String,
    section: &Section,
    display: CourseDisplay,
    width: Option<f64>,
    classes: &[&str],
) {
    item_open(out, section.index, classes, width);
    let _ = write!(
        out,
        "<h3 class=\"sectionname\">{}</h3>",
        escape_html(&section.display_name())
    );
    // Multi-page courses link to the section page and show only the summary.
    if display == CourseDisplay::Multi && !section.is_general() {
        if let Some(summary) = &section.summary {
            let _ = write!(out, "<div class=\"summary\">{}</div>", escape_html(summary));
        }
    }
    out.push_str("</li>\n");
}

fn push_placeholder(out: &mut String, section: &Section, width: Option<f64>) {
    item_open(out, section.index, &["hidden"], width);
    let _ = write!(
        out,
        "<h3 class=\"sectionname dimmed_text\">{}</h3><div class=\"content\">Not available</div>",
        escape_html(&section.display_name())
    );
    out.push_str("</li>\n");
}

/// Formats a percentage without trailing zeros (`33.333`, `49`).
fn format_percent(pct: f64) -> String {
    let text = format!("{pct:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Escapes text for inclusion in HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
