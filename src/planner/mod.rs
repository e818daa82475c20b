//! Column layout planning for course sections.
//!
//! Given the non-general sections of a course and its [`LayoutConfig`], the
//! planner decides how many columns to use, how wide they are and which
//! column each section goes into. It is a pure computation: no I/O, no
//! shared state, safe to call from any number of threads.

pub mod clamp;

use serde::Serialize;
use tracing::debug;

use crate::constants::DEFAULT_GUTTER_PERCENT;
use crate::models::{LayoutConfig, Orientation, Section, GENERAL_SECTION};

pub use clamp::{clamp_columns, ClampBound, ClampOutcome};

/// Width assignment for the rendered columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Percentage width of each vertical column container
    Container(f64),
    /// Percentage width of each section in a responsive horizontal layout
    PerSection(f64),
    /// Non-responsive horizontal layout: width comes from a CSS class bucket
    Bucket(u32),
}

impl ColumnWidth {
    /// Returns the percentage, if the width is expressed as one.
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        match self {
            Self::Container(pct) | Self::PerSection(pct) => Some(*pct),
            Self::Bucket(_) => None,
        }
    }

    /// Returns the CSS class carrying the width for bucketed layouts.
    #[must_use]
    pub fn css_class(&self) -> Option<String> {
        match self {
            Self::Bucket(columns) => Some(format!("cn-col-{columns}")),
            _ => None,
        }
    }
}

/// Computes the column width for an effective column count.
///
/// A single vertical column keeps the full width; the gutter is only
/// reserved when columns sit side by side.
#[must_use]
pub fn column_width(
    orientation: Orientation,
    effective: u32,
    responsive: bool,
    gutter_percent: f64,
) -> ColumnWidth {
    let share = 100.0 / f64::from(effective.max(1));
    match orientation {
        Orientation::Vertical if effective > 1 => {
            ColumnWidth::Container((share - gutter_percent).max(0.0))
        }
        Orientation::Vertical => ColumnWidth::Container(100.0),
        Orientation::Horizontal if responsive => ColumnWidth::PerSection(share),
        Orientation::Horizontal => ColumnWidth::Bucket(effective.max(1)),
    }
}

/// Column assignment of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Section index
    pub section: u32,
    /// Column number, starting at 1
    pub column: u32,
    /// Whether the section counted as shown when breakpoints were decided
    pub shown: bool,
}

/// Output of [`ColumnLayoutPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    /// How the configured column count was clamped
    pub clamp: ClampOutcome,
    /// Orientation the layout was planned for
    pub orientation: Orientation,
    /// Width of each column or section
    pub width: ColumnWidth,
    /// One entry per laid-out section, in index order
    pub placements: Vec<Placement>,
    /// Number of column containers to open. Can exceed the last column that
    /// received a section when the final breakpoint falls on the last section.
    pub opened_columns: u32,
    /// Sections beyond the declared section count, rendered after the columns
    pub stealth: Vec<u32>,
}

impl LayoutResult {
    /// Number of columns the layout uses after clamping.
    #[must_use]
    pub fn effective_columns(&self) -> u32 {
        self.clamp.effective
    }

    /// Returns true if no section was laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns the column a section was assigned to.
    #[must_use]
    pub fn column_of(&self, section: u32) -> Option<u32> {
        self.placements
            .iter()
            .find(|p| p.section == section)
            .map(|p| p.column)
    }

    /// Groups placements by column; one entry per opened column.
    #[must_use]
    pub fn columns(&self) -> Vec<Vec<Placement>> {
        let mut columns = vec![Vec::new(); self.opened_columns as usize];
        for placement in &self.placements {
            if let Some(column) = columns.get_mut(placement.column as usize - 1) {
                column.push(*placement);
            }
        }
        columns
    }
}

/// Rejected planner input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The section list cannot be laid out as given
    InvalidArgument(String),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Plans the column layout of a course.
///
/// # Example
///
/// ```
/// use course_columns::models::{LayoutConfig, Orientation, Section};
/// use course_columns::planner::ColumnLayoutPlanner;
///
/// let sections: Vec<Section> = (1..=9).map(Section::new).collect();
/// let planner = ColumnLayoutPlanner::new(LayoutConfig::new(3, Orientation::Vertical));
/// let result = planner.plan(&sections)?;
/// assert_eq!(result.column_of(4), Some(2));
/// # Ok::<(), course_columns::planner::LayoutError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayoutPlanner {
    config: LayoutConfig,
    declared_sections: Option<u32>,
    responsive: bool,
    gutter_percent: f64,
}

impl ColumnLayoutPlanner {
    /// Creates a planner for the given settings.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            declared_sections: None,
            responsive: false,
            gutter_percent: DEFAULT_GUTTER_PERCENT,
        }
    }

    /// Sets the declared section count; sections above it are stealth.
    #[must_use]
    pub fn with_declared_sections(mut self, count: u32) -> Self {
        self.declared_sections = Some(count);
        self
    }

    /// Enables per-section percentage widths for horizontal layouts.
    #[must_use]
    pub fn responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Sets the vertical gutter in percent. Negative or non-finite values become 0.
    #[must_use]
    pub fn with_gutter(mut self, gutter_percent: f64) -> Self {
        self.gutter_percent = if gutter_percent.is_finite() {
            gutter_percent.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Settings the planner was created with.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Plans the layout of `sections`, which must exclude the general section
    /// and be in strictly ascending index order.
    pub fn plan(&self, sections: &[Section]) -> Result<LayoutResult, LayoutError> {
        validate_sections(sections)?;

        let (laid_out, stealth): (Vec<&Section>, Vec<&Section>) = sections
            .iter()
            .partition(|s| self.declared_sections.map_or(true, |n| s.index <= n));
        let stealth: Vec<u32> = stealth.iter().map(|s| s.index).collect();

        let clamp = clamp_columns(self.config.column_count, laid_out.len());
        if clamp.adjusted() {
            debug!(
                "Clamped column count {} to {} ({:?})",
                clamp.requested, clamp.effective, clamp.bound
            );
        }

        let orientation = self.config.orientation;
        let width = column_width(orientation, clamp.effective, self.responsive, self.gutter_percent);

        if laid_out.is_empty() {
            return Ok(LayoutResult {
                clamp,
                orientation,
                width,
                placements: Vec::new(),
                opened_columns: 0,
                stealth,
            });
        }

        // Declared sections without a record still take a vertical slot.
        let slots = self
            .declared_sections
            .map_or(laid_out.len(), |n| (n as usize).max(laid_out.len()));
        let (placements, opened_columns) =
            assign_columns(&laid_out, slots, clamp.effective, orientation);

        Ok(LayoutResult {
            clamp,
            orientation,
            width,
            placements,
            opened_columns,
            stealth,
        })
    }
}

fn validate_sections(sections: &[Section]) -> Result<(), LayoutError> {
    if sections.iter().any(|s| s.index == GENERAL_SECTION) {
        return Err(LayoutError::InvalidArgument(
            "the general section cannot be laid out in columns".to_string(),
        ));
    }
    if let Some(pair) = sections.windows(2).find(|w| w[0].index >= w[1].index) {
        return Err(LayoutError::InvalidArgument(format!(
            "section {} follows section {}; indices must be strictly ascending",
            pair[1].index, pair[0].index
        )));
    }
    Ok(())
}

/// Walks the sections, moving to the next column whenever the running count
/// of shown sections reaches the breakpoint.
///
/// Vertical layouts advance the breakpoint by `slots / columns` where `slots`
/// counts every declared section, hidden or missing, so each keeps its
/// positional slot. Horizontal layouts advance it by the column count, and
/// rows stop splitting at the last column, which takes the remainder.
fn assign_columns(
    sections: &[&Section],
    slots: usize,
    columns: u32,
    orientation: Orientation,
) -> (Vec<Placement>, u32) {
    if columns <= 1 {
        let placements = sections
            .iter()
            .map(|s| Placement {
                section: s.index,
                column: 1,
                shown: s.is_shown(),
            })
            .collect();
        return (placements, 1);
    }

    let step = match orientation {
        Orientation::Vertical => slots as f64 / f64::from(columns),
        Orientation::Horizontal => f64::from(columns),
    };

    let mut placements = Vec::with_capacity(sections.len());
    let mut column = 1;
    let mut shown_count = 0u32;
    let mut breakpoint: Option<f64> = None;

    for section in sections {
        let shown = section.is_shown();
        placements.push(Placement {
            section: section.index,
            column,
            shown,
        });
        if shown {
            shown_count += 1;
        }

        let current = match breakpoint {
            Some(bp) => bp,
            None if shown => {
                let bp = f64::from(shown_count) + step - 1.0;
                breakpoint = Some(bp);
                bp
            }
            None => continue,
        };

        if f64::from(shown_count) >= current && column < columns {
            column += 1;
            breakpoint = Some(current + step);
        }
    }

    (placements, column)
}
