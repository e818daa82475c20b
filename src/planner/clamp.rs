//! Column count clamping.

use serde::Serialize;

use crate::constants::{MAX_COLUMNS, MIN_COLUMNS};

/// The rule that changed a requested column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampBound {
    /// Fewer sections than requested columns
    SectionCount,
    /// Above the supported maximum
    Maximum,
    /// Below the supported minimum
    Minimum,
}

/// Result of clamping a requested column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClampOutcome {
    /// Column count as stored in the settings
    pub requested: i64,
    /// Column count actually used for the layout
    pub effective: u32,
    /// The last rule that changed the value, `None` if unchanged
    pub bound: Option<ClampBound>,
}

impl ClampOutcome {
    /// Returns true if clamping changed the requested value.
    #[must_use]
    pub fn adjusted(&self) -> bool {
        self.bound.is_some()
    }

    /// Returns true if the stored value lies outside the supported range,
    /// independent of the current section count.
    ///
    /// Only such values are worth writing back: a count reduced because the
    /// course has few sections becomes valid again once sections are added.
    #[must_use]
    pub fn out_of_range(&self) -> bool {
        !(i64::from(MIN_COLUMNS)..=i64::from(MAX_COLUMNS)).contains(&self.requested)
    }

    /// The value a settings store should persist for an out-of-range request.
    #[must_use]
    pub fn storable(&self) -> i64 {
        self.requested
            .clamp(i64::from(MIN_COLUMNS), i64::from(MAX_COLUMNS))
    }
}

/// Clamps a requested column count against the section count and the
/// supported 1-4 range.
///
/// The section-count bound only applies when there is at least one section.
/// Applying the clamp to its own output yields the same value.
#[must_use]
pub fn clamp_columns(requested: i64, section_count: usize) -> ClampOutcome {
    let mut effective = requested;
    let mut bound = None;

    if section_count > 0 {
        let sections = i64::try_from(section_count).unwrap_or(i64::MAX);
        if effective > sections {
            effective = sections;
            bound = Some(ClampBound::SectionCount);
        }
    }
    if effective > i64::from(MAX_COLUMNS) {
        effective = i64::from(MAX_COLUMNS);
        bound = Some(ClampBound::Maximum);
    }
    if effective < i64::from(MIN_COLUMNS) {
        effective = i64::from(MIN_COLUMNS);
        bound = Some(ClampBound::Minimum);
    }

    ClampOutcome {
        requested,
        effective: effective as u32,
        bound,
    }
}
