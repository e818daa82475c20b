//! Course layout service.
//!
//! Ties the settings store, the section provider and the planner together.
//! This is the only place that writes a corrected column count back to the
//! store.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{DEFAULT_GUTTER_PERCENT, MAX_COLUMNS, MIN_COLUMNS};
use crate::models::{CourseDisplay, CourseId, CourseOutline, LayoutConfig, Orientation};
use crate::planner::{ColumnLayoutPlanner, LayoutResult};
use crate::services::sections::SectionProvider;
use crate::services::settings::{ResetScope, SettingsStore};

/// Partial settings change, applied before any requested reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// New column count
    #[serde(default)]
    pub columns: Option<i64>,
    /// New orientation
    #[serde(default)]
    pub orientation: Option<Orientation>,
    /// New course display
    #[serde(default)]
    pub course_display: Option<CourseDisplay>,
    /// Reset this course to the defaults after applying the change
    #[serde(default)]
    pub reset: bool,
    /// Reset every course to the defaults after applying the change
    #[serde(default)]
    pub reset_all: bool,
}

impl SettingsUpdate {
    /// Returns true if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_none()
            && self.orientation.is_none()
            && self.course_display.is_none()
            && !self.reset
            && !self.reset_all
    }

    /// Checks user-supplied values. Stored values are clamped instead.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(columns) = self.columns {
            if !(i64::from(MIN_COLUMNS)..=i64::from(MAX_COLUMNS)).contains(&columns) {
                return Err(format!(
                    "Columns must be between {MIN_COLUMNS} and {MAX_COLUMNS}, got {columns}"
                ));
            }
        }
        Ok(())
    }

    fn apply(&self, config: &mut LayoutConfig) {
        if let Some(columns) = self.columns {
            config.column_count = columns;
        }
        if let Some(orientation) = self.orientation {
            config.orientation = orientation;
        }
        if let Some(course_display) = self.course_display {
            config.course_display = course_display;
        }
    }
}

/// Planned layout of one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursePlan {
    /// Course identifier
    pub course: CourseId,
    /// Settings the layout was planned with, as stored
    pub settings: LayoutConfig,
    /// Planner output
    pub layout: LayoutResult,
    /// Whether a corrected column count was written back
    pub written_back: bool,
}

/// Plans an outline with explicit settings, without touching any store.
pub fn plan_outline(
    outline: &CourseOutline,
    settings: LayoutConfig,
    responsive: bool,
    gutter_percent: f64,
) -> Result<LayoutResult> {
    outline.validate()?;
    let planner = ColumnLayoutPlanner::new(settings)
        .with_declared_sections(outline.num_sections)
        .responsive(responsive)
        .with_gutter(gutter_percent);
    Ok(planner.plan(&outline.layout_sections())?)
}

/// Service composing settings storage, section provider and planner.
#[derive(Debug)]
pub struct CourseLayoutService<S, P> {
    store: S,
    provider: P,
    gutter_percent: f64,
}

impl<S: SettingsStore, P: SectionProvider> CourseLayoutService<S, P> {
    /// Creates a service over the given store and provider.
    pub fn new(store: S, provider: P) -> Self {
        Self {
            store,
            provider,
            gutter_percent: DEFAULT_GUTTER_PERCENT,
        }
    }

    /// Sets the vertical gutter in percent.
    #[must_use]
    pub fn with_gutter(mut self, gutter_percent: f64) -> Self {
        self.gutter_percent = gutter_percent;
        self
    }

    /// The settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The section provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Settings of a course, defaults if none are stored.
    pub fn settings(&self, course: CourseId) -> Result<LayoutConfig> {
        self.store.get(course)
    }

    /// Loads the outline of a course and plans its layout.
    pub fn plan_course(&self, course: CourseId) -> Result<CoursePlan> {
        let outline = self.provider.outline(course)?;
        self.plan(&outline, true)
    }

    /// Plans the layout of an outline using the stored settings of its course.
    ///
    /// With `write_back`, a stored column count outside 1-4 is replaced by
    /// the clamped value. The write is idempotent and a failure only logs a
    /// warning: the returned layout is valid either way.
    pub fn plan(&self, outline: &CourseOutline, write_back: bool) -> Result<CoursePlan> {
        let settings = self.store.get(outline.id)?;
        let responsive = self.store.defaults().responsive;
        let layout = plan_outline(outline, settings, responsive, self.gutter_percent)?;

        let mut written_back = false;
        if write_back && layout.clamp.out_of_range() {
            let corrected = LayoutConfig {
                column_count: layout.clamp.storable(),
                ..settings
            };
            match self.store.set(outline.id, &corrected) {
                Ok(()) => {
                    info!(
                        "Corrected stored column count of course {} from {} to {}",
                        outline.id, settings.column_count, corrected.column_count
                    );
                    written_back = true;
                }
                Err(e) => warn!(
                    "Failed to write back column count for course {}: {e:#}",
                    outline.id
                ),
            }
        }

        Ok(CoursePlan {
            course: outline.id,
            settings,
            layout,
            written_back,
        })
    }

    /// Applies a settings change, then any requested reset.
    ///
    /// The reset runs last so that it is not itself overwritten by the change.
    pub fn update_settings(&self, course: CourseId, update: &SettingsUpdate) -> Result<LayoutConfig> {
        update.validate().map_err(anyhow::Error::msg)?;

        let mut config = self.store.get(course)?;
        update.apply(&mut config);
        self.store.set(course, &config)?;

        if update.reset {
            self.store.reset(ResetScope::Course(course))?;
        }
        if update.reset_all {
            self.store.reset(ResetScope::All)?;
        }

        self.store.get(course)
    }

    /// Restores stored settings to the defaults.
    pub fn reset(&self, scope: ResetScope) -> Result<usize> {
        self.store.reset(scope)
    }

    /// Forgets the settings of a deleted course.
    pub fn delete(&self, course: CourseId) -> Result<bool> {
        self.store.delete(course)
    }
}
