//! Plan command: compute the column layout of a course outline.

use crate::cli::common::{
    load_config, open_outlines, open_store, resolve_outline, CliError, CliResult,
};
use crate::constants::DEFAULT_GUTTER_PERCENT;
use crate::export::generate_layout_summary;
use crate::models::{CourseId, Orientation};
use crate::services::{plan_outline, CourseLayoutService, CoursePlan, SettingsStore};
use clap::Args;
use std::path::PathBuf;

/// Compute the column layout of a course outline
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Course outline file (JSON or YAML)
    #[arg(short, long, value_name = "FILE", required_unless_present = "course")]
    pub outline: Option<PathBuf>,

    /// Course id; loads `<id>.json` from the data directory when no file is given
    #[arg(long, value_name = "ID")]
    pub course: Option<CourseId>,

    /// Try a column count instead of the stored one (nothing is saved)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub columns: Option<i64>,

    /// Try an orientation instead of the stored one (nothing is saved)
    #[arg(long, value_name = "vertical|horizontal")]
    pub orientation: Option<Orientation>,

    /// Do not write a corrected column count back to the settings
    #[arg(long)]
    pub no_write_back: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    /// Execute the plan command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let outline = resolve_outline(&config, self.outline.as_deref(), self.course)?;
        let service = CourseLayoutService::new(open_store(&config)?, open_outlines(&config)?);

        let plan = if self.columns.is_some() || self.orientation.is_some() {
            let mut settings = service
                .settings(outline.id)
                .map_err(|e| CliError::io(format!("Failed to read settings: {e:#}")))?;
            if let Some(columns) = self.columns {
                settings.column_count = columns;
            }
            if let Some(orientation) = self.orientation {
                settings.orientation = orientation;
            }
            let responsive = service.store().defaults().responsive;
            let layout = plan_outline(&outline, settings, responsive, DEFAULT_GUTTER_PERCENT)
                .map_err(|e| CliError::validation(format!("Failed to plan layout: {e:#}")))?;
            CoursePlan {
                course: outline.id,
                settings,
                layout,
                written_back: false,
            }
        } else {
            service
                .plan(&outline, !self.no_write_back)
                .map_err(|e| CliError::validation(format!("Failed to plan layout: {e:#}")))?
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&plan)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print!("{}", generate_layout_summary(&outline, &plan.settings, &plan.layout));
            if plan.written_back {
                println!(
                    "Stored column count corrected to {}.",
                    plan.layout.clamp.storable()
                );
            }
        }

        Ok(())
    }
}
