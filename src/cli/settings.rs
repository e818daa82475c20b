//! Per-course settings commands.

use crate::cli::common::{load_config, open_outlines, open_store, CliError, CliResult};
use crate::models::{CourseDisplay, CourseId, LayoutConfig, Orientation};
use crate::services::{CourseLayoutService, ResetScope, SettingsStore, SettingsUpdate};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Per-course layout settings
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    command: SettingsCommand,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Display the settings of a course
    Show(SettingsShowArgs),
    /// Change the settings of a course
    Set(SettingsSetArgs),
    /// Restore settings to the site defaults
    Reset(SettingsResetArgs),
    /// Remove the settings of a deleted course
    Delete(SettingsDeleteArgs),
}

/// Display the settings of a course
#[derive(Args, Debug)]
pub struct SettingsShowArgs {
    /// Course id
    #[arg(long, value_name = "ID")]
    course: CourseId,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Change the settings of a course
#[derive(Args, Debug)]
pub struct SettingsSetArgs {
    /// Course id
    #[arg(long, value_name = "ID")]
    course: CourseId,

    /// Number of columns (1-4)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    columns: Option<i64>,

    /// Column orientation (vertical or horizontal)
    #[arg(long, value_name = "ORIENTATION")]
    orientation: Option<Orientation>,

    /// Course display (single or multi)
    #[arg(long, value_name = "DISPLAY")]
    display: Option<CourseDisplay>,

    /// Reset this course to the defaults after applying the change
    #[arg(long)]
    reset: bool,

    /// Reset every course to the defaults after applying the change
    #[arg(long)]
    reset_all: bool,
}

/// Restore settings to the site defaults
#[derive(Args, Debug)]
pub struct SettingsResetArgs {
    /// Course id
    #[arg(long, value_name = "ID", conflicts_with = "all", required_unless_present = "all")]
    course: Option<CourseId>,

    /// Reset every course
    #[arg(long)]
    all: bool,
}

/// Remove the settings of a deleted course
#[derive(Args, Debug)]
pub struct SettingsDeleteArgs {
    /// Course id
    #[arg(long, value_name = "ID")]
    course: CourseId,
}

/// JSON-serializable settings for output
#[derive(Serialize, Debug)]
struct SettingsOutput {
    course: CourseId,
    stored: bool,
    columns: i64,
    orientation: Orientation,
    course_display: CourseDisplay,
}

impl SettingsArgs {
    /// Execute settings subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            SettingsCommand::Show(args) => args.execute(),
            SettingsCommand::Set(args) => args.execute(),
            SettingsCommand::Reset(args) => args.execute(),
            SettingsCommand::Delete(args) => args.execute(),
        }
    }
}

impl SettingsShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let store = open_store(&config)?;

        let stored = store
            .stored(self.course)
            .map_err(|e| CliError::io(format!("Failed to read settings: {e:#}")))?;
        let settings = stored.unwrap_or_else(|| store.defaults().layout_config());

        if self.json {
            output_json(self.course, stored.is_some(), &settings)?;
        } else {
            output_human_readable(self.course, stored.is_some(), &settings);
        }
        Ok(())
    }
}

impl SettingsSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let update = SettingsUpdate {
            columns: self.columns,
            orientation: self.orientation,
            course_display: self.display,
            reset: self.reset,
            reset_all: self.reset_all,
        };

        if update.is_empty() {
            return Err(CliError::validation(
                "At least one option must be specified: --columns, --orientation, --display, --reset or --reset-all",
            ));
        }
        update.validate().map_err(CliError::validation)?;

        let config = load_config()?;
        let store = open_store(&config)?;
        let service = CourseLayoutService::new(store, open_outlines(&config)?);

        let settings = service
            .update_settings(self.course, &update)
            .map_err(|e| CliError::io(format!("Failed to save settings: {e:#}")))?;

        println!(
            "Course {} updated: {} column(s), {}, {} page.",
            self.course, settings.column_count, settings.orientation, settings.course_display
        );
        Ok(())
    }
}

impl SettingsResetArgs {
    /// Execute reset command
    pub fn execute(&self) -> CliResult<()> {
        let scope = match (self.course, self.all) {
            (_, true) => ResetScope::All,
            (Some(course), false) => ResetScope::Course(course),
            (None, false) => return Err(CliError::validation("Specify --course ID or --all")),
        };

        let config = load_config()?;
        let store = open_store(&config)?;
        let count = store
            .reset(scope)
            .map_err(|e| CliError::io(format!("Failed to reset settings: {e:#}")))?;

        println!("Reset {count} course(s) to the default layout.");
        Ok(())
    }
}

impl SettingsDeleteArgs {
    /// Execute delete command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let store = open_store(&config)?;
        let removed = store
            .delete(self.course)
            .map_err(|e| CliError::io(format!("Failed to delete settings: {e:#}")))?;

        if removed {
            println!("Removed settings of course {}.", self.course);
        } else {
            println!("Course {} had no stored settings.", self.course);
        }
        Ok(())
    }
}

fn output_json(course: CourseId, stored: bool, settings: &LayoutConfig) -> CliResult<()> {
    let output = SettingsOutput {
        course,
        stored,
        columns: settings.column_count,
        orientation: settings.orientation,
        course_display: settings.course_display,
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize settings to JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

fn output_human_readable(course: CourseId, stored: bool, settings: &LayoutConfig) {
    println!("Course {course} Layout");
    println!("====================");
    println!();
    if !stored {
        println!("(no stored settings, showing site defaults)");
        println!();
    }
    println!("  Columns:        {}", settings.column_count);
    println!("  Orientation:    {}", settings.orientation);
    println!("  Course display: {}", settings.course_display);
}
