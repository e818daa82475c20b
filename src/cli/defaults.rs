//! Site-wide default commands.

use crate::cli::common::{load_config, CliError, CliResult};
use crate::config::Config;
use crate::constants::{APP_NAME, MAX_COLUMNS, MIN_COLUMNS};
use crate::models::{CourseDisplay, Orientation};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

/// Site-wide defaults for new courses
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    #[command(subcommand)]
    command: DefaultsCommand,
}

#[derive(Subcommand, Debug)]
enum DefaultsCommand {
    /// Display the site defaults
    Show(DefaultsShowArgs),
    /// Change the site defaults
    Set(DefaultsSetArgs),
}

/// Display the site defaults
#[derive(Args, Debug)]
pub struct DefaultsShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// On/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    /// Enabled
    On,
    /// Disabled
    Off,
}

/// Change the site defaults
#[derive(Args, Debug)]
pub struct DefaultsSetArgs {
    /// Default number of columns (1-4)
    #[arg(long, value_name = "N")]
    columns: Option<i64>,

    /// Default orientation (vertical or horizontal)
    #[arg(long, value_name = "ORIENTATION")]
    orientation: Option<Orientation>,

    /// Default course display (single or multi)
    #[arg(long, value_name = "DISPLAY")]
    display: Option<CourseDisplay>,

    /// Percentage widths for horizontal layouts
    #[arg(long, value_enum)]
    responsive: Option<Toggle>,
}

/// JSON-serializable defaults for output
#[derive(Serialize, Debug)]
struct DefaultsOutput {
    columns: i64,
    orientation: Orientation,
    course_display: CourseDisplay,
    responsive: bool,
    data_dir: String,
}

impl DefaultsArgs {
    /// Execute defaults subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            DefaultsCommand::Show(args) => args.execute(),
            DefaultsCommand::Set(args) => args.execute(),
        }
    }
}

impl DefaultsShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let data_dir = config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to locate data directory: {e:#}")))?;

        if self.json {
            let output = DefaultsOutput {
                columns: config.defaults.columns,
                orientation: config.defaults.orientation,
                course_display: config.defaults.course_display,
                responsive: config.defaults.responsive,
                data_dir: data_dir.display().to_string(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize defaults to JSON: {e}")))?;
            println!("{json}");
        } else {
            let title = format!("{APP_NAME} Defaults");
            println!("{title}");
            println!("{}", "=".repeat(title.len()));
            println!();
            println!("  Columns:        {}", config.defaults.columns);
            println!("  Orientation:    {}", config.defaults.orientation);
            println!("  Course display: {}", config.defaults.course_display);
            println!(
                "  Responsive:     {}",
                if config.defaults.responsive { "on" } else { "off" }
            );
            println!("  Data directory: {}", data_dir.display());
        }
        Ok(())
    }
}

impl DefaultsSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.columns.is_none()
            && self.orientation.is_none()
            && self.display.is_none()
            && self.responsive.is_none()
        {
            return Err(CliError::validation(
                "At least one option must be specified: --columns, --orientation, --display or --responsive",
            ));
        }

        if let Some(columns) = self.columns {
            if !(i64::from(MIN_COLUMNS)..=i64::from(MAX_COLUMNS)).contains(&columns) {
                return Err(CliError::validation(format!(
                    "Columns must be between {MIN_COLUMNS} and {MAX_COLUMNS}, got {columns}"
                )));
            }
        }

        // Invalid values may be repaired here, so only the syntax must be sound
        let mut config = Config::load_unvalidated()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(columns) = self.columns {
            config.defaults.columns = columns;
        }
        if let Some(orientation) = self.orientation {
            config.defaults.orientation = orientation;
        }
        if let Some(display) = self.display {
            config.defaults.course_display = display;
        }
        if let Some(responsive) = self.responsive {
            config.defaults.responsive = responsive == Toggle::On;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Defaults updated successfully.");
        Ok(())
    }
}
