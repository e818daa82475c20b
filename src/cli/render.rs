//! Render command: write the layout of a course as HTML or markdown.

use crate::cli::common::{
    load_config, open_outlines, open_store, resolve_outline, CliError, CliResult,
};
use crate::export::{HtmlColumnsRenderer, LayoutRenderer, MarkdownSummaryRenderer};
use crate::models::CourseId;
use crate::services::CourseLayoutService;
use clap::{Args, ValueEnum};
use std::fs;
use std::path::PathBuf;

/// Output format of the render command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Column container fragment
    Html,
    /// Readable overview
    Markdown,
}

/// Render the column layout of a course outline
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Course outline file (JSON or YAML)
    #[arg(short, long, value_name = "FILE", required_unless_present = "course")]
    pub outline: Option<PathBuf>,

    /// Course id; loads `<id>.json` from the data directory when no file is given
    #[arg(long, value_name = "ID")]
    pub course: Option<CourseId>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    pub format: RenderFormat,

    /// Write to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let outline = resolve_outline(&config, self.outline.as_deref(), self.course)?;
        let service = CourseLayoutService::new(open_store(&config)?, open_outlines(&config)?);
        let plan = service
            .plan(&outline, true)
            .map_err(|e| CliError::validation(format!("Failed to plan layout: {e:#}")))?;

        let renderer: &dyn LayoutRenderer = match self.format {
            RenderFormat::Html => &HtmlColumnsRenderer,
            RenderFormat::Markdown => &MarkdownSummaryRenderer,
        };
        let rendered = renderer.render(&outline, &plan.settings, &plan.layout);

        match &self.output {
            Some(path) => {
                fs::write(path, &rendered).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!("Layout written to {}", path.display());
            }
            None => print!("{rendered}"),
        }

        Ok(())
    }
}
