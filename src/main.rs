//! Course Columns - column layout planner for course sections
//!
//! Plans how the topic sections of a course are distributed over columns,
//! manages per-course layout settings and renders the resulting layout.

use clap::{Parser, Subcommand};
use course_columns::cli::{DefaultsArgs, ExitCode, PlanArgs, RenderArgs, SettingsArgs};
use tracing_subscriber::EnvFilter;

/// Course Columns - column layout planner for course sections
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the column layout of a course outline
    Plan(PlanArgs),
    /// Manage per-course layout settings
    Settings(SettingsArgs),
    /// Manage the site-wide defaults
    Defaults(DefaultsArgs),
    /// Render a course layout as HTML or markdown
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let result = match &cli.command {
        Command::Plan(args) => args.execute(),
        Command::Settings(args) => args.execute(),
        Command::Defaults(args) => args.execute(),
        Command::Render(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success as i32),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code() as i32);
        }
    }
}
