//! Course Columns Web Server Binary
//!
//! This binary starts the Course Columns web server that provides a REST API
//! for course layouts and per-course layout settings.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3002, outlines from the data directory)
//! course-columns-web
//!
//! # Specify port and outline directory
//! course-columns-web --port 8080 --workspace ~/course-outlines
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_columns::config::Config;
use course_columns::web;

/// Course Columns Web Server - REST API for course layouts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3002")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory containing `<course id>.json` or `.yaml` outlines.
    /// Defaults to the configured data directory.
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load configuration")?;

    let outlines_root = match args.workspace {
        Some(path) => path,
        None => config.data_dir()?,
    };
    if !outlines_root.exists() {
        std::fs::create_dir_all(&outlines_root).with_context(|| {
            format!(
                "Failed to create outline directory: {}",
                outlines_root.display()
            )
        })?;
    }

    info!("Outline directory: {}", outlines_root.display());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host or port")?;

    web::run_server(config, outlines_root, addr).await
}
