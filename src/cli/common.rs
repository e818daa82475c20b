//! Shared CLI error and exit code types.

use crate::config::Config;
use crate::models::{CourseId, CourseOutline};
use crate::services::{load_outline, FileSettingsStore, OutlineDirectory, SectionProvider};
use std::path::Path;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or arguments
    ValidationError = 1,
    /// File system or serialization failure
    IoError = 2,
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Invalid input or arguments
    Validation,
    /// File system or serialization failure
    Io,
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category, decides the exit code
    pub kind: CliErrorKind,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationError,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration, reporting parse failures as validation errors.
pub fn load_config() -> CliResult<Config> {
    Config::load()
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Opens the settings store configured in `config`.
pub fn open_store(config: &Config) -> CliResult<FileSettingsStore> {
    let path = config
        .settings_file_path()
        .map_err(|e| CliError::io(format!("Failed to locate settings file: {e:#}")))?;
    Ok(FileSettingsStore::new(path, config.defaults))
}

/// Opens the outline directory configured in `config`.
pub fn open_outlines(config: &Config) -> CliResult<OutlineDirectory> {
    let dir = config
        .data_dir()
        .map_err(|e| CliError::io(format!("Failed to locate data directory: {e:#}")))?;
    Ok(OutlineDirectory::new(dir))
}

/// Loads a course outline from a file, or from the data directory by course id.
///
/// With both given, the file is used and `course` overrides the id it declares.
pub fn resolve_outline(
    config: &Config,
    outline: Option<&Path>,
    course: Option<CourseId>,
) -> CliResult<CourseOutline> {
    let mut loaded = match (outline, course) {
        (Some(path), _) => load_outline(path)
            .map_err(|e| CliError::validation(format!("Failed to load outline: {e:#}")))?,
        (None, Some(course)) => open_outlines(config)?
            .outline(course)
            .map_err(|e| CliError::io(format!("Failed to load outline: {e:#}")))?,
        (None, None) => return Err(CliError::validation("Specify --outline FILE or --course ID")),
    };
    if let Some(course) = course {
        loaded.id = course;
    }
    Ok(loaded)
}
