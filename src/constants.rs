//! Application-wide constants.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Course Columns";

/// Name of the per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = "CourseColumns";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "COURSE_COLUMNS_CONFIG_DIR";

/// Smallest supported column count.
pub const MIN_COLUMNS: u32 = 1;

/// Largest supported column count.
pub const MAX_COLUMNS: u32 = 4;

/// Width in percent reserved for the gutter between vertical columns.
pub const DEFAULT_GUTTER_PERCENT: f64 = 1.0;
