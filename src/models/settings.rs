//! Per-course layout settings.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Course identifier as assigned by the host.
pub type CourseId = u64;

/// How columns are arranged on the course page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Sections stack top-to-bottom within a column, columns side by side
    Vertical,
    /// Sections flow in rows, each taking one column's width
    #[default]
    Horizontal,
}

impl Orientation {
    /// Maps the legacy numeric setting (1 = vertical, 2 = horizontal).
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Vertical),
            2 => Some(Self::Horizontal),
            _ => None,
        }
    }

    /// Returns the lowercase setting name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vertical" | "1" => Ok(Self::Vertical),
            "horizontal" | "2" => Ok(Self::Horizontal),
            other => Err(format!(
                "Invalid orientation '{other}'. Must be 'vertical' or 'horizontal'"
            )),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Code(i64),
    Name(String),
    Other(IgnoredAny),
}

// Stored values are corrected rather than rejected so a bad record never
// breaks rendering.
impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match StoredValue::deserialize(deserializer)? {
            StoredValue::Code(code) => Self::from_code(code),
            StoredValue::Name(name) => name.parse().ok(),
            StoredValue::Other(_) => None,
        };
        Ok(parsed.unwrap_or_else(|| {
            tracing::warn!("Unrecognised stored orientation, using {}", Self::default());
            Self::default()
        }))
    }
}

/// Whether all sections share one page or each has its own page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CourseDisplay {
    /// All sections on one page
    #[default]
    Single,
    /// One section per page, the course page shows summaries
    Multi,
}

impl CourseDisplay {
    /// Maps the host's numeric setting (0 = single page, 1 = multi page).
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Single),
            1 => Some(Self::Multi),
            _ => None,
        }
    }

    /// Returns the lowercase setting name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }
}

impl fmt::Display for CourseDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseDisplay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "0" => Ok(Self::Single),
            "multi" | "1" => Ok(Self::Multi),
            other => Err(format!(
                "Invalid course display '{other}'. Must be 'single' or 'multi'"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for CourseDisplay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match StoredValue::deserialize(deserializer)? {
            StoredValue::Code(code) => Self::from_code(code),
            StoredValue::Name(name) => name.parse().ok(),
            StoredValue::Other(_) => None,
        };
        Ok(parsed.unwrap_or_else(|| {
            tracing::warn!("Unrecognised stored course display, using {}", Self::default());
            Self::default()
        }))
    }
}

/// Layout settings of one course.
///
/// `column_count` is kept exactly as stored; out-of-range values are clamped
/// by the planner, never rejected here. Stored records are read through
/// [`StoredLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutConfig {
    /// Requested number of columns (intended domain 1-4)
    #[serde(rename = "columns")]
    pub column_count: i64,
    /// Column orientation
    #[serde(default)]
    pub orientation: Orientation,
    /// Single or multi page course display
    #[serde(default)]
    pub course_display: CourseDisplay,
}

impl LayoutConfig {
    /// Creates a config with the given column count and orientation.
    #[must_use]
    pub fn new(column_count: i64, orientation: Orientation) -> Self {
        Self {
            column_count,
            orientation,
            course_display: CourseDisplay::default(),
        }
    }

    /// Sets the course display mode.
    #[must_use]
    pub fn with_course_display(mut self, course_display: CourseDisplay) -> Self {
        self.course_display = course_display;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCount {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl StoredCount {
    fn value(self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(n),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Float(_) | Self::Other(_) => None,
        }
    }
}

fn lenient_column_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<StoredCount>::deserialize(deserializer)?.and_then(StoredCount::value))
}

/// A course record as read from storage.
///
/// Every field is lenient: integers, floats and numeric strings are accepted
/// for `columns`, and anything else reads as missing. [`StoredLayout::resolve`]
/// fills a missing count from the admin default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct StoredLayout {
    /// Stored column count, if readable
    #[serde(rename = "columns", default, deserialize_with = "lenient_column_count")]
    pub column_count: Option<i64>,
    /// Column orientation
    #[serde(default)]
    pub orientation: Orientation,
    /// Single or multi page course display
    #[serde(default)]
    pub course_display: CourseDisplay,
}

impl StoredLayout {
    /// Completes the record, using `default_columns` for a missing count.
    #[must_use]
    pub fn resolve(self, default_columns: i64) -> LayoutConfig {
        let column_count = self.column_count.unwrap_or_else(|| {
            tracing::warn!("Missing or unreadable stored column count, using {default_columns}");
            default_columns
        });
        LayoutConfig::new(column_count, self.orientation).with_course_display(self.course_display)
    }
}
