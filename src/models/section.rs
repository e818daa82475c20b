//! Course section data structures.

use serde::{Deserialize, Serialize};

/// Index of the general (introductory) section, never laid out in columns.
pub const GENERAL_SECTION: u32 = 0;

/// One content block (topic) of a course.
///
/// `visible` and `available` are populated by the section provider from the
/// host's access evaluation; the planner never evaluates permissions itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Ordinal position within the course (0 is the general section)
    pub index: u32,
    /// Display name, `None` falls back to "Topic N"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Summary text shown in multi-page display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Whether the section is shown at all under current visibility rules
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Whether the section content is currently accessible
    #[serde(default = "default_true")]
    pub available: bool,
    /// Whether availability information is surfaced for unavailable sections
    #[serde(default)]
    pub show_availability: bool,
}

fn default_true() -> bool {
    true
}

impl Section {
    /// Creates a visible, available section with no name.
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name: None,
            summary: None,
            visible: true,
            available: true,
            show_availability: false,
        }
    }

    /// Creates a section the current user cannot see at all.
    #[must_use]
    pub fn hidden(index: u32) -> Self {
        Self {
            visible: false,
            available: false,
            ..Self::new(index)
        }
    }

    /// Creates a visible section whose content is restricted.
    #[must_use]
    pub fn restricted(index: u32, show_availability: bool) -> Self {
        Self {
            available: false,
            show_availability,
            ..Self::new(index)
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns true if the section occupies a slot in the column flow.
    ///
    /// A section counts as shown when its content is available, or when it is
    /// visible but restricted and availability information is being surfaced.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.available || (self.visible && !self.available && self.show_availability)
    }

    /// Returns true for the general section.
    #[must_use]
    pub fn is_general(&self) -> bool {
        self.index == GENERAL_SECTION
    }

    /// Returns the name used in rendered output.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ if self.is_general() => "General".to_string(),
            _ => format!("Topic {}", self.index),
        }
    }
}
