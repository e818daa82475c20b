//! Course outline as supplied by the section provider.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::section::Section;
use crate::models::settings::CourseId;

/// What to show in place of a section the user cannot see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HiddenSections {
    /// Show a collapsed "not available" placeholder
    #[default]
    Collapsed,
    /// Omit the section entirely
    Invisible,
}

/// All sections of a course, including the general section and any
/// stealth sections beyond the declared count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutline {
    /// Course identifier
    pub id: CourseId,
    /// Course full name
    #[serde(default)]
    pub name: String,
    /// Declared number of sections (excluding the general section).
    /// Sections with a higher index are stealth sections.
    pub num_sections: u32,
    /// Placeholder policy for hidden sections
    #[serde(default)]
    pub hidden_sections: HiddenSections,
    /// Sections in index order
    pub sections: Vec<Section>,
}

impl CourseOutline {
    /// Creates an outline with `count` visible sections plus the general section.
    #[must_use]
    pub fn with_visible_sections(id: CourseId, count: u32) -> Self {
        Self {
            id,
            name: String::new(),
            num_sections: count,
            hidden_sections: HiddenSections::default(),
            sections: (0..=count).map(Section::new).collect(),
        }
    }

    /// Returns the general section, if present.
    #[must_use]
    pub fn general(&self) -> Option<&Section> {
        self.sections.iter().find(|s| s.is_general())
    }

    /// Returns every section except the general one, in index order.
    #[must_use]
    pub fn layout_sections(&self) -> Vec<Section> {
        let mut sections: Vec<Section> = self
            .sections
            .iter()
            .filter(|s| !s.is_general())
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.index);
        sections
    }

    /// Looks up a section by index.
    #[must_use]
    pub fn section(&self, index: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.index == index)
    }

    /// Validates the outline.
    ///
    /// Checks:
    /// - section indices are unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.index) {
                anyhow::bail!(
                    "Course {} lists section {} more than once",
                    self.id,
                    section.index
                );
            }
        }
        Ok(())
    }
}
