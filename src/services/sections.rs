//! Course outline loading.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::models::{CourseId, CourseOutline};

/// Source of course outlines with visibility already evaluated.
pub trait SectionProvider: Send + Sync {
    /// Returns the outline of a course.
    fn outline(&self, course: CourseId) -> Result<CourseOutline>;
}

/// Loads an outline from a JSON or YAML file, chosen by extension.
pub fn load_outline(path: &Path) -> Result<CourseOutline> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read course outline: {}", path.display()))?;

    let outline: CourseOutline = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yml::from_str(&content)
            .with_context(|| format!("Failed to parse course outline: {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse course outline: {}", path.display()))?,
    };

    outline.validate()?;
    Ok(outline)
}

/// Provider reading `<id>.json`, `<id>.yaml` or `<id>.yml` from a directory.
#[derive(Debug, Clone)]
pub struct OutlineDirectory {
    root: PathBuf,
}

impl OutlineDirectory {
    /// Creates a provider for the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the outlines are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find(&self, course: CourseId) -> Option<PathBuf> {
        ["json", "yaml", "yml"]
            .iter()
            .map(|ext| self.root.join(format!("{course}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl SectionProvider for OutlineDirectory {
    fn outline(&self, course: CourseId) -> Result<CourseOutline> {
        let path = self.find(course).with_context(|| {
            format!(
                "No outline for course {} in {}",
                course,
                self.root.display()
            )
        })?;
        let outline = load_outline(&path)?;
        if outline.id != course {
            anyhow::bail!(
                "Outline {} describes course {}, expected {}",
                path.display(),
                outline.id,
                course
            );
        }
        Ok(outline)
    }
}
