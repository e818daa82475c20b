//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use course_columns::models::{CourseOutline, HiddenSections, Section};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates an outline whose sections `1..=count` are shown, except those in `hidden`.
///
/// # Returns
/// A `CourseOutline` with a general section and `num_sections == count`.
pub fn outline_with_hidden(id: u64, count: u32, hidden: &[u32]) -> CourseOutline {
    let mut outline = CourseOutline::with_visible_sections(id, count);
    outline.name = format!("Course {id}");
    for section in &mut outline.sections {
        if hidden.contains(&section.index) {
            *section = Section::hidden(section.index);
        }
    }
    outline
}

/// Creates a named outline exercising every kind of section.
///
/// Sections 1-3 are plain, 4 is hidden, 5 is restricted with availability
/// info, 6 is restricted without it and 7 is a stealth section.
pub fn outline_mixed(id: u64) -> CourseOutline {
    let mut sections = vec![Section::new(0).with_name("Announcements")];
    sections.extend((1..=3).map(|i| Section::new(i).with_name(format!("Week {i}"))));
    sections.push(Section::hidden(4).with_name("Week 4"));
    sections.push(Section::restricted(5, true).with_name("Week 5"));
    sections.push(Section::restricted(6, false).with_name("Week 6"));
    sections.push(Section::new(7).with_name("Orphan"));

    CourseOutline {
        id,
        name: "Mixed <Course>".to_string(),
        num_sections: 6,
        hidden_sections: HiddenSections::Collapsed,
        sections,
    }
}

/// Writes an outline as `<dir>/<id>.json`.
pub fn write_outline(dir: &Path, outline: &CourseOutline) -> PathBuf {
    let path = dir.join(format!("{}.json", outline.id));
    fs::write(&path, serde_json::to_string_pretty(outline).unwrap())
        .expect("Failed to write outline");
    path
}

/// Creates a temp directory holding a single outline file.
///
/// # Returns
/// Tuple of (file path, `TempDir`). Keep the `TempDir` alive.
pub fn create_temp_outline_file(outline: &CourseOutline) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_outline(temp_dir.path(), outline);
    (path, temp_dir)
}

/// Creates an empty, isolated config directory.
pub fn temp_config_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp config dir")
}
