//! Per-course layout settings storage.
//!
//! Stores never validate the column count: whatever was written is handed
//! back and the planner clamps it. Courses without a record get the admin
//! defaults. An unreadable record degrades to the defaults for that course
//! only.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::AdminDefaults;
use crate::models::{CourseId, LayoutConfig, StoredLayout};

/// Which stored records a reset applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    /// A single course
    Course(CourseId),
    /// Every course with a stored record
    All,
}

/// Persistence of per-course layout settings.
pub trait SettingsStore: Send + Sync {
    /// Returns the stored record, if any.
    fn stored(&self, course: CourseId) -> Result<Option<LayoutConfig>>;

    /// Replaces the record of a course.
    fn set(&self, course: CourseId, config: &LayoutConfig) -> Result<()>;

    /// Restores matching records to the admin defaults.
    ///
    /// Returns the number of records reset.
    fn reset(&self, scope: ResetScope) -> Result<usize>;

    /// Removes the record of a deleted course.
    ///
    /// Returns true if a record existed.
    fn delete(&self, course: CourseId) -> Result<bool>;

    /// Defaults used for courses without a record.
    fn defaults(&self) -> AdminDefaults;

    /// Returns the settings of a course, falling back to the admin defaults.
    fn get(&self, course: CourseId) -> Result<LayoutConfig> {
        Ok(self
            .stored(course)?
            .unwrap_or_else(|| self.defaults().layout_config()))
    }
}

fn reset_records(
    records: &mut BTreeMap<CourseId, LayoutConfig>,
    scope: ResetScope,
    defaults: AdminDefaults,
) -> usize {
    let fresh = defaults.layout_config();
    match scope {
        ResetScope::Course(course) => match records.get_mut(&course) {
            Some(record) => {
                *record = fresh;
                1
            }
            None => 0,
        },
        ResetScope::All => {
            for record in records.values_mut() {
                *record = fresh;
            }
            records.len()
        }
    }
}

/// In-memory store, used by tests and embedders with their own persistence.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    defaults: AdminDefaults,
    records: RwLock<BTreeMap<CourseId, LayoutConfig>>,
}

impl MemorySettingsStore {
    /// Creates an empty store with the given defaults.
    #[must_use]
    pub fn new(defaults: AdminDefaults) -> Self {
        Self {
            defaults,
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn stored(&self, course: CourseId) -> Result<Option<LayoutConfig>> {
        let records = self
            .records
            .read()
            .map_err(|_| anyhow!("Settings lock poisoned"))?;
        Ok(records.get(&course).copied())
    }

    fn set(&self, course: CourseId, config: &LayoutConfig) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| anyhow!("Settings lock poisoned"))?;
        records.insert(course, *config);
        Ok(())
    }

    fn reset(&self, scope: ResetScope) -> Result<usize> {
        let mut records = self
            .records
            .write()
            .map_err(|_| anyhow!("Settings lock poisoned"))?;
        Ok(reset_records(&mut records, scope, self.defaults))
    }

    fn delete(&self, course: CourseId) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| anyhow!("Settings lock poisoned"))?;
        Ok(records.remove(&course).is_some())
    }

    fn defaults(&self) -> AdminDefaults {
        self.defaults
    }
}

/// On-disk layout of `settings.toml`. TOML table keys must be strings.
#[derive(Debug, Default, Serialize)]
struct SettingsFile {
    courses: BTreeMap<String, LayoutConfig>,
}

/// `settings.toml` as read, with each record left raw so one bad table
/// cannot fail the others.
#[derive(Debug, Default, Deserialize)]
struct RawSettingsFile {
    #[serde(default)]
    courses: BTreeMap<String, toml::Value>,
}

/// Store backed by a single TOML file keyed by course id.
///
/// Every mutation is a read-modify-write under a mutex, written with the
/// temp file + rename pattern so the file is never left half-written.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    defaults: AdminDefaults,
    lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Creates a store for the given file. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, defaults: AdminDefaults) -> Self {
        Self {
            path: path.into(),
            defaults,
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns every stored record.
    pub fn all(&self) -> Result<BTreeMap<CourseId, LayoutConfig>> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("Settings lock poisoned"))?;
        self.read()
    }

    fn read(&self) -> Result<BTreeMap<CourseId, LayoutConfig>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).context(format!(
            "Failed to read settings file: {}",
            self.path.display()
        ))?;
        let file: RawSettingsFile = toml::from_str(&content).context(format!(
            "Failed to parse settings file: {}",
            self.path.display()
        ))?;

        file.courses
            .into_iter()
            .map(|(key, record)| {
                let course = key
                    .parse::<CourseId>()
                    .with_context(|| format!("Invalid course id '{key}' in settings file"))?;
                Ok((course, self.read_record(course, record)))
            })
            .collect()
    }

    fn read_record(&self, course: CourseId, record: toml::Value) -> LayoutConfig {
        match record.try_into::<StoredLayout>() {
            Ok(stored) => stored.resolve(self.defaults.columns),
            Err(e) => {
                warn!("Unreadable settings of course {course}, using defaults: {e}");
                self.defaults.layout_config()
            }
        }
    }

    fn write(&self, records: &BTreeMap<CourseId, LayoutConfig>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create settings directory: {}",
                parent.display()
            ))?;
        }

        let file = SettingsFile {
            courses: records
                .iter()
                .map(|(course, config)| (course.to_string(), *config))
                .collect(),
        };
        let content = toml::to_string_pretty(&file).context("Failed to serialize settings")?;

        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp settings file: {}",
            temp_path.display()
        ))?;
        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp settings file to: {}",
            self.path.display()
        ))?;

        debug!("Wrote {} course settings to {}", records.len(), self.path.display());
        Ok(())
    }

    fn update<T>(&self, f: impl FnOnce(&mut BTreeMap<CourseId, LayoutConfig>) -> T) -> Result<T> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("Settings lock poisoned"))?;
        let mut records = self.read()?;
        let value = f(&mut records);
        self.write(&records)?;
        Ok(value)
    }
}

impl SettingsStore for FileSettingsStore {
    fn stored(&self, course: CourseId) -> Result<Option<LayoutConfig>> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("Settings lock poisoned"))?;
        Ok(self.read()?.get(&course).copied())
    }

    fn set(&self, course: CourseId, config: &LayoutConfig) -> Result<()> {
        self.update(|records| {
            records.insert(course, *config);
        })
    }

    fn reset(&self, scope: ResetScope) -> Result<usize> {
        let defaults = self.defaults;
        let count = self.update(|records| reset_records(records, scope, defaults))?;
        info!("Reset {} course layout record(s) ({:?})", count, scope);
        Ok(count)
    }

    fn delete(&self, course: CourseId) -> Result<bool> {
        self.update(|records| records.remove(&course).is_some())
    }

    fn defaults(&self) -> AdminDefaults {
        self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseDisplay, Orientation};
    use tempfile::TempDir;

    fn vertical(columns: i64) -> LayoutConfig {
        LayoutConfig::new(columns, Orientation::Vertical)
    }

    #[test]
    fn test_missing_record_returns_defaults() {
        let store = MemorySettingsStore::new(AdminDefaults::default());
        let config = store.get(42).unwrap();
        assert_eq!(config.column_count, 2);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(store.stored(42).unwrap(), None);
    }

    #[test]
    fn test_memory_set_reset_delete() {
        let store = MemorySettingsStore::new(AdminDefaults::default());
        store.set(1, &vertical(4)).unwrap();
        store.set(2, &vertical(3)).unwrap();

        assert_eq!(store.reset(ResetScope::Course(1)).unwrap(), 1);
        assert_eq!(store.get(1).unwrap(), AdminDefaults::default().layout_config());
        assert_eq!(store.get(2).unwrap().column_count, 3);

        assert_eq!(store.reset(ResetScope::All).unwrap(), 2);
        assert_eq!(store.get(2).unwrap().column_count, 2);

        assert!(store.delete(2).unwrap());
        assert!(!store.delete(2).unwrap());
    }

    #[test]
    fn test_reset_missing_course_is_noop() {
        let store = MemorySettingsStore::new(AdminDefaults::default());
        assert_eq!(store.reset(ResetScope::Course(9)).unwrap(), 0);
        assert_eq!(store.stored(9).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("settings.toml");

        let store = FileSettingsStore::new(&path, AdminDefaults::default());
        store
            .set(7, &vertical(3).with_course_display(CourseDisplay::Multi))
            .unwrap();
        assert!(path.exists());

        let reopened = FileSettingsStore::new(&path, AdminDefaults::default());
        let config = reopened.get(7).unwrap();
        assert_eq!(config.column_count, 3);
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.course_display, CourseDisplay::Multi);
    }

    #[test]
    fn test_file_store_keeps_out_of_range_values() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(temp_dir.path().join("settings.toml"), AdminDefaults::default());
        store.set(3, &vertical(11)).unwrap();
        assert_eq!(store.get(3).unwrap().column_count, 11);
    }

    #[test]
    fn test_file_store_reset_all_uses_store_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let defaults = AdminDefaults {
            columns: 1,
            orientation: Orientation::Vertical,
            ..AdminDefaults::default()
        };
        let store = FileSettingsStore::new(temp_dir.path().join("settings.toml"), defaults);
        store.set(1, &LayoutConfig::new(4, Orientation::Horizontal)).unwrap();
        store.set(2, &LayoutConfig::new(3, Orientation::Horizontal)).unwrap();

        assert_eq!(store.reset(ResetScope::All).unwrap(), 2);
        let all = store.all().unwrap();
        assert!(all.values().all(|c| *c == defaults.layout_config()));
    }

    #[test]
    fn test_file_store_reads_legacy_orientation_codes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "[courses.5]\ncolumns = 3\norientation = 1\n").unwrap();

        let store = FileSettingsStore::new(&path, AdminDefaults::default());
        let config = store.get(5).unwrap();
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.course_display, CourseDisplay::Single);
    }

    #[test]
    fn test_file_store_degrades_malformed_record_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(
            &path,
            "[courses.5]\ncolumns = \"three\"\norientation = \"vertical\"\n\n[courses.6]\ncolumns = 3\n",
        )
        .unwrap();

        let defaults = AdminDefaults {
            columns: 1,
            ..AdminDefaults::default()
        };
        let store = FileSettingsStore::new(&path, defaults);
        assert_eq!(store.get(6).unwrap().column_count, 3);

        let degraded = store.get(5).unwrap();
        assert_eq!(degraded.column_count, 1);
        assert_eq!(degraded.orientation, Orientation::Vertical);
    }

    #[test]
    fn test_file_store_fills_missing_column_count() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "[courses.5]\norientation = \"vertical\"\n").unwrap();

        let store = FileSettingsStore::new(&path, AdminDefaults::default());
        let config = store.stored(5).unwrap().unwrap();
        assert_eq!(config, LayoutConfig::new(2, Orientation::Vertical));
    }

    #[test]
    fn test_file_store_accepts_numeric_string_count() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "[courses.5]\ncolumns = \"4\"\n").unwrap();

        let store = FileSettingsStore::new(&path, AdminDefaults::default());
        assert_eq!(store.get(5).unwrap().column_count, 4);
    }

    #[test]
    fn test_file_store_non_table_record_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "[courses]\n5 = 3\n\n[courses.6]\ncolumns = 4\n").unwrap();

        let store = FileSettingsStore::new(&path, AdminDefaults::default());
        assert_eq!(store.get(5).unwrap(), AdminDefaults::default().layout_config());
        assert_eq!(store.get(6).unwrap().column_count, 4);
    }

    #[test]
    fn test_file_store_rejects_bad_course_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "[courses.abc]\ncolumns = 3\n").unwrap();

        let store = FileSettingsStore::new(&path, AdminDefaults::default());
        let err = store.get(1).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid course id"));
    }
}
