//! Persisted UI preferences.
//!
//! A [`PreferenceStore`] is a small string key/value store, the analogue of
//! browser local storage. [`SidebarPreferences`] is read from it once at
//! startup and written back through [`SidebarPreferences::save`] after every
//! change.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const SIDEBAR_OPEN_KEY: &str = "sidebarOpen";
pub const OPEN_SECTIONS_KEY: &str = "openSections";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Preference I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid preference key '{0}'")]
    InvalidKey(String),
}

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).set(key, value)
    }
}

/// One JSON file per key inside `dir`.
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PreferenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PreferenceError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves a half-written value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Sidebar state that survives restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarPreferences {
    pub sidebar_open: bool,
    /// Expanded state per section label. Missing labels are collapsed.
    pub open_sections: BTreeMap<String, bool>,
}

impl Default for SidebarPreferences {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            open_sections: BTreeMap::new(),
        }
    }
}

fn read_key<T: for<'de> Deserialize<'de>>(
    store: &dyn PreferenceStore,
    key: &str,
) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring unreadable preference '{key}': {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to read preference '{key}': {e}");
            None
        }
    }
}

impl SidebarPreferences {
    /// Reads both keys, falling back to defaults for anything missing or
    /// unreadable.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();
        Self {
            sidebar_open: read_key(store, SIDEBAR_OPEN_KEY).unwrap_or(defaults.sidebar_open),
            open_sections: read_key(store, OPEN_SECTIONS_KEY).unwrap_or(defaults.open_sections),
        }
    }

    pub fn save(&self, store: &dyn PreferenceStore) -> Result<(), PreferenceError> {
        store.set(SIDEBAR_OPEN_KEY, &serde_json::to_string(&self.sidebar_open)?)?;
        store.set(OPEN_SECTIONS_KEY, &serde_json::to_string(&self.open_sections)?)?;
        Ok(())
    }

    pub fn is_section_open(&self, label: &str) -> bool {
        self.open_sections.get(label).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_store_is_empty() {
        let store = MemoryPreferenceStore::new();
        let prefs = SidebarPreferences::load(&store);
        assert!(prefs.sidebar_open);
        assert!(prefs.open_sections.is_empty());
    }

    #[test]
    fn test_values_use_local_storage_encoding() {
        let store = MemoryPreferenceStore::new();
        let mut prefs = SidebarPreferences::default();
        prefs.sidebar_open = false;
        prefs.open_sections.insert("Medical".to_string(), true);
        prefs.save(&store).unwrap();

        assert_eq!(store.get(SIDEBAR_OPEN_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(
            store.get(OPEN_SECTIONS_KEY).unwrap().as_deref(),
            Some(r#"{"Medical":true}"#)
        );
        assert_eq!(SidebarPreferences::load(&store), prefs);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let store = MemoryPreferenceStore::new();
        store.set(SIDEBAR_OPEN_KEY, "not json").unwrap();
        store.set(OPEN_SECTIONS_KEY, r#"{"Financial":true}"#).unwrap();
        let prefs = SidebarPreferences::load(&store);
        assert!(prefs.sidebar_open);
        assert!(prefs.is_section_open("Financial"));
        assert!(!prefs.is_section_open("Medical"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = SidebarPreferences::default();
        prefs.open_sections.insert("Management".to_string(), true);
        prefs.save(&FilePreferenceStore::new(dir.path())).unwrap();

        let reopened = FilePreferenceStore::new(dir.path());
        assert_eq!(SidebarPreferences::load(&reopened), prefs);
        assert!(dir.path().join("openSections.json").exists());
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("not-created-yet"));
        assert!(store.get(SIDEBAR_OPEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "1"),
            Err(PreferenceError::InvalidKey(_))
        ));
    }
}
