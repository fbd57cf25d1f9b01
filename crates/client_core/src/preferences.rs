use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use shared::domain::GalleryLayout;
use thiserror::Error;
use tracing::{debug, warn};

pub const LAYOUT_PREFERENCE_KEY: &str = "gallery.layout";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to read preferences from '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write preferences to '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("preferences file '{path}' is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Flat string key-value persistence for UI preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a TOML file of `key = "value"` lines.
///
/// A missing file reads as empty. Writes rewrite the whole file and create
/// the parent directory on demand.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PreferenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        toml::from_str(&raw).map_err(|source| PreferenceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        let encoded = toml::to_string(&values)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, encoded).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Stored layout choice, or the default when it is absent, unreadable or not
/// one of the known layouts.
pub fn load_layout(store: &dyn PreferenceStore) -> GalleryLayout {
    match store.get(LAYOUT_PREFERENCE_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
            warn!(error = %err, "preferences: ignoring stored layout");
            GalleryLayout::default()
        }),
        Ok(None) => GalleryLayout::default(),
        Err(err) => {
            warn!(error = %err, "preferences: layout unavailable, using default");
            GalleryLayout::default()
        }
    }
}

pub fn save_layout(store: &dyn PreferenceStore, layout: GalleryLayout) -> Result<(), PreferenceError> {
    store.set(LAYOUT_PREFERENCE_KEY, layout.as_str())?;
    debug!(layout = layout.as_str(), "preferences: layout saved");
    Ok(())
}

#[cfg(test)]
#[path = "tests/preferences_tests.rs"]
mod tests;
