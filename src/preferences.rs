//! User preferences (language and theme) and where they are persisted.
//!
//! Preferences are read once at startup through a [`PreferenceStore`] and
//! written back on every change. The store is a flat string key-value map so
//! the on-disk format stays readable: `{"language": "en", "isDarkMode": "false"}`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::i18n::Language;

#[cfg(test)]
#[path = "preferences_tests.rs"]
mod tests;

pub const LANGUAGE_KEY: &str = "language";
pub const DARK_MODE_KEY: &str = "isDarkMode";

const APP_DIR: &str = "github-profile";
const FILE_NAME: &str = "preferences.json";

/// Client-local key-value storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Store that lives only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON file, rewritten in full on every `set`.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// `<config dir>/github-profile/preferences.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring stored preferences");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.write()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::DEFAULT,
            dark_mode: true,
        }
    }
}

impl Preferences {
    /// Reads both keys, keeping the default for any that is absent or invalid.
    pub fn load(store: &impl PreferenceStore) -> Self {
        let mut prefs = Self::default();

        if let Some(raw) = store.get(LANGUAGE_KEY) {
            match raw.parse::<Language>() {
                Ok(lang) => prefs.language = lang,
                Err(err) => debug!(%err, "ignoring stored language"),
            }
        }

        if let Some(raw) = store.get(DARK_MODE_KEY) {
            match raw.parse::<bool>() {
                Ok(dark_mode) => prefs.dark_mode = dark_mode,
                Err(_) => debug!(value = %raw, "ignoring stored theme"),
            }
        }

        prefs
    }

    pub fn save_language(&self, store: &mut impl PreferenceStore) -> Result<(), StorageError> {
        store.set(LANGUAGE_KEY, self.language.code())
    }

    pub fn save_dark_mode(&self, store: &mut impl PreferenceStore) -> Result<(), StorageError> {
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })
    }
}
