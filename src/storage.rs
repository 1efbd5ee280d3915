use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML preferences: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("failed to encode TOML preferences: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

/// A string-keyed slot store for small user preferences.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// On-disk shape of the preferences file: one flat table of string slots.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct PreferencesFile {
    values: BTreeMap<String, String>,
}

/// Preferences kept as a flat TOML table on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_file(&self) -> Result<PreferencesFile, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(PreferencesFile::default()),
            Err(err) => return Err(StorageError::Io(err)),
        };

        if raw.trim().is_empty() {
            return Ok(PreferencesFile::default());
        }

        Ok(toml::from_str(&raw)?)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load_file()?.values.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut file = self.load_file().unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "discarding unreadable preferences");
            PreferencesFile::default()
        });
        file.values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = toml::to_string_pretty(&file)?;
        fs::write(&self.path, encoded)?;
        tracing::debug!(path = %self.path.display(), key, "stored preference");
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    pub values: BTreeMap<String, String>,
    pub fail_writes: bool,
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io(std::io::Error::new(
                ErrorKind::PermissionDenied,
                "storage unavailable",
            )));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{FilePreferenceStore, PreferenceStore, StorageError};

    #[test]
    fn missing_file_reads_as_empty() {
        let path = temp_file("hours_logger_missing.toml");
        let _ = fs::remove_file(&path);
        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.read("darkMode").expect("read should succeed"), None);
    }

    #[test]
    fn writes_keep_other_keys() {
        let path = temp_file("hours_logger_prefs.toml");
        let _ = fs::remove_file(&path);
        let mut store = FilePreferenceStore::new(&path);
        store.write("darkMode", "true").expect("write should succeed");
        store.write("other", "value").expect("write should succeed");
        store.write("darkMode", "false").expect("write should succeed");

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(
            reopened.read("darkMode").expect("read should succeed").as_deref(),
            Some("false")
        );
        assert_eq!(
            reopened.read("other").expect("read should succeed").as_deref(),
            Some("value")
        );
        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_fails_reads_and_is_replaced_on_write() {
        let path = temp_file("hours_logger_corrupt.toml");
        fs::write(&path, "darkMode = [not toml").expect("seed file");
        let mut store = FilePreferenceStore::new(&path);
        assert!(matches!(
            store.read("darkMode"),
            Err(StorageError::TomlDecode(_))
        ));

        store.write("darkMode", "true").expect("write should succeed");
        assert_eq!(
            store.read("darkMode").expect("read should succeed").as_deref(),
            Some("true")
        );
        let _ = fs::remove_file(path);
    }

    #[test]
    fn file_is_a_flat_table_of_strings() {
        let path = temp_file("hours_logger_shape.toml");
        let _ = fs::remove_file(&path);
        let mut store = FilePreferenceStore::new(&path);
        store.write("darkMode", "true").expect("write should succeed");

        let raw = fs::read_to_string(&path).expect("file should exist");
        assert_eq!(raw.trim(), "darkMode = \"true\"");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = temp_file("hours_logger_nested_dir");
        let _ = fs::remove_dir_all(&dir);
        let mut store = FilePreferenceStore::in_dir(&dir.join("state"));
        store.write("darkMode", "true").expect("write should succeed");
        assert!(store.path().exists());
        let _ = fs::remove_dir_all(dir);
    }

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("{}_{}", name, std::process::id()));
        path
    }
}
