//! File-backed key/value medium.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use helpline_app::ports::KeyValueStore;
use helpline_domain::error::HelplineError;

use crate::error::StorageError;

/// Configuration for the file storage adapter.
pub struct Config {
    /// Path of the JSON state file (e.g. `helpline-state.json`).
    pub path: PathBuf,
}

impl Config {
    /// Open the state file described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the parent directory cannot be created or
    /// the file exists but cannot be read.
    pub fn build(self) -> Result<FileStore, StorageError> {
        FileStore::open(self.path)
    }
}

/// Key/value store persisted as one JSON object.
///
/// The whole map is cached in memory and the file is rewritten on each
/// change, so reads never touch the disk after opening.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open `path`, creating its parent directory when missing.
    ///
    /// A file that is not a JSON object of strings is renamed to
    /// `<path>.corrupt` and the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created or
    /// the file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let items = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(items) => items,
                Err(err) => {
                    let backup = corrupt_path(&path);
                    tracing::warn!(%err, path = %path.display(), backup = %backup.display(), "state file is corrupt, starting empty");
                    if let Err(err) = fs::rename(&path, &backup) {
                        tracing::warn!(%err, "failed to set corrupt state file aside");
                    }
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(path = %path.display(), keys = items.len(), "state file opened");

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn items(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, HelplineError> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), HelplineError> {
        let mut items = self.items();
        items.insert(key.to_string(), value.to_string());
        self.flush(&items)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), HelplineError> {
        let mut items = self.items();
        if items.remove(key).is_some() {
            self.flush(&items)?;
        }
        Ok(())
    }
}
