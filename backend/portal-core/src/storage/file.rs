use super::Storage;
use crate::error::StorageError;

use common::ErrorLocation;

use std::collections::BTreeMap;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, warn};

const STORAGE_FILE_NAME: &str = "storage.json";

/// JSON file in the data directory holding every key.
///
/// Each operation re-reads the file, so a second process sharing the data
/// directory sees the latest write. Writes go through a temp file and a
/// rename; concurrent writers can still lose each other's updates.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Open `{data_dir}/storage.json`, creating the directory if needed.
    /// The file itself is created on first write.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(data_dir).map_err(|e| StorageError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: data_dir.to_path_buf(),
            source: e,
        })?;

        let path = data_dir.join(STORAGE_FILE_NAME);
        debug!("Session storage at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| StorageError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            warn!("Session storage file is not a JSON string map: {}", e);
            StorageError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let temp_path = self.path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(entries).map_err(|e| {
            StorageError::SerializeError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            }
        })?;

        std::fs::write(&temp_path, json).map_err(|e| StorageError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| StorageError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&entries)
    }
}
