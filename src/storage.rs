//! Persistence of the document store in a key-value store.
//!
//! The whole store is saved as one JSON array under [`FILES_KEY`]:
//!
//! ```json
//! [{ "name": "example", "content": "# Hello", "open": true }]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::store::{FileList, MarkdownFile};

/// Key the document store is saved under.
pub const FILES_KEY: &str = "files";

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("failed to access {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("failed to decode stored files: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string-to-string store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keeps each key in its own file, `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::Io(self.dir.clone(), e))?;
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| StorageError::Io(path, e))
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the saved document store, if there is one.
pub fn load_files(store: &dyn KeyValueStore) -> Result<Option<FileList>, StorageError> {
    let Some(json) = store.get(FILES_KEY)? else {
        tracing::debug!("no saved files");
        return Ok(None);
    };
    let files: Vec<MarkdownFile> = serde_json::from_str(&json)?;
    tracing::debug!(count = files.len(), "loaded saved files");
    Ok(Some(FileList::from_files(files)))
}

/// Save the whole document store.
pub fn save_files(store: &mut dyn KeyValueStore, files: &FileList) -> Result<(), StorageError> {
    let json = serde_json::to_string(files.files())?;
    store.set(FILES_KEY, &json)?;
    tracing::debug!(count = files.len(), "saved files");
    Ok(())
}
