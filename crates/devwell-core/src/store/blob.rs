//! Local key-value blob storage.
//!
//! The engine persists its snapshot through this interface; keys are opaque
//! strings, values are serialized blobs. The file-backed implementation keeps
//! one file per key under the data directory.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StoreError;

/// Key-value blob store abstraction over local persistence.
pub trait BlobStore: Send {
    /// Fetch the blob stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous blob.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the blob stored under `key`. Absent keys are not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory blob store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    items: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// File-backed blob store. Each key maps to `<dir>/<sanitized key>.blob`.
#[derive(Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Create a store rooted at the default data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = super::data_dir()?;
        Ok(Self { dir })
    }

    /// Create a store rooted at `dir` (for testing).
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys may contain characters that are not filename-safe.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.blob"))
    }
}

impl BlobStore for FileBlobStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
