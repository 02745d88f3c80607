//! File-backed key-value store.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use vigil_core::error::{Error, StorageError};
use vigil_core::traits::KeyValue;
use vigil_core::Result;

fn map_read(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Read {
        message: err.to_string(),
    })
}

fn map_write(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Write {
        message: err.to_string(),
    })
}

/// A durable key-value store backed by one file per key.
///
/// Writes go through a temp file and rename so a crash mid-write never
/// leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    /// Create a new store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Convert a key into a filesystem-safe file name.
    fn key_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            })
            .collect();
        self.root.join(format!("{}.json", safe))
    }
}

#[async_trait]
impl KeyValue for FileKv {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path).map_err(map_read)?;
        Ok(Some(value))
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(map_write)?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).map_err(map_write)?;
        fs::rename(&temp_path, &path).map_err(map_write)?;

        debug!(key, "Stored value");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);

        if path.exists() {
            fs::remove_file(&path).map_err(map_write)?;
            debug!(key, "Removed value");
        }

        Ok(())
    }
}
