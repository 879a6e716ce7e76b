use crate::store::atomic_writer::AtomicWriter;
use crate::traits::KeyValueStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use taskboard_core::{BoardError, BoardResult};

/// File-backed key-value store
/// Each key lives in `<dir>/<key>.json`, written atomically
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn key_path(&self, key: &str) -> BoardResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(BoardError::Validation(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> BoardResult<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        AtomicWriter::read_if_exists(&path).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> BoardResult<()> {
        let path = self.key_path(key)?;
        AtomicWriter::write_atomic(&path, &value).await?;
        tracing::info!("Saved {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> BoardResult<()> {
        let path = self.key_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
