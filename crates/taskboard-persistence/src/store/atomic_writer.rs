use std::path::Path;
use taskboard_core::BoardResult;
use tokio::fs;

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically, creating the parent directory if needed
    pub async fn write_atomic(path: &Path, data: &[u8]) -> BoardResult<()> {
        // Temp file in the same directory keeps the rename on one filesystem
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).await?;
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let temp_path = temp_file.path().to_path_buf();

        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, path).await?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read all data from a file, `None` if it does not exist
    pub async fn read_if_exists(path: &Path) -> BoardResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
