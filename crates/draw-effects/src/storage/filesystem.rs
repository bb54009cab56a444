use async_trait::async_trait;
use draw_core::effects::{StorageEffects, StorageError};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

const RECORD_EXTENSION: &str = "json";

/// Filesystem-based storage handler for production use
///
/// Each key maps to `<base_path>/<key>.json`. Writes go to a temporary sibling
/// first and are moved into place with a rename, so a crash mid-write leaves the
/// previous record intact.
#[derive(Debug, Clone)]
pub struct FilesystemStorageHandler {
    /// Base directory for record files
    base_path: PathBuf,
}

impl FilesystemStorageHandler {
    /// Create a new filesystem storage handler
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey {
                reason: "Key cannot be empty".to_string(),
            });
        }
        let relative = Path::new(key);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::InvalidKey {
                reason: format!("Key must be a relative path without '..': {key}"),
            });
        }
        Ok(self
            .base_path
            .join(format!("{key}.{RECORD_EXTENSION}")))
    }
}

#[async_trait]
impl StorageEffects for FilesystemStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let file_path = self.record_path(key)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::WriteFailed(format!("Failed to create directory: {e}"))
            })?;
        }

        let tmp_path = file_path.with_extension(format!("{RECORD_EXTENSION}.tmp"));
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to write file: {e}")))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Failed to replace file: {e}")))?;

        tracing::debug!(path = %file_path.display(), "record written");
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let file_path = self.record_path(key)?;
        match fs::read(&file_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to read file: {e}"
            ))),
        }
    }

    fn locate(&self, key: &str) -> String {
        self.base_path
            .join(format!("{key}.{RECORD_EXTENSION}"))
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_filesystem_storage_handler() {
        let temp_dir = TempDir::new().unwrap();
        let handler = FilesystemStorageHandler::new(temp_dir.path());

        handler.store("winners", b"{}".to_vec()).await.unwrap();
        let retrieved = handler.retrieve("winners").await.unwrap();
        assert_eq!(retrieved, Some(b"{}".to_vec()));
        assert!(temp_dir.path().join("winners.json").exists());
        assert_eq!(handler.retrieve("absentees").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_replaces_whole_value() {
        let temp_dir = TempDir::new().unwrap();
        let handler = FilesystemStorageHandler::new(temp_dir.path());

        handler.store("absentees", b"[1,2,3,4]".to_vec()).await.unwrap();
        handler.store("absentees", b"[]".to_vec()).await.unwrap();

        assert_eq!(
            handler.retrieve("absentees").await.unwrap(),
            Some(b"[]".to_vec())
        );
        assert!(!temp_dir.path().join("absentees.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_creates_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let handler = FilesystemStorageHandler::new(temp_dir.path().join("nested/data"));

        handler.store("results", b"[]".to_vec()).await.unwrap();
        assert!(temp_dir.path().join("nested/data/results.json").exists());
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let temp_dir = TempDir::new().unwrap();
        let handler = FilesystemStorageHandler::new(temp_dir.path());

        for key in ["", "../outside", "/etc/passwd"] {
            let err = handler.store(key, Vec::new()).await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey { .. }), "{key}");
        }
    }

    #[test]
    fn test_locate_points_at_record_file() {
        let handler = FilesystemStorageHandler::new("/srv/draw");
        assert_eq!(handler.locate("results"), "/srv/draw/results.json");
    }
}
