//! Local filesystem storage implementation.
//!
//! Writes go to a sibling temp file which is then renamed over the snapshot,
//! so readers never observe a half-written document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{NormalizedRecord, Snapshot};
use crate::storage::SnapshotStore;
use crate::utils::sort_keys;

/// Snapshot stored as a JSON file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage for the snapshot file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Decode a snapshot document.
    fn decode(&self, bytes: &[u8]) -> Result<Snapshot> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| AppError::corrupt_store(&self.path, e))?;

        let Value::Object(entries) = value else {
            return Err(AppError::corrupt_store(
                &self.path,
                "snapshot is not a JSON object",
            ));
        };

        let mut snapshot = Snapshot::new();
        for (key, entry) in entries {
            let record: NormalizedRecord = serde_json::from_value(entry).map_err(|e| {
                AppError::corrupt_store(&self.path, format!("entry '{key}': {e}"))
            })?;
            snapshot.insert(key, record);
        }
        Ok(snapshot)
    }

    /// Encode a snapshot as pretty JSON with sorted keys.
    fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
        let value = sort_keys(&serde_json::to_value(snapshot)?);
        Ok(serde_json::to_vec_pretty(&value)?)
    }
}

#[async_trait]
impl SnapshotStore for LocalStorage {
    async fn load(&self) -> Result<Snapshot> {
        match self.read_bytes().await? {
            Some(bytes) => {
                let snapshot = self.decode(&bytes)?;
                log::debug!(
                    "Loaded {} records from {}",
                    snapshot.len(),
                    self.path.display()
                );
                Ok(snapshot)
            }
            None => {
                log::warn!("No snapshot found at {}", self.path.display());
                Ok(Snapshot::new())
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = Self::encode(snapshot)?;
        self.write_bytes(&bytes).await?;
        log::info!(
            "Snapshot: {} records written to {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn exists(&self) -> Result<bool> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
