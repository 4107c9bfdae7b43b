//! Durable JSON-file backend.
//!
//! One pretty-printed JSON document per form namespace under a root
//! directory. Writes go through a temp file and rename so a crashed
//! write never leaves a half-written document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mold_core::{FormSnapshot, ResponseStore, StoreError, StoreResult};
use tracing::{debug, warn};

/// Durable response store rooted at a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`. The directory is created on the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, namespace: &str) -> PathBuf {
        self.root.join(format!("{namespace}.json"))
    }
}

#[async_trait]
impl ResponseStore for JsonFileStore {
    async fn load(&self, namespace: &str) -> Option<FormSnapshot> {
        let path = self.document_path(namespace);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(error) => {
                debug!(path = %path.display(), %error, "no persisted response");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(values) => Some(values),
            Err(error) => {
                warn!(path = %path.display(), %error, "discarding corrupt persisted response");
                None
            }
        }
    }

    async fn save(&self, namespace: &str, values: &FormSnapshot) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let path = self.document_path(namespace);
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }
}
