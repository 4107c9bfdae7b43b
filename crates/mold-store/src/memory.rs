//! In-process keyed store.
//!
//! Backs `PersistMode::Session`: responses survive form unmounts but not
//! the process. Clones share the same underlying map, so one store can
//! serve every form in the application.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mold_core::{FormSnapshot, ResponseStore, StoreResult};
use tokio::sync::RwLock;

/// Session-scoped response store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, FormSnapshot>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of namespaces currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no namespaces.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop one namespace's values.
    pub async fn clear(&self, namespace: &str) {
        self.entries.write().await.remove(namespace);
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn load(&self, namespace: &str) -> Option<FormSnapshot> {
        self.entries.read().await.get(namespace).cloned()
    }

    async fn save(&self, namespace: &str, values: &FormSnapshot) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(namespace.to_string(), values.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn round_trips_structurally_equal_values() {
        let store = MemoryStore::new();
        let values = FormSnapshot::from_iter([
            ("email".to_string(), json!("a@b.com")),
            ("age".to_string(), json!(30)),
            ("tags".to_string(), json!(["x", "y"])),
        ]);

        store.save("mold-form-reg", &values).await.unwrap();
        assert_eq!(store.load("mold-form-reg").await, Some(values));
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let store = MemoryStore::new();
        let values = FormSnapshot::from_iter([("a".to_string(), json!(1))]);

        store.save("mold-form-one", &values).await.unwrap();
        assert!(store.load("mold-form-two").await.is_none());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        let values = FormSnapshot::from_iter([("a".to_string(), json!(1))]);

        store.save("mold-form-x", &values).await.unwrap();
        assert_eq!(clone.load("mold-form-x").await, Some(values));
        assert_eq!(clone.len().await, 1);
    }

    #[tokio::test]
    async fn save_replaces_wholesale() {
        let store = MemoryStore::new();
        store
            .save(
                "mold-form-x",
                &FormSnapshot::from_iter([("a".to_string(), json!(1)), ("b".to_string(), json!(2))]),
            )
            .await
            .unwrap();
        store
            .save(
                "mold-form-x",
                &FormSnapshot::from_iter([("a".to_string(), json!(3))]),
            )
            .await
            .unwrap();

        let loaded = store.load("mold-form-x").await.unwrap();
        assert_eq!(loaded.get("a"), Some(&json!(3)));
        assert!(loaded.get("b").is_none());
    }
}
