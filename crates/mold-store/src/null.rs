//! No-op backend for forms configured without persistence.

use async_trait::async_trait;
use mold_core::{FormSnapshot, ResponseStore, StoreResult};

/// Accepts every write and remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

#[async_trait]
impl ResponseStore for NullStore {
    async fn load(&self, _namespace: &str) -> Option<FormSnapshot> {
        None
    }

    async fn save(&self, _namespace: &str, _values: &FormSnapshot) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn writes_are_accepted_and_forgotten() {
        let store = NullStore;
        let values = FormSnapshot::from_iter([("a".to_string(), json!(1))]);

        store.save("mold-form-x", &values).await.unwrap();
        assert!(store.load("mold-form-x").await.is_none());
    }
}
