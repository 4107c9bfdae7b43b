//! Response persistence seam.
//!
//! The engine persists form values through this trait, keyed by the
//! form's derived namespace key. Backends live in `mold-store`; the
//! engine only ever sees the trait object.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snapshot::FormSnapshot;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation errors.
///
/// Only writes can fail. Reads degrade to `None` so a missing or corrupt
/// persisted response can never take a form down.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(String),

    /// Value (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Keyed persistence for form responses.
///
/// # Contract
///
/// - `load` tolerates missing and corrupt data by returning `None`,
///   never an error. Corruption is the backend's to log.
/// - `save` replaces the stored values for the namespace wholesale.
/// - Implementations must be `Send + Sync`; the engine writes from a
///   spawned task.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Fetch the persisted values for a form namespace.
    async fn load(&self, namespace: &str) -> Option<FormSnapshot>;

    /// Write the current values for a form namespace.
    async fn save(&self, namespace: &str, values: &FormSnapshot) -> StoreResult<()>;
}
