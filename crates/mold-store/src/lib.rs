//! Response-store backends for the mold form engine
//!
//! This crate provides the concrete [`ResponseStore`] implementations the
//! engine persists form values through, one per
//! [`PersistMode`](mold_core::PersistMode):
//!
//! - **NullStore** — no persistence; every load misses.
//! - **MemoryStore** — keyed in-process map, lives for the application
//!   session, cheap to clone and share.
//! - **JsonFileStore** — one JSON document per form namespace under a
//!   root directory, written atomically.
//!
//! All backends honor the store contract: loads tolerate missing and
//! corrupt data by returning `None`, never an error.
//!
//! ```rust,no_run
//! use mold_core::PersistMode;
//! use mold_store::store_for_mode;
//!
//! let store = store_for_mode(PersistMode::Durable, "/var/lib/myapp/forms");
//! ```

pub mod file;
pub mod memory;
pub mod null;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use null::NullStore;

use std::path::PathBuf;
use std::sync::Arc;

use mold_core::{PersistMode, ResponseStore};

/// Select the backend for a configured persistence mode.
///
/// `root` is only consulted for [`PersistMode::Durable`].
pub fn store_for_mode(mode: PersistMode, root: impl Into<PathBuf>) -> Arc<dyn ResponseStore> {
    match mode {
        PersistMode::None => Arc::new(NullStore),
        PersistMode::Session => Arc::new(MemoryStore::new()),
        PersistMode::Durable => Arc::new(JsonFileStore::new(root)),
    }
}
