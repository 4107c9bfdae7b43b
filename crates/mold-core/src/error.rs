//! Engine error taxonomy.
//!
//! Usage errors surface immediately to the caller: they indicate
//! integration bugs, not runtime data problems. Validation failures are
//! not errors at this level — they flow through the submit lifecycle as
//! sanitized [`FieldError`](crate::schema::FieldError)s. Errors raised by
//! externally supplied handlers are caught at the engine boundary and
//! logged, never rethrown.

use thiserror::Error;

use crate::traits::store::StoreError;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by [`FormEngine`](crate::engine::FormEngine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A state operation ran before `initialize()` completed.
    #[error("form engine used before initialize()")]
    NotInitialized,

    /// `initialize()` was called twice.
    #[error("form engine is already initialized")]
    AlreadyInitialized,

    /// A second submit was dispatched while one was in flight.
    #[error("a submit is already in flight")]
    SubmitInFlight,

    /// An explicit flush to the response store failed.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}
