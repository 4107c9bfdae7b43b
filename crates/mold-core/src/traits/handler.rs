//! Submit and change collaborator traits.

use async_trait::async_trait;

use crate::exemption::ExemptionMap;
use crate::schema::FieldError;
use crate::snapshot::FormSnapshot;

/// Application-side submit callbacks.
///
/// Either callback may be asynchronous and may fail; the engine awaits
/// it, catches the error, logs it, and completes the submit lifecycle
/// regardless. Errors returned here never reach the caller of
/// `submit()`.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Called with the current values on a valid submission — including
    /// an invalid submission where every errored field was exempted.
    async fn on_valid(&self, values: &FormSnapshot) -> anyhow::Result<()>;

    /// Called with the sanitized errors on an invalid submission.
    async fn on_invalid(&self, errors: &[FieldError]) -> anyhow::Result<()>;
}

/// Render-layer change feed.
///
/// Invoked synchronously once per discrete edit, after the derived sets
/// have been recomputed. Receives read-only views; the snapshot stays
/// owned by the engine.
pub trait ChangeListener: Send + Sync {
    /// One value changed; `errors` reflects the configured validation
    /// mode and `exemptions` covers every key currently in the snapshot.
    fn on_change(&self, values: &FormSnapshot, errors: &[FieldError], exemptions: &ExemptionMap);
}
