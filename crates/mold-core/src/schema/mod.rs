//! Validation schema: rules, compilation, and error types.
//!
//! The schema surface is deliberately opaque: consumers program against
//! [`ValidationSchema`], never against a concrete validation library.
//! [`compile`] builds the aggregate schema for one field list; violations
//! it produces are engine-internal and are sanitized to [`FieldError`]s
//! before leaving the engine.

mod compiler;
mod rule;

pub use compiler::{compile, CompiledSchema};
pub use rule::{Check, CheckKind, CustomCheck, Rule};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::snapshot::FormSnapshot;

/// A per-field validation failure as produced by schema evaluation.
///
/// Carries the rejected value for diagnostics; sanitize before handing
/// anything to an external collaborator.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Key of the failing field.
    pub path: String,
    /// Stable name of the failed check.
    pub check: String,
    /// Failure message from the rule chain.
    pub message: String,
    /// The value that failed the check.
    pub rejected: Value,
}

impl Violation {
    /// Strip engine internals, keeping only user-facing error metadata.
    pub fn sanitize(&self) -> FieldError {
        FieldError {
            path: self.path.clone(),
            error_type: self.check.clone(),
            message: self.message.clone(),
        }
    }
}

/// User-facing validation error: message, type, and path only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Key of the failing field.
    pub path: String,
    /// Stable name of the failed check.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Failure message.
    pub message: String,
}

/// Sanitize a batch of violations in order.
pub fn sanitize_violations(violations: &[Violation]) -> Vec<FieldError> {
    violations.iter().map(Violation::sanitize).collect()
}

/// Aggregate validation schema over a field list.
///
/// One installed rule per constrained field key; keys without a rule
/// accept any value.
pub trait ValidationSchema: Send + Sync {
    /// Validate one value under one key. `None` means accepted.
    fn validate(&self, key: &str, value: &Value) -> Option<Violation>;

    /// Validate the whole snapshot against every installed rule. A key
    /// with no value in the snapshot validates as JSON null, so
    /// `required` fires for untouched fields.
    fn validate_snapshot(&self, snapshot: &FormSnapshot) -> Vec<Violation>;
}
