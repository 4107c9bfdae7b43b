//! # mold-core
//!
//! The conditional form-state engine behind `mold`: a declarative,
//! schema-driven form layer for component-based reactive UIs.
//!
//! Given a list of [`FieldDescriptor`]s, the engine compiles an aggregate
//! validation schema, tracks which fields are currently visible, decides
//! which field validations may be dynamically waived based on other field
//! values, and reconciles all of that with a submit lifecycle. Rendering,
//! styling, and storage backends are external collaborators reached
//! through the traits in [`traits`].
//!
//! ```rust,no_run
//! use mold_core::{
//!     Condition, ConditionOp, FieldDescriptor, FormConfig, FormEngine, FormIdentity, Rule,
//! };
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fields = vec![
//!         FieldDescriptor::new("email").validation(Rule::new().required("email is required")),
//!         FieldDescriptor::new("password")
//!             .validation(Rule::new().min_length(8, "password too short"))
//!             .display_when(Condition::new("email", ConditionOp::Eq, json!("admin@x.com"))),
//!     ];
//!
//!     let mut engine = FormEngine::new(fields, FormIdentity::new("login"), FormConfig::default());
//!     engine.initialize(None).await?;
//!     engine.set_value("email", json!("admin@x.com"))?;
//!     let outcome = engine.submit().await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod exemption;
pub mod field;
pub mod grid;
pub mod identity;
pub mod schema;
pub mod snapshot;
pub mod traits;
pub mod visibility;

pub use condition::{Condition, ConditionOp, ConditionRelation};
pub use config::{FormConfig, PersistMode, RevalidateMode, ValidationMode};
pub use engine::{FormEngine, SubmitOutcome};
pub use error::{EngineError, EngineResult};
pub use exemption::{resolve_exemptions, resolve_exemptions_among, ExemptionMap};
pub use field::FieldDescriptor;
pub use grid::grid_rows;
pub use identity::FormIdentity;
pub use schema::{
    compile, sanitize_violations, CompiledSchema, FieldError, Rule, ValidationSchema, Violation,
};
pub use snapshot::FormSnapshot;
pub use traits::{ChangeListener, ResponseStore, StoreError, StoreResult, SubmitHandler};
pub use visibility::{resolve_visible, VisibleFieldSet};
