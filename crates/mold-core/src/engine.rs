//! The conditional form-state engine.
//!
//! [`FormEngine`] owns the live snapshot and every set derived from it:
//! the visible-field set, the exemption map, the compiled schema, and the
//! last known validation errors. It reconciles those with the submit
//! lifecycle (`Idle → Submitting → Idle`) and pushes change
//! notifications to the render layer.
//!
//! The engine is single-threaded and cooperative. A value change runs to
//! completion synchronously; only the persistence write is spawned off.
//! A submit holds the engine exclusively across its handler await and
//! touches no derived state during it besides the loading flag.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{FormConfig, RevalidateMode, ValidationMode};
use crate::error::{EngineError, EngineResult};
use crate::exemption::{self, ExemptionMap};
use crate::field::FieldDescriptor;
use crate::identity::FormIdentity;
use crate::schema::{compile, sanitize_violations, CompiledSchema, FieldError, ValidationSchema};
use crate::snapshot::FormSnapshot;
use crate::traits::{ChangeListener, ResponseStore, SubmitHandler};
use crate::visibility::{self, VisibleFieldSet};

/// How a submit resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every installed rule passed (or validations were disabled).
    Valid,
    /// Validation failed, but every errored field was exempted; the
    /// submission was treated as valid with the current values.
    ValidByOverride,
    /// Validation failed and at least one errored field was not
    /// exempted. Carries the sanitized errors handed to the failure
    /// handler.
    Invalid(Vec<FieldError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Ready,
    Submitting,
}

/// Owner of one form's state and submit lifecycle.
pub struct FormEngine {
    fields: Vec<FieldDescriptor>,
    identity: FormIdentity,
    config: FormConfig,
    schema: CompiledSchema,
    snapshot: FormSnapshot,
    visible: VisibleFieldSet,
    exemptions: ExemptionMap,
    errors: Vec<FieldError>,
    phase: Phase,
    detached: bool,
    store: Option<Arc<dyn ResponseStore>>,
    listener: Option<Arc<dyn ChangeListener>>,
    handler: Option<Arc<dyn SubmitHandler>>,
}

impl FormEngine {
    /// Create an engine for one field list. Call
    /// [`initialize`](Self::initialize) before any state operation.
    pub fn new(fields: Vec<FieldDescriptor>, identity: FormIdentity, config: FormConfig) -> Self {
        let schema = compile(&fields, config.enable_validations);
        Self {
            fields,
            identity,
            config,
            schema,
            snapshot: FormSnapshot::new(),
            visible: VisibleFieldSet::new(),
            exemptions: ExemptionMap::new(),
            errors: Vec::new(),
            phase: Phase::Created,
            detached: false,
            store: None,
            listener: None,
            handler: None,
        }
    }

    /// Attach the response store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ResponseStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Attach the render-layer change listener.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn ChangeListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Attach the application's submit handler.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn SubmitHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Seed the snapshot and derive the initial sets.
    ///
    /// Per field, the first present source wins: persisted store value,
    /// then caller-supplied default, then the field's own default value.
    pub async fn initialize(&mut self, defaults: Option<FormSnapshot>) -> EngineResult<()> {
        if self.phase != Phase::Created {
            return Err(EngineError::AlreadyInitialized);
        }

        let persisted = match &self.store {
            Some(store) => store.load(self.identity.derived_key()).await,
            None => None,
        };
        if persisted.is_some() {
            debug!(form = %self.identity.slug(), "seeding from persisted response");
        }

        let mut snapshot = FormSnapshot::new();
        for field in &self.fields {
            let seed = persisted
                .as_ref()
                .and_then(|p| p.get(&field.key))
                .or_else(|| defaults.as_ref().and_then(|d| d.get(&field.key)))
                .or(field.default_value.as_ref());
            if let Some(value) = seed {
                snapshot.insert(field.key.clone(), value.clone());
            }
        }

        self.snapshot = snapshot;
        self.recompute_derived();
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Apply one discrete edit.
    ///
    /// Synchronously recomputes the exemption map over every snapshot
    /// key, the visible set when conditional rendering is enabled, and
    /// notifies the change listener. The persistence write is
    /// fire-and-forget.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> EngineResult<()> {
        self.ensure_initialized()?;
        self.snapshot.insert(key.into(), value.into());
        self.after_change();
        Ok(())
    }

    /// Swap the field descriptor list, recompiling the schema and fully
    /// re-deriving visibility and exemptions.
    pub fn replace_fields(&mut self, fields: Vec<FieldDescriptor>) -> EngineResult<()> {
        self.ensure_initialized()?;
        self.fields = fields;
        self.schema = compile(&self.fields, self.config.enable_validations);
        self.after_change();
        Ok(())
    }

    /// Run the submit lifecycle once.
    ///
    /// Returns the outcome; handler failures are caught and logged, never
    /// surfaced here. Rejects a submit dispatched while another is in
    /// flight.
    pub async fn submit(&mut self) -> EngineResult<SubmitOutcome> {
        self.ensure_initialized()?;
        if self.phase == Phase::Submitting {
            return Err(EngineError::SubmitInFlight);
        }

        self.phase = Phase::Submitting;
        let outcome = self.run_submit().await;
        self.phase = Phase::Ready;
        Ok(outcome)
    }

    async fn run_submit(&mut self) -> SubmitOutcome {
        let violations = self.schema.validate_snapshot(&self.snapshot);
        if violations.is_empty() {
            self.errors.clear();
            self.invoke_valid().await;
            return SubmitOutcome::Valid;
        }

        let errors = sanitize_violations(&violations);
        if self.config.enable_conditional_rendering {
            let errored = errors.iter().map(|e| e.path.as_str());
            let exemptions =
                exemption::resolve_exemptions_among(&self.fields, &self.snapshot, errored);
            if exemptions.values().all(|exempt| *exempt) {
                debug!(
                    form = %self.identity.slug(),
                    exempted = exemptions.len(),
                    "all errored fields exempted; treating submission as valid"
                );
                self.errors.clear();
                self.invoke_valid().await;
                return SubmitOutcome::ValidByOverride;
            }
        }

        self.errors = errors.clone();
        self.invoke_invalid(&errors).await;
        SubmitOutcome::Invalid(errors)
    }

    /// Stop emitting change notifications; used at unmount.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    /// Write the current snapshot through to the store, awaited.
    pub async fn flush(&self) -> EngineResult<()> {
        self.ensure_initialized()?;
        if let Some(store) = &self.store {
            store.save(self.identity.derived_key(), &self.snapshot).await?;
        }
        Ok(())
    }

    /// The live values.
    pub fn values(&self) -> &FormSnapshot {
        &self.snapshot
    }

    /// The current visible-field set.
    pub fn visible_fields(&self) -> &VisibleFieldSet {
        &self.visible
    }

    /// Whether a specific field is currently visible.
    pub fn is_field_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    /// The current exemption map.
    pub fn exemptions(&self) -> &ExemptionMap {
        &self.exemptions
    }

    /// The last known validation errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// True only while a submit is in flight.
    pub fn submit_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// The form's identity.
    pub fn identity(&self) -> &FormIdentity {
        &self.identity
    }

    /// The field descriptors currently in effect.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn ensure_initialized(&self) -> EngineResult<()> {
        if self.phase == Phase::Created {
            return Err(EngineError::NotInitialized);
        }
        Ok(())
    }

    fn after_change(&mut self) {
        self.recompute_derived();

        let sweep = match (self.config.validation_mode, self.config.revalidate_mode) {
            (ValidationMode::OnChange, _) => true,
            (_, RevalidateMode::OnChange) => !self.errors.is_empty(),
            _ => false,
        };
        if sweep {
            self.errors = sanitize_violations(&self.schema.validate_snapshot(&self.snapshot));
        }

        self.notify_listener();
        self.persist_in_background();
    }

    fn recompute_derived(&mut self) {
        if self.config.enable_conditional_rendering {
            self.exemptions = exemption::resolve_exemptions(&self.fields, &self.snapshot);
            self.visible = visibility::resolve_visible(&self.fields, &self.snapshot);
        } else {
            self.exemptions = self.snapshot.keys().map(|key| (key.clone(), false)).collect();
            self.visible = self.fields.iter().map(|field| field.key.clone()).collect();
        }
    }

    fn notify_listener(&self) {
        if self.detached {
            return;
        }
        if let Some(listener) = &self.listener {
            listener.on_change(&self.snapshot, &self.errors, &self.exemptions);
        }
    }

    fn persist_in_background(&self) {
        let Some(store) = &self.store else { return };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(form = %self.identity.slug(), "no async runtime; skipping persistence write");
            return;
        };

        let store = Arc::clone(store);
        let namespace = self.identity.derived_key().to_string();
        let values = self.snapshot.clone();
        runtime.spawn(async move {
            if let Err(error) = store.save(&namespace, &values).await {
                warn!(%namespace, %error, "failed to persist form response");
            }
        });
    }

    async fn invoke_valid(&self) {
        let Some(handler) = &self.handler else { return };
        if let Err(error) = handler.on_valid(&self.snapshot).await {
            warn!(form = %self.identity.slug(), %error, "submit success handler failed");
        }
    }

    async fn invoke_invalid(&self, errors: &[FieldError]) {
        let Some(handler) = &self.handler else { return };
        if let Err(error) = handler.on_invalid(errors).await {
            warn!(form = %self.identity.slug(), %error, "submit failure handler failed");
        }
    }
}
