//! Recognized engine options.

use serde::{Deserialize, Serialize};

/// When validation sweeps run relative to edits and submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Validate only when the form is submitted.
    #[default]
    OnSubmit,
    /// Validate on every edit; change notifications carry live errors.
    OnChange,
}

/// Whether edits after a failed submit re-sweep the known errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevalidateMode {
    /// Re-sweep on every edit while errors are outstanding.
    #[default]
    OnChange,
    /// Leave errors untouched until the next submit.
    OnSubmit,
}

/// Which response-store backend persists form values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// No persistence.
    #[default]
    None,
    /// Keyed in-process store, lives for the application session.
    Session,
    /// Durable keyed store on disk.
    Durable,
}

/// Engine configuration.
///
/// Everything defaults to the richest behavior: conditional rendering on,
/// validations on, no persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Recompute visibility and exemptions on every change. When off,
    /// every field is always visible, nothing is ever exempted, and the
    /// invalid-submit override path never triggers.
    pub enable_conditional_rendering: bool,
    /// Compile and apply the validation schema. When off, the schema
    /// accepts any value for any key.
    pub enable_validations: bool,
    /// When validation sweeps run for change notifications.
    pub validation_mode: ValidationMode,
    /// Whether edits re-sweep errors after a failed submit.
    pub revalidate_mode: RevalidateMode,
    /// Response-store backend selection.
    pub persist_mode: PersistMode,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            enable_conditional_rendering: true,
            enable_validations: true,
            validation_mode: ValidationMode::default(),
            revalidate_mode: RevalidateMode::default(),
            persist_mode: PersistMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_the_full_engine() {
        let config = FormConfig::default();

        assert!(config.enable_conditional_rendering);
        assert!(config.enable_validations);
        assert_eq!(config.validation_mode, ValidationMode::OnSubmit);
        assert_eq!(config.revalidate_mode, RevalidateMode::OnChange);
        assert_eq!(config.persist_mode, PersistMode::None);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: FormConfig =
            serde_json::from_str(r#"{"validation_mode":"on_change","persist_mode":"durable"}"#)
                .unwrap();

        assert_eq!(config.validation_mode, ValidationMode::OnChange);
        assert_eq!(config.persist_mode, PersistMode::Durable);
        assert!(config.enable_validations);
    }
}
