//! Schema compilation.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{Rule, ValidationSchema, Violation};
use crate::field::FieldDescriptor;
use crate::snapshot::FormSnapshot;

/// Build the aggregate schema for a field list.
///
/// With `enabled == false` the result is a no-op schema that accepts any
/// value for any key. Compilation is pure and deterministic; callers
/// recompile whenever the field list changes identity.
pub fn compile(fields: &[FieldDescriptor], enabled: bool) -> CompiledSchema {
    let rules = if enabled {
        fields
            .iter()
            .filter_map(|field| {
                field
                    .validation
                    .clone()
                    .filter(|rule| !rule.is_empty())
                    .map(|rule| (field.key.clone(), rule))
            })
            .collect()
    } else {
        BTreeMap::new()
    };

    CompiledSchema { rules, enabled }
}

/// The compiled form of one field list's validation rules.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    rules: BTreeMap<String, Rule>,
    enabled: bool,
}

impl CompiledSchema {
    /// Whether validations were enabled at compile time.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of installed rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl ValidationSchema for CompiledSchema {
    fn validate(&self, key: &str, value: &Value) -> Option<Violation> {
        let rule = self.rules.get(key)?;
        rule.first_failure(value).map(|check| Violation {
            path: key.to_string(),
            check: check.kind().name().to_string(),
            message: check.message().to_string(),
            rejected: value.clone(),
        })
    }

    fn validate_snapshot(&self, snapshot: &FormSnapshot) -> Vec<Violation> {
        self.rules
            .keys()
            .filter_map(|key| self.validate(key, snapshot.get(key).unwrap_or(&Value::Null)))
            .collect()
    }
}
