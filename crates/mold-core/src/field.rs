//! Field declarations.

use serde_json::Value;

use crate::condition::Condition;
use crate::schema::Rule;

/// One form field's full declaration.
///
/// Everything the engine derives — visibility, exemptions, the compiled
/// validation schema — is a function of the descriptor list plus the live
/// snapshot. The render metadata (`label`, `placeholder`, `span`) is inert
/// data carried for the consuming render layer.
///
/// Keys must be unique within a form; the engine assumes this and does not
/// validate it.
#[derive(Debug, Clone, Default)]
pub struct FieldDescriptor {
    /// Unique path-like key of this field within the value object.
    pub key: String,
    /// Optional composable validation rule; `None` means unconstrained.
    pub validation: Option<Rule>,
    /// Conditions gating visibility. Empty means always visible.
    pub display_conditions: Vec<Condition>,
    /// Conditions under which validation is waived. Empty means never.
    pub remove_validation_conditions: Vec<Condition>,
    /// Seed value used when neither the store nor the caller provides one.
    pub default_value: Option<Value>,
    /// Display label.
    pub label: Option<String>,
    /// Input placeholder.
    pub placeholder: Option<String>,
    /// Grid column span, clamped to the grid width at layout time.
    pub span: u16,
}

impl FieldDescriptor {
    /// Start a descriptor for `key` with no constraints.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            span: 1,
            ..Self::default()
        }
    }

    /// Attach the validation rule.
    #[must_use]
    pub fn validation(mut self, rule: Rule) -> Self {
        self.validation = Some(rule);
        self
    }

    /// Add a display condition. All display conditions must hold for the
    /// field to be visible.
    #[must_use]
    pub fn display_when(mut self, condition: Condition) -> Self {
        self.display_conditions.push(condition);
        self
    }

    /// Add a validation-removal condition. Validation is waived only when
    /// the list is non-empty and every condition holds.
    #[must_use]
    pub fn remove_validation_when(mut self, condition: Condition) -> Self {
        self.remove_validation_conditions.push(condition);
        self
    }

    /// Set the seed value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the input placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the grid column span.
    #[must_use]
    pub fn span(mut self, span: u16) -> Self {
        self.span = span;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ConditionOp;
    use serde_json::json;

    #[test]
    fn builder_accumulates_conditions() {
        let field = FieldDescriptor::new("password")
            .display_when(Condition::new("email", ConditionOp::Eq, json!("admin@x.com")))
            .display_when(Condition::new("age", ConditionOp::Ge, json!(18)))
            .remove_validation_when(Condition::new("email", ConditionOp::Ne, json!("admin@x.com")))
            .label("Password")
            .span(2);

        assert_eq!(field.key, "password");
        assert_eq!(field.display_conditions.len(), 2);
        assert_eq!(field.remove_validation_conditions.len(), 1);
        assert_eq!(field.label.as_deref(), Some("Password"));
        assert_eq!(field.span, 2);
    }

    #[test]
    fn new_field_is_unconstrained() {
        let field = FieldDescriptor::new("notes");

        assert!(field.validation.is_none());
        assert!(field.display_conditions.is_empty());
        assert!(field.remove_validation_conditions.is_empty());
        assert_eq!(field.span, 1);
    }
}
