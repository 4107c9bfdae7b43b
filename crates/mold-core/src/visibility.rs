//! Visible-field derivation.

use std::collections::BTreeSet;

use crate::condition::all_hold;
use crate::field::FieldDescriptor;
use crate::snapshot::FormSnapshot;

/// Derived set of currently visible field keys.
pub type VisibleFieldSet = BTreeSet<String>;

/// Compute the set of visible field keys.
///
/// A field with no display conditions is always visible; otherwise it is
/// visible iff every condition in its list holds against the snapshot.
/// Total function of `(fields, snapshot)` — nothing is memoized across
/// calls.
///
/// Visibility does not cascade: a condition referencing a field that is
/// itself hidden still reads that field's live value. Only a field's own
/// display conditions apply.
pub fn resolve_visible(fields: &[FieldDescriptor], snapshot: &FormSnapshot) -> VisibleFieldSet {
    fields
        .iter()
        .filter(|field| {
            field.display_conditions.is_empty() || all_hold(&field.display_conditions, snapshot)
        })
        .map(|field| field.key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, ConditionOp};
    use serde_json::json;

    fn password_gated_on_email() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("email"),
            FieldDescriptor::new("password")
                .display_when(Condition::new("email", ConditionOp::Eq, json!("admin@x.com"))),
        ]
    }

    #[test]
    fn unconditional_fields_are_always_visible() {
        let fields = vec![FieldDescriptor::new("email"), FieldDescriptor::new("name")];
        let visible = resolve_visible(&fields, &FormSnapshot::new());

        assert!(visible.contains("email"));
        assert!(visible.contains("name"));
    }

    #[test]
    fn matching_condition_shows_the_field() {
        let fields = password_gated_on_email();
        let snapshot = FormSnapshot::from_iter([("email".to_string(), json!("admin@x.com"))]);

        let visible = resolve_visible(&fields, &snapshot);
        assert!(visible.contains("password"));
    }

    #[test]
    fn failing_condition_hides_the_field() {
        let fields = password_gated_on_email();
        let snapshot = FormSnapshot::from_iter([("email".to_string(), json!("other@x.com"))]);

        let visible = resolve_visible(&fields, &snapshot);
        assert!(!visible.contains("password"));
        assert!(visible.contains("email"));
    }

    #[test]
    fn any_failing_condition_hides() {
        let fields = vec![FieldDescriptor::new("discount")
            .display_when(Condition::new("member", ConditionOp::Eq, json!(true)))
            .display_when(Condition::new("age", ConditionOp::Ge, json!(65)))];
        let snapshot = FormSnapshot::from_iter([
            ("member".to_string(), json!(true)),
            ("age".to_string(), json!(40)),
        ]);

        assert!(resolve_visible(&fields, &snapshot).is_empty());
    }

    #[test]
    fn no_transitive_cascade_through_hidden_dependencies() {
        // "extra" depends on "password", which is itself hidden; the live
        // value of "password" is still what decides "extra".
        let mut fields = password_gated_on_email();
        fields.push(
            FieldDescriptor::new("extra")
                .display_when(Condition::new("password", ConditionOp::Eq, json!("hunter2"))),
        );
        let snapshot = FormSnapshot::from_iter([
            ("email".to_string(), json!("other@x.com")),
            ("password".to_string(), json!("hunter2")),
        ]);

        let visible = resolve_visible(&fields, &snapshot);
        assert!(!visible.contains("password"));
        assert!(visible.contains("extra"));
    }
}
