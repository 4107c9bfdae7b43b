//! Single-condition evaluation against the live value snapshot.
//!
//! A [`Condition`] compares the current value of one field against a fixed
//! operand. Conditions never fail: a comparison that cannot be performed
//! (missing operand, mismatched types) evaluates to `false`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::snapshot::FormSnapshot;

/// Comparison operators recognized in field conditions.
///
/// Serialized with the wire spellings used by form definitions
/// (`===`, `!==`, `<`, `<=`, `>`, `>=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOp {
    /// Strict equality
    #[serde(rename = "===")]
    Eq,
    /// Strict inequality
    #[serde(rename = "!==")]
    Ne,
    /// Less than
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal
    #[serde(rename = "<=")]
    Le,
    /// Greater than
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal
    #[serde(rename = ">=")]
    Ge,
}

impl ConditionOp {
    /// True for the four ordering operators.
    pub fn is_ordering(&self) -> bool {
        matches!(self, ConditionOp::Lt | ConditionOp::Le | ConditionOp::Gt | ConditionOp::Ge)
    }
}

/// How a condition combines with the rest of its list.
///
/// Only `And` exists. The field is carried for wire compatibility with
/// existing form definitions and is never consulted during evaluation;
/// condition lists are always AND-ed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionRelation {
    /// Conjunction with the other conditions in the list.
    #[default]
    And,
}

/// A single comparison test against another field's live value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Key of the field whose value is inspected.
    pub dependent_field: String,
    /// Comparison operator.
    pub operator: ConditionOp,
    /// Fixed operand the live value is compared against.
    pub dependent_field_value: Value,
    /// Vestigial combinator, always AND. See [`ConditionRelation`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<ConditionRelation>,
}

impl Condition {
    /// Build a condition on `dependent_field`.
    pub fn new(
        dependent_field: impl Into<String>,
        operator: ConditionOp,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            dependent_field: dependent_field.into(),
            operator,
            dependent_field_value: value.into(),
            relation: None,
        }
    }

    /// Evaluate this condition against the current snapshot.
    ///
    /// A field with no value yet compares as JSON null.
    pub fn evaluate(&self, snapshot: &FormSnapshot) -> bool {
        let actual = snapshot.get(&self.dependent_field).unwrap_or(&Value::Null);
        let expected = &self.dependent_field_value;

        match self.operator {
            ConditionOp::Eq => value_eq(actual, expected),
            ConditionOp::Ne => !value_eq(actual, expected),
            ConditionOp::Lt => matches!(value_cmp(actual, expected), Some(Ordering::Less)),
            ConditionOp::Le => matches!(
                value_cmp(actual, expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            ConditionOp::Gt => matches!(value_cmp(actual, expected), Some(Ordering::Greater)),
            ConditionOp::Ge => matches!(
                value_cmp(actual, expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

/// All conditions in the list hold. Empty lists hold vacuously; callers
/// decide what an empty list means for their derived set.
pub fn all_hold(conditions: &[Condition], snapshot: &FormSnapshot) -> bool {
    conditions.iter().all(|c| c.evaluate(snapshot))
}

/// Strict equality with one carve-out: numbers compare by numeric value
/// regardless of integer/float representation. Everything else is
/// structural equality with no coercion.
pub(crate) fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        _ => a == b,
    }
}

/// Ordering across two values: number↔number by numeric value,
/// string↔string lexicographic. Any other pairing is not comparable.
fn value_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64()?, y.as_f64()?);
            x.partial_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn snapshot_with(key: &str, value: Value) -> FormSnapshot {
        FormSnapshot::from_iter([(key.to_string(), value)])
    }

    #[test_case(json!("admin@x.com"), ConditionOp::Eq, json!("admin@x.com"), true; "string equality")]
    #[test_case(json!("other@x.com"), ConditionOp::Eq, json!("admin@x.com"), false; "string inequality under eq")]
    #[test_case(json!(1), ConditionOp::Eq, json!(1.0), true; "int equals float by value")]
    #[test_case(json!("1"), ConditionOp::Eq, json!(1), false; "no coercion across types")]
    #[test_case(json!(2), ConditionOp::Ne, json!(3), true; "number not equal")]
    #[test_case(json!(5), ConditionOp::Lt, json!(10), true; "number less than")]
    #[test_case(json!(10), ConditionOp::Le, json!(10), true; "number less or equal")]
    #[test_case(json!(11), ConditionOp::Gt, json!(10), true; "number greater than")]
    #[test_case(json!(10), ConditionOp::Ge, json!(10.0), true; "number greater or equal")]
    #[test_case(json!("apple"), ConditionOp::Lt, json!("banana"), true; "string ordering")]
    #[test_case(json!("5"), ConditionOp::Lt, json!(10), false; "mixed types not comparable")]
    #[test_case(json!(true), ConditionOp::Gt, json!(false), false; "booleans not comparable")]
    fn operator_table(actual: Value, operator: ConditionOp, expected: Value, holds: bool) {
        let snapshot = snapshot_with("x", actual);
        let condition = Condition::new("x", operator, expected);
        assert_eq!(condition.evaluate(&snapshot), holds);
    }

    #[test]
    fn missing_field_reads_as_null() {
        let snapshot = FormSnapshot::new();

        assert!(Condition::new("missing", ConditionOp::Eq, Value::Null).evaluate(&snapshot));
        assert!(Condition::new("missing", ConditionOp::Ne, json!("x")).evaluate(&snapshot));
        assert!(!Condition::new("missing", ConditionOp::Lt, json!(10)).evaluate(&snapshot));
    }

    #[test]
    fn evaluation_has_no_side_effects() {
        let snapshot = snapshot_with("x", json!(1));
        let condition = Condition::new("x", ConditionOp::Eq, json!(1));

        assert!(condition.evaluate(&snapshot));
        assert!(condition.evaluate(&snapshot));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn wire_spellings_round_trip() {
        let condition: Condition = serde_json::from_str(
            r#"{"dependentField":"email","operator":"===","dependentFieldValue":"admin@x.com","relation":"and"}"#,
        )
        .unwrap();

        assert_eq!(condition.operator, ConditionOp::Eq);
        assert_eq!(condition.relation, Some(ConditionRelation::And));

        let encoded = serde_json::to_value(&condition).unwrap();
        assert_eq!(encoded["operator"], json!("==="));
    }

    #[test]
    fn relation_never_changes_and_semantics() {
        // One passing and one failing condition must fail the list even
        // when a relation is present on the failing entry.
        let snapshot = snapshot_with("x", json!(5));
        let mut second = Condition::new("x", ConditionOp::Gt, json!(10));
        second.relation = Some(ConditionRelation::And);
        let conditions = vec![Condition::new("x", ConditionOp::Eq, json!(5)), second];

        assert!(!all_hold(&conditions, &snapshot));
    }
}
