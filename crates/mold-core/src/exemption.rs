//! Validation-exemption derivation.
//!
//! An exemption is a runtime decision to waive an otherwise-failing
//! field's validation. The same per-key evaluation backs two contexts
//! with different candidate sets: the reactive pass over every key in the
//! snapshot, and the invalid-submit pass over only the errored keys. For
//! a given key and snapshot both always agree.

use std::collections::BTreeMap;

use crate::condition::all_hold;
use crate::field::FieldDescriptor;
use crate::snapshot::FormSnapshot;

/// Derived map: field key → "may this field's validation be skipped".
pub type ExemptionMap = BTreeMap<String, bool>;

/// Compute exemptions for every key currently present in the snapshot.
pub fn resolve_exemptions(fields: &[FieldDescriptor], snapshot: &FormSnapshot) -> ExemptionMap {
    resolve_exemptions_among(fields, snapshot, snapshot.keys().map(String::as_str))
}

/// Compute exemptions for an explicit candidate set.
///
/// A key is exempt iff it names a known field whose removal-condition
/// list is non-empty and every condition in it holds. Unknown keys and
/// fields with no removal conditions are never exempt.
pub fn resolve_exemptions_among<'a>(
    fields: &[FieldDescriptor],
    snapshot: &FormSnapshot,
    keys: impl IntoIterator<Item = &'a str>,
) -> ExemptionMap {
    keys.into_iter()
        .map(|key| {
            let field = fields.iter().find(|f| f.key == key);
            (key.to_string(), is_exempt(field, snapshot))
        })
        .collect()
}

fn is_exempt(field: Option<&FieldDescriptor>, snapshot: &FormSnapshot) -> bool {
    match field {
        Some(field) if !field.remove_validation_conditions.is_empty() => {
            all_hold(&field.remove_validation_conditions, snapshot)
        }
        _ => false,
    }
}
