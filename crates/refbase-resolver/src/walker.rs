//! Reference graph walking.
//!
//! Pure, non-suspending computation: given instances (or raw records) of a
//! model type, produce the set of `(target type, key)` pairs required to
//! resolve their references. Overlapping keys across instances are collapsed
//! here, before any store call is issued — that dedup is what makes one
//! batched fetch per target type possible.

use std::collections::{BTreeMap, BTreeSet};

use refbase_types::{record, KeyRefs, Model, RawRecord, ReferenceField, ReferenceKind};

/// Keys required to resolve one level of references, grouped by target type.
///
/// Ordered maps so fetch issue order is deterministic.
pub type RequiredKeys = BTreeMap<&'static str, BTreeSet<String>>;

/// Union the reference keys of a homogeneous batch of instances, grouped by
/// target type. Unset keys are skipped; a model without reference fields
/// yields an empty map.
pub fn collect_required_keys<M: Model>(instances: &[M]) -> RequiredKeys {
    let mut required = RequiredKeys::new();
    for instance in instances {
        for field in M::reference_fields() {
            match instance.reference_keys(field.name) {
                KeyRefs::Absent => {}
                KeyRefs::One(key) => {
                    required.entry(field.target).or_default().insert(key.to_string());
                }
                KeyRefs::Many(keys) => {
                    let group = required.entry(field.target).or_default();
                    for key in keys {
                        if !key.is_empty() {
                            group.insert(key.to_string());
                        }
                    }
                }
            }
        }
    }
    required.retain(|_, keys| !keys.is_empty());
    required
}

/// Read the key values of one reference field out of a raw record.
///
/// Used for transitive levels, where referenced records are walked without
/// materializing typed instances. Null, missing, and empty values yield no
/// keys.
pub fn record_reference_keys(rec: &RawRecord, field: &ReferenceField) -> Vec<String> {
    match field.kind {
        ReferenceKind::Single => record::string_field(rec, field.name)
            .map(|key| vec![key.to_string()])
            .unwrap_or_default(),
        ReferenceKind::List => record::string_list_field(rec, field.name)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
