//! The `Model` trait and static reference-field descriptors.
//!
//! A model is a declared record type living in one remote collection. Its
//! reference fields are declared once, statically, in [`Model::reference_fields`];
//! the resolution engine discovers edges from that table instead of inspecting
//! instances, so walking a model type costs nothing per instance.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cache::ResolutionCache;
use crate::error::{Error, Result};
use crate::record::RawRecord;

/// Whether a reference field holds one key or an ordered list of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Single,
    List,
}

/// One reference edge declaration: a field on the source model, the model type
/// it targets, and its arity. Declared in field declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceField {
    pub name: &'static str,
    pub target: &'static str,
    pub kind: ReferenceKind,
}

impl ReferenceField {
    pub const fn single(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            target,
            kind: ReferenceKind::Single,
        }
    }

    pub const fn list(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            target,
            kind: ReferenceKind::List,
        }
    }
}

/// The key values one reference field holds on one instance.
///
/// `Absent` covers unset single keys; an unset reference is valid and resolves
/// to no referenced object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRefs<'a> {
    Absent,
    One(&'a str),
    Many(Vec<&'a str>),
}

/// A declared record type stored in a remote collection.
///
/// Implementations supply the type name, key accessors, the static reference
/// table, and the attach hook; record conversion comes for free via serde.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + Sized + 'static {
    /// Collection/type name, globally unique within the model registry.
    const TYPE_NAME: &'static str;

    /// Primary key, if this instance has been assigned one.
    fn key(&self) -> Option<&str>;

    /// Record a store-assigned primary key on this instance.
    fn set_key(&mut self, key: String);

    /// Natural ordering attribute used by default sorting.
    fn sort_key(&self) -> String;

    /// Key and KeyList fields, in declaration order. Empty for models with no
    /// references.
    fn reference_fields() -> &'static [ReferenceField] {
        &[]
    }

    /// Key values a reference field holds on this instance. Must answer for
    /// every field named in [`Model::reference_fields`].
    fn reference_keys(&self, field: &'static str) -> KeyRefs<'_> {
        let _ = field;
        KeyRefs::Absent
    }

    /// Attach resolved referenced objects from a populated cache. The default
    /// is a no-op, correct for models without references.
    fn attach(&mut self, cache: &ResolutionCache) {
        let _ = cache;
    }

    /// Fields that identify a logical record for duplicate probing, or empty
    /// when the model has no identity beyond its key.
    fn identity_fields() -> &'static [&'static str] {
        &[]
    }

    /// Materialize an instance from a raw stored record.
    fn from_record(record: &RawRecord) -> Result<Self> {
        serde_json::from_value(Value::Object(record.clone())).map_err(|source| Error::Record {
            type_name: Self::TYPE_NAME,
            source,
        })
    }

    /// Serialize this instance to its raw stored representation.
    fn to_record(&self) -> Result<RawRecord> {
        let value = serde_json::to_value(self).map_err(|source| Error::Record {
            type_name: Self::TYPE_NAME,
            source,
        })?;
        match value {
            Value::Object(map) => Ok(map),
            other => Err(Error::Record {
                type_name: Self::TYPE_NAME,
                source: serde::ser::Error::custom(format!(
                    "model serialized to {other:?}, expected an object"
                )),
            }),
        }
    }
}

/// Normalize a natural-ordering attribute for comparison: lowercase, trimmed.
pub fn normalized_sort_key(value: &str) -> String {
    value.trim().to_lowercase()
}
