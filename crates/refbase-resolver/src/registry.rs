//! Process-wide model registry.
//!
//! Maps a declared type name to its [`ModelSchema`] so a target type can be
//! resolved purely from the string found in a reference-field declaration.
//! Populated once per model type at composition time, read-only thereafter;
//! it holds no external resources, so there is no teardown.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use refbase_types::{Error, Model, RawRecord, ReferenceField, Result};

/// Everything the resolver needs to know about a registered model type:
/// its name, its static reference-field table, and how to materialize a raw
/// record into a typed instance.
#[derive(Debug, Clone, Copy)]
pub struct ModelSchema {
    pub type_name: &'static str,
    pub reference_fields: &'static [ReferenceField],
    pub parse: fn(&RawRecord) -> Result<Arc<dyn Any + Send + Sync>>,
    type_id: TypeId,
}

fn registry() -> &'static RwLock<HashMap<&'static str, ModelSchema>> {
    static REGISTRY: OnceLock<RwLock<HashMap<&'static str, ModelSchema>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Register a model type under its declared name.
///
/// Insertion-only: registering a second, distinct type under a taken name
/// fails with [`Error::DuplicateModel`]. Re-registering the same type is
/// accepted and does nothing, so registration hooks may run more than once.
pub fn register<M: Model>() -> Result<()> {
    let schema = ModelSchema {
        type_name: M::TYPE_NAME,
        reference_fields: M::reference_fields(),
        parse: parse_record::<M>,
        type_id: TypeId::of::<M>(),
    };

    let mut models = registry().write();
    match models.get(M::TYPE_NAME) {
        Some(existing) if existing.type_id == schema.type_id => Ok(()),
        Some(_) => Err(Error::DuplicateModel {
            type_name: M::TYPE_NAME,
        }),
        None => {
            models.insert(M::TYPE_NAME, schema);
            Ok(())
        }
    }
}

/// Look up the schema registered under a type name.
///
/// An absent name is a configuration error ([`Error::UnknownModel`]), not a
/// missing-data error: reference targets must be registered before resolution
/// is attempted.
pub fn schema(type_name: &str) -> Result<ModelSchema> {
    registry()
        .read()
        .get(type_name)
        .copied()
        .ok_or_else(|| Error::UnknownModel {
            type_name: type_name.to_string(),
        })
}

pub fn is_registered(type_name: &str) -> bool {
    registry().read().contains_key(type_name)
}

/// Names of all registered models, sorted.
pub fn registered_models() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = registry().read().keys().copied().collect();
    names.sort_unstable();
    names
}

fn parse_record<M: Model>(record: &RawRecord) -> Result<Arc<dyn Any + Send + Sync>> {
    Ok(Arc::new(M::from_record(record)?) as Arc<dyn Any + Send + Sync>)
}
