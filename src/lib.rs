//! refbase: typed record models over a remote key-value document store.
//!
//! Records live remotely as schemaless JSON documents grouped by model type.
//! Application code declares model structs that implement [`Model`], holds
//! typed references to other models through [`Key`] and [`KeyList`] fields,
//! and registers each model once under its declared type name. Resolution is
//! batched: resolving the references of a whole listing costs one
//! `fetch_by_keys` round trip per distinct target type, not one per instance.
//!
//! ```no_run
//! use std::sync::Arc;
//! use serde::{Deserialize, Serialize};
//! use refbase::prelude::*;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Person {
//!     key: Option<String>,
//!     fname: String,
//!     lname: String,
//! }
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Patient {
//!     key: Option<String>,
//!     #[serde(default)]
//!     person_key: Key<Person>,
//!     #[serde(skip)]
//!     person: Option<Arc<Person>>,
//! }
//! # impl Model for Person {
//! #     const TYPE_NAME: &'static str = "Person";
//! #     fn key(&self) -> Option<&str> { self.key.as_deref() }
//! #     fn set_key(&mut self, key: String) { self.key = Some(key); }
//! #     fn sort_key(&self) -> String { normalized_sort_key(&self.lname) }
//! # }
//! # impl Model for Patient {
//! #     const TYPE_NAME: &'static str = "Patient";
//! #     fn key(&self) -> Option<&str> { self.key.as_deref() }
//! #     fn set_key(&mut self, key: String) { self.key = Some(key); }
//! #     fn sort_key(&self) -> String { self.key.clone().unwrap_or_default() }
//! #     fn reference_fields() -> &'static [ReferenceField] {
//! #         const FIELDS: &[ReferenceField] = &[ReferenceField::single("person_key", "Person")];
//! #         FIELDS
//! #     }
//! #     fn reference_keys(&self, field: &'static str) -> KeyRefs<'_> {
//! #         match field {
//! #             "person_key" => self.person_key.key_refs(),
//! #             _ => KeyRefs::Absent,
//! #         }
//! #     }
//! #     fn attach(&mut self, cache: &ResolutionCache) {
//! #         self.person = self.person_key.get().and_then(|k| cache.get::<Person>(k));
//! #     }
//! # }
//!
//! async fn listing(store: &impl RemoteStore) -> refbase::Result<Vec<Patient>> {
//!     refbase::register::<Person>()?;
//!     refbase::register::<Patient>()?;
//!     sorted_instances_list_by(store, |t: &Patient| {
//!         t.person.as_ref().map(|p| p.lname.clone()).unwrap_or_default()
//!     })
//!     .await
//! }
//! ```

pub use refbase_resolver::{
    attach, attach_all, collect_required_keys, exists, instances_list, is_registered, register,
    registered_models, resolve_references, resolve_references_with, schema,
    sorted_instances_list, sorted_instances_list_by, ModelSchema, RequiredKeys, ResolveOptions,
};
pub use refbase_store::{ops, MemoryStore, RemoteStore, StoreOp};
pub use refbase_types::{
    normalized_sort_key, record_key, set_record_key, Error, Key, KeyList, KeyRefs, Model,
    RawRecord, ReferenceField, ReferenceKind, ResolutionCache, Result, StoreError, KEY_FIELD,
};

/// One-line import for model declarations and listing calls.
pub mod prelude {
    pub use refbase_resolver::{
        attach, attach_all, instances_list, resolve_references, sorted_instances_list,
        sorted_instances_list_by, ResolveOptions,
    };
    pub use refbase_store::RemoteStore;
    pub use refbase_types::{
        normalized_sort_key, Key, KeyList, KeyRefs, Model, RawRecord, ReferenceField,
        ResolutionCache,
    };
}
