//! Shared types for the refbase workspace.
//!
//! This crate provides canonical definitions used across the workspace:
//! - [`record`]: the raw JSON-object representation records take at the store boundary
//! - [`key`]: typed key markers ([`Key`], [`KeyList`]) declaring reference fields
//! - [`model`]: the [`Model`] trait and static reference-field descriptors
//! - [`cache`]: the request-scoped [`ResolutionCache`] populated by batch resolution
//! - [`error`]: the error taxonomy shared by the store adapter and the resolver
//!
//! ## Design Principles
//!
//! 1. **String keys for JSON compatibility**: primary keys are plain strings, matching
//!    the store's wire representation, with typing carried by the `Key<M>` marker.
//!
//! 2. **Leaf crate**: `refbase-store` and `refbase-resolver` both depend on this crate
//!    so they can exchange records, cache handles, and errors without a crate cycle.

pub mod cache;
pub mod error;
pub mod key;
pub mod model;
pub mod record;

pub use cache::ResolutionCache;
pub use error::{Error, Result, StoreError};
pub use key::{Key, KeyList};
pub use model::{normalized_sort_key, KeyRefs, Model, ReferenceField, ReferenceKind};
pub use record::{record_key, set_record_key, RawRecord, KEY_FIELD};
