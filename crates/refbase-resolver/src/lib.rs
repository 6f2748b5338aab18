//! Reference resolution over a remote record store.
//!
//! The crate is organized as a pipeline:
//!
//! - [`registry`]: process-wide map from declared type names to model schemas.
//! - [`walker`]: pure collection of the `(target type, key)` pairs a batch of
//!   instances needs resolved.
//! - [`resolve`]: the batched fetch loop — one `fetch_by_keys` per distinct
//!   target type per level, populating a request-scoped cache.
//! - [`materialize`]: attach passes and sorted listings built on top of the
//!   resolved cache.

pub mod materialize;
pub mod registry;
pub mod resolve;
pub mod walker;

#[cfg(test)]
pub(crate) mod testutil;

pub use materialize::{
    attach, attach_all, exists, instances_list, sorted_instances_list, sorted_instances_list_by,
};
pub use registry::{is_registered, register, registered_models, schema, ModelSchema};
pub use resolve::{resolve_references, resolve_references_with, ResolveOptions};
pub use walker::{collect_required_keys, record_reference_keys, RequiredKeys};
