//! Batched reference resolution.
//!
//! One resolution operation walks the references of a batch of instances,
//! issues one `fetch_by_keys` per distinct target type per level — the fetches
//! for different types run concurrently and are joined before anything else
//! happens — and populates a request-scoped [`ResolutionCache`]. The store
//! call count is O(distinct target types), never O(instances × reference
//! fields).
//!
//! A failed fetch fails the whole operation: the cache under construction is
//! dropped, so callers never observe partial resolution.

use std::collections::BTreeSet;

use futures::future;
use tracing::debug;

use refbase_store::RemoteStore;
use refbase_types::{Error, Model, ResolutionCache, Result, StoreError};

use crate::registry::{self, ModelSchema};
use crate::walker::{collect_required_keys, record_reference_keys, RequiredKeys};

/// Options for one resolution operation.
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    /// How many reference levels to resolve. Level one covers the immediate
    /// references of the requested instances; deeper levels walk the
    /// referenced records' own references. The bound is what terminates
    /// type-level reference cycles.
    pub depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { depth: 1 }
    }
}

impl ResolveOptions {
    pub fn depth(depth: usize) -> Self {
        Self { depth }
    }
}

/// Resolve the immediate references of a batch of instances.
///
/// Equivalent to [`resolve_references_with`] at the default depth of one.
pub async fn resolve_references<M, S>(store: &S, instances: &[M]) -> Result<ResolutionCache>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    resolve_references_with(store, instances, ResolveOptions::default()).await
}

/// Resolve references to a bounded depth and return the populated cache.
///
/// Does not mutate the input instances; attaching resolved objects is a
/// separate pass so one cache can serve several attach passes.
pub async fn resolve_references_with<M, S>(
    store: &S,
    instances: &[M],
    options: ResolveOptions,
) -> Result<ResolutionCache>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    let mut cache = ResolutionCache::new();
    let mut required = collect_required_keys(instances);

    for level in 0..options.depth {
        // Keys resolved at an earlier level need no second fetch.
        for (type_name, keys) in required.iter_mut() {
            keys.retain(|key| !cache.contains(type_name, key));
        }
        required.retain(|_, keys| !keys.is_empty());
        if required.is_empty() {
            break;
        }

        // Every target type must resolve in the registry before any fetch is
        // issued; an unknown target aborts the operation up front.
        let schemas = required
            .keys()
            .map(|type_name| registry::schema(type_name))
            .collect::<Result<Vec<ModelSchema>>>()?;

        debug!(
            level,
            types = required.len(),
            keys = required.values().map(BTreeSet::len).sum::<usize>(),
            "resolving references"
        );

        // One batched fetch per target type, all in flight together. The join
        // is the barrier: nothing is cached until every fetch has returned,
        // and the first failure cancels the rest.
        let fetches = schemas.iter().zip(required.values()).map(|(schema, keys)| {
            let type_name = schema.type_name;
            async move {
                let records = store.fetch_by_keys(type_name, keys).await?;
                Ok::<_, StoreError>(records)
            }
        });
        let results = future::try_join_all(fetches).await.map_err(Error::from)?;

        let mut next = RequiredKeys::new();
        for (schema, records) in schemas.iter().zip(results) {
            debug!(
                type_name = schema.type_name,
                fetched = records.len(),
                "populated cache"
            );
            for (key, record) in &records {
                if cache.contains(schema.type_name, key) {
                    continue;
                }
                // Next-level edges come from the raw record, before
                // materialization.
                for field in schema.reference_fields {
                    for next_key in record_reference_keys(record, field) {
                        next.entry(field.target).or_default().insert(next_key);
                    }
                }
                let resolved = (schema.parse)(record)?;
                cache.insert(schema.type_name, key.clone(), resolved);
            }
        }
        required = next;
    }

    Ok(cache)
}
