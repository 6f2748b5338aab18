//! Instance materialization, attachment, and sorted listings.
//!
//! The attach pass is pure and per-instance: it reads a populated
//! [`ResolutionCache`] and hands each instance its resolved referenced
//! objects. Listing operations compose fetch, resolve, attach, and a stable
//! sort into the one call sites actually want.

use tracing::debug;

use refbase_store::RemoteStore;
use refbase_types::{record_key, Error, Model, RawRecord, ResolutionCache, Result};

use crate::resolve::resolve_references;

/// Attach resolved referenced objects to one instance from a populated cache.
///
/// A key with no match in the cache attaches as absent; list references keep
/// their original key order with misses dropped.
pub fn attach<M: Model>(instance: &mut M, cache: &ResolutionCache) {
    instance.attach(cache);
}

/// Attach resolved referenced objects to every instance in a batch.
pub fn attach_all<M: Model>(instances: &mut [M], cache: &ResolutionCache) {
    for instance in instances.iter_mut() {
        instance.attach(cache);
    }
}

/// Fetch and materialize every instance of a model type, in fetch order.
pub async fn instances_list<M, S>(store: &S) -> Result<Vec<M>>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    let records = store.fetch_all(M::TYPE_NAME).await?;
    debug!(type_name = M::TYPE_NAME, count = records.len(), "materializing instances");
    records.iter().map(M::from_record).collect()
}

/// Fetch, resolve, attach, and sort every instance of a model type by its
/// natural ordering attribute.
pub async fn sorted_instances_list<M, S>(store: &S) -> Result<Vec<M>>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    sorted_instances_list_by(store, M::sort_key).await
}

/// Like [`sorted_instances_list`], with an explicit sort key function.
///
/// References are resolved and attached before the key function runs, so it
/// may read resolved-reference attributes. The sort is stable: equal keys
/// preserve fetch order.
pub async fn sorted_instances_list_by<M, S, K, F>(store: &S, sort_key: F) -> Result<Vec<M>>
where
    M: Model,
    S: RemoteStore + ?Sized,
    K: Ord,
    F: FnMut(&M) -> K,
{
    let mut instances: Vec<M> = instances_list(store).await?;
    let cache = resolve_references(store, &instances).await?;
    attach_all(&mut instances, &cache);
    instances.sort_by_key(sort_key);
    Ok(instances)
}

/// Probe the store for another record with the same identity as this
/// instance.
///
/// Identity is defined by [`Model::identity_fields`]; models without identity
/// fields never conflict. Returns the conflicting record when exactly one
/// matches; several matches are ambiguous and surface as [`Error::Conflict`].
pub async fn exists<M, S>(store: &S, instance: &M) -> Result<Option<RawRecord>>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    let fields = M::identity_fields();
    if fields.is_empty() {
        return Ok(None);
    }

    let probe = instance.to_record()?;
    let own_key = instance.key();
    let mut matches: Vec<RawRecord> = store
        .fetch_all(M::TYPE_NAME)
        .await?
        .into_iter()
        .filter(|record| own_key.is_none() || record_key(record) != own_key)
        .filter(|record| fields.iter().all(|field| record.get(*field) == probe.get(*field)))
        .collect();

    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => Err(Error::Conflict {
            type_name: M::TYPE_NAME,
            keys: matches
                .iter()
                .filter_map(|record| record_key(record))
                .map(str::to_string)
                .collect(),
        }),
    }
}
