//! Typed convenience operations over a `RemoteStore`.
//!
//! Thin wrappers converting between model instances and raw records at the
//! adapter boundary, so application code works with typed values end to end.

use refbase_types::{record_key, Model, RawRecord, Result};

use crate::store::RemoteStore;

/// Fetch one instance by key. `None` when the key does not exist.
pub async fn get<M, S>(store: &S, key: &str) -> Result<Option<M>>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    let record = store.fetch_by_key(M::TYPE_NAME, key).await?;
    record.as_ref().map(M::from_record).transpose()
}

/// Store an instance, writing the store-assigned key back onto it when it had
/// none.
pub async fn save<M, S>(store: &S, instance: &mut M) -> Result<()>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    let record = instance.to_record()?;
    let stored = store.put(M::TYPE_NAME, record).await?;
    adopt_key(instance, &stored);
    Ok(())
}

/// Store many instances in one adapter call, writing assigned keys back.
pub async fn save_many<M, S>(store: &S, instances: &mut [M]) -> Result<()>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    let records = instances
        .iter()
        .map(Model::to_record)
        .collect::<Result<Vec<RawRecord>>>()?;
    let stored = store.put_many(M::TYPE_NAME, records).await?;
    for (instance, record) in instances.iter_mut().zip(&stored) {
        adopt_key(instance, record);
    }
    Ok(())
}

/// Delete the stored record for a key. Missing keys are not errors.
pub async fn delete<M, S>(store: &S, key: &str) -> Result<()>
where
    M: Model,
    S: RemoteStore + ?Sized,
{
    store.delete(M::TYPE_NAME, key).await?;
    Ok(())
}

fn adopt_key<M: Model>(instance: &mut M, stored: &RawRecord) {
    if instance.key().is_none() {
        if let Some(key) = record_key(stored) {
            instance.set_key(key.to_string());
        }
    }
}
