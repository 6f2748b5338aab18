//! The `RemoteStore` contract consumed by the resolution core.
//!
//! One remote collection per model type, addressed by the type name. The core
//! never assumes ordering or pagination guarantees beyond "every existing key
//! in a request eventually appears in the result, in any order" — callers
//! index results by key, never by position.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

use refbase_types::{RawRecord, StoreError};

/// Async adapter over a remote key-value document store.
///
/// These methods are the only I/O boundary of the resolution core and its only
/// suspension points. Implementations own their transport, credentials, and
/// retry policy.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch every record in a type's collection.
    async fn fetch_all(&self, type_name: &str) -> Result<Vec<RawRecord>, StoreError>;

    /// Fetch one record by primary key. `None` when the key does not exist.
    async fn fetch_by_key(&self, type_name: &str, key: &str)
        -> Result<Option<RawRecord>, StoreError>;

    /// Fetch many records by key in one round trip.
    ///
    /// Keys absent from the store are omitted from the result, not errors.
    async fn fetch_by_keys(
        &self,
        type_name: &str,
        keys: &BTreeSet<String>,
    ) -> Result<HashMap<String, RawRecord>, StoreError>;

    /// Store a record, replacing any record with the same key. A record with
    /// no key is assigned a store-generated one. Returns the stored record,
    /// key included.
    async fn put(&self, type_name: &str, record: RawRecord) -> Result<RawRecord, StoreError>;

    /// Store many records at once. Returns the stored records in input order.
    async fn put_many(
        &self,
        type_name: &str,
        records: Vec<RawRecord>,
    ) -> Result<Vec<RawRecord>, StoreError>;

    /// Store a record, failing if its key already exists in the collection.
    async fn insert(&self, type_name: &str, record: RawRecord) -> Result<RawRecord, StoreError>;

    /// Delete a record by key. Deleting a missing key is not an error.
    async fn delete(&self, type_name: &str, key: &str) -> Result<(), StoreError>;

    /// Have the store mint a fresh primary key for a type's collection.
    async fn create_key(&self, type_name: &str) -> Result<String, StoreError>;
}
