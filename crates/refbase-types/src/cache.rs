//! Request-scoped resolution cache.
//!
//! One cache is populated per resolution operation, mapping
//! `(target type, key)` to the resolved record instance, and discarded when
//! the operation completes. Lookups never fetch: a miss means the key was
//! absent from the store at fetch time or was never requested, and stands for
//! "no resolved object".
//!
//! Resolved instances are stored behind `Arc`, so repeated lookups of the same
//! key hand out the same object.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::model::Model;

type DynRecord = Arc<dyn Any + Send + Sync>;

/// Cache of resolved referenced records, scoped to a single resolution call.
#[derive(Default)]
pub struct ResolutionCache {
    by_type: HashMap<&'static str, HashMap<String, DynRecord>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a resolved record. Called by the resolver while populating the
    /// cache; an existing entry for the same key is kept untouched so object
    /// identity stays stable within the operation.
    pub fn insert(&mut self, type_name: &'static str, key: String, record: DynRecord) {
        self.by_type
            .entry(type_name)
            .or_default()
            .entry(key)
            .or_insert(record);
    }

    /// Typed lookup. Never fetches.
    pub fn get<M: Model>(&self, key: &str) -> Option<Arc<M>> {
        let record = self.by_type.get(M::TYPE_NAME)?.get(key)?;
        Arc::clone(record).downcast::<M>().ok()
    }

    /// Typed lookup of many keys, preserving input order and omitting misses.
    pub fn get_all<'a, M: Model>(&self, keys: impl IntoIterator<Item = &'a str>) -> Vec<Arc<M>> {
        keys.into_iter().filter_map(|key| self.get::<M>(key)).collect()
    }

    pub fn contains(&self, type_name: &str, key: &str) -> bool {
        self.by_type
            .get(type_name)
            .is_some_and(|records| records.contains_key(key))
    }

    /// Number of cached records for one target type.
    pub fn type_count(&self, type_name: &str) -> usize {
        self.by_type.get(type_name).map_or(0, HashMap::len)
    }

    /// Total number of cached records across all target types.
    pub fn len(&self) -> usize {
        self.by_type.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.values().all(HashMap::is_empty)
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .by_type
            .iter()
            .map(|(name, records)| (*name, records.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("ResolutionCache").field("records", &counts).finish()
    }
}
