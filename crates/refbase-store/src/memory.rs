//! In-memory `RemoteStore` implementation.
//!
//! Backs tests and local development. Collections live in lock-wrapped maps;
//! every adapter call is appended to an operation log so tests can assert the
//! batching contract (one `fetch_by_keys` per distinct target type), and
//! individual collections can be poisoned to exercise failure propagation.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tracing::trace;
use uuid::Uuid;

use refbase_types::{record_key, set_record_key, RawRecord, StoreError};

use crate::store::RemoteStore;

/// One recorded adapter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    FetchAll {
        type_name: String,
    },
    FetchByKey {
        type_name: String,
        key: String,
    },
    FetchByKeys {
        type_name: String,
        keys: BTreeSet<String>,
    },
    Put {
        type_name: String,
        key: String,
    },
    Insert {
        type_name: String,
        key: String,
    },
    Delete {
        type_name: String,
        key: String,
    },
    CreateKey {
        type_name: String,
    },
}

impl StoreOp {
    /// Whether this op is one of the three read operations.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            StoreOp::FetchAll { .. } | StoreOp::FetchByKey { .. } | StoreOp::FetchByKeys { .. }
        )
    }
}

/// In-memory store keyed by `(type name, primary key)`.
///
/// `fetch_all` returns records in key order, which doubles as the stable
/// "fetch order" tests rely on.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, RawRecord>>>,
    ops: Mutex<Vec<StoreOp>>,
    failing: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records into a collection, minting keys for records without one.
    pub fn seed(&self, type_name: &str, records: impl IntoIterator<Item = RawRecord>) {
        let mut collections = self.collections.write();
        let collection = collections.entry(type_name.to_string()).or_default();
        for mut record in records {
            let key = match record_key(&record) {
                Some(key) => key.to_string(),
                None => {
                    let key = mint_key();
                    set_record_key(&mut record, key.clone());
                    key
                }
            };
            collection.insert(key, record);
        }
    }

    /// Make every subsequent operation on a collection fail, for testing error
    /// propagation.
    pub fn fail_collection(&self, type_name: &str) {
        self.failing.write().insert(type_name.to_string());
    }

    /// Snapshot of all recorded operations, in call order.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.lock().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.lock().clear();
    }

    /// Number of recorded fetch operations (any of the three reads).
    pub fn fetch_calls(&self) -> usize {
        self.ops.lock().iter().filter(|op| op.is_fetch()).count()
    }

    /// Number of recorded `fetch_by_keys` calls against one collection.
    pub fn fetch_by_keys_calls(&self, type_name: &str) -> usize {
        self.ops
            .lock()
            .iter()
            .filter(|op| matches!(op, StoreOp::FetchByKeys { type_name: t, .. } if t == type_name))
            .count()
    }

    fn record_op(&self, op: StoreOp) {
        trace!(?op, "memory store call");
        self.ops.lock().push(op);
    }

    fn check_failing(&self, type_name: &str, op: &'static str) -> Result<(), StoreError> {
        if self.failing.read().contains(type_name) {
            return Err(StoreError::new(
                type_name,
                op,
                anyhow!("injected failure for collection `{type_name}`"),
            ));
        }
        Ok(())
    }

    fn put_record(&self, type_name: &str, mut record: RawRecord) -> RawRecord {
        let key = match record_key(&record) {
            Some(key) => key.to_string(),
            None => {
                let key = mint_key();
                set_record_key(&mut record, key.clone());
                key
            }
        };
        self.collections
            .write()
            .entry(type_name.to_string())
            .or_default()
            .insert(key, record.clone());
        record
    }
}

fn mint_key() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn fetch_all(&self, type_name: &str) -> Result<Vec<RawRecord>, StoreError> {
        self.record_op(StoreOp::FetchAll {
            type_name: type_name.to_string(),
        });
        self.check_failing(type_name, "fetch_all")?;
        Ok(self
            .collections
            .read()
            .get(type_name)
            .map(|collection| collection.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_by_key(
        &self,
        type_name: &str,
        key: &str,
    ) -> Result<Option<RawRecord>, StoreError> {
        self.record_op(StoreOp::FetchByKey {
            type_name: type_name.to_string(),
            key: key.to_string(),
        });
        self.check_failing(type_name, "fetch_by_key")?;
        Ok(self
            .collections
            .read()
            .get(type_name)
            .and_then(|collection| collection.get(key).cloned()))
    }

    async fn fetch_by_keys(
        &self,
        type_name: &str,
        keys: &BTreeSet<String>,
    ) -> Result<HashMap<String, RawRecord>, StoreError> {
        self.record_op(StoreOp::FetchByKeys {
            type_name: type_name.to_string(),
            keys: keys.clone(),
        });
        self.check_failing(type_name, "fetch_by_keys")?;
        let collections = self.collections.read();
        let Some(collection) = collections.get(type_name) else {
            return Ok(HashMap::new());
        };
        Ok(keys
            .iter()
            .filter_map(|key| collection.get(key).map(|record| (key.clone(), record.clone())))
            .collect())
    }

    async fn put(&self, type_name: &str, record: RawRecord) -> Result<RawRecord, StoreError> {
        self.check_failing(type_name, "put")?;
        let stored = self.put_record(type_name, record);
        self.record_op(StoreOp::Put {
            type_name: type_name.to_string(),
            key: record_key(&stored).unwrap_or_default().to_string(),
        });
        Ok(stored)
    }

    async fn put_many(
        &self,
        type_name: &str,
        records: Vec<RawRecord>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        self.check_failing(type_name, "put_many")?;
        let mut stored = Vec::with_capacity(records.len());
        for record in records {
            let record = self.put_record(type_name, record);
            self.record_op(StoreOp::Put {
                type_name: type_name.to_string(),
                key: record_key(&record).unwrap_or_default().to_string(),
            });
            stored.push(record);
        }
        Ok(stored)
    }

    async fn insert(&self, type_name: &str, record: RawRecord) -> Result<RawRecord, StoreError> {
        self.check_failing(type_name, "insert")?;
        if let Some(key) = record_key(&record) {
            let exists = self
                .collections
                .read()
                .get(type_name)
                .is_some_and(|collection| collection.contains_key(key));
            if exists {
                return Err(StoreError::new(
                    type_name,
                    "insert",
                    anyhow!("key `{key}` already exists"),
                ));
            }
        }
        let stored = self.put_record(type_name, record);
        self.record_op(StoreOp::Insert {
            type_name: type_name.to_string(),
            key: record_key(&stored).unwrap_or_default().to_string(),
        });
        Ok(stored)
    }

    async fn delete(&self, type_name: &str, key: &str) -> Result<(), StoreError> {
        self.record_op(StoreOp::Delete {
            type_name: type_name.to_string(),
            key: key.to_string(),
        });
        self.check_failing(type_name, "delete")?;
        if let Some(collection) = self.collections.write().get_mut(type_name) {
            collection.remove(key);
        }
        Ok(())
    }

    async fn create_key(&self, type_name: &str) -> Result<String, StoreError> {
        self.record_op(StoreOp::CreateKey {
            type_name: type_name.to_string(),
        });
        self.check_failing(type_name, "create_key")?;
        let mut record = RawRecord::new();
        let key = mint_key();
        set_record_key(&mut record, key.clone());
        self.put_record(type_name, record);
        Ok(key)
    }
}
