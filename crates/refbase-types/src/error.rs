//! Error taxonomy for the refbase workspace.
//!
//! Resolution-time failures abort the whole batch; a reference key with no
//! stored record is never an error (records may be deleted out-of-band) and
//! therefore has no variant here.

use thiserror::Error;

/// Workspace result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by registration, resolution, and store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Two distinct types registered under the same model name. Fatal at
    /// declaration time; registration is never silently overwritten.
    #[error("duplicate model registration for `{type_name}`")]
    DuplicateModel { type_name: &'static str },

    /// A reference field names a target type absent from the registry. This is
    /// a configuration error, not a missing-data error.
    #[error("no model registered under `{type_name}`")]
    UnknownModel { type_name: String },

    /// The remote store adapter failed. Propagated as-is; retry policy belongs
    /// to the adapter or the caller.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A raw record could not be materialized into its declared model type.
    #[error("malformed `{type_name}` record: {source}")]
    Record {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// More than one stored record matched an identity probe, so the instance
    /// was not written to avoid conflicts.
    #[error("`{type_name}` identity probe matched multiple stored records: {keys:?}")]
    Conflict {
        type_name: &'static str,
        keys: Vec<String>,
    },
}

/// Failure of a single remote store operation, identifying the collection and
/// operation that failed. The underlying cause is adapter-specific and carried
/// opaquely.
#[derive(Debug, Error)]
#[error("store `{op}` failed for collection `{type_name}`: {source}")]
pub struct StoreError {
    pub type_name: String,
    pub op: &'static str,
    #[source]
    pub source: anyhow::Error,
}

impl StoreError {
    pub fn new(
        type_name: impl Into<String>,
        op: &'static str,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            op,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display_names_collection_and_op() {
        let err = StoreError::new("Person", "fetch_by_keys", anyhow::anyhow!("connection reset"));
        let msg = err.to_string();
        assert!(msg.contains("Person"));
        assert!(msg.contains("fetch_by_keys"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn test_store_error_converts_into_error() {
        let err: Error = StoreError::new("Person", "fetch_all", anyhow::anyhow!("boom")).into();
        assert!(matches!(err, Error::Store(_)));
    }
}
