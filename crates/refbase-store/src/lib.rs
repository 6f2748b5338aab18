//! Remote store adapter boundary for the refbase workspace.
//!
//! The resolution core treats the remote document store as a black box reached
//! through one trait:
//!
//! - [`store`]: the async [`RemoteStore`] contract — per-type collections
//!   addressed by primary key or full scan
//! - [`memory`]: [`MemoryStore`], an in-memory implementation with a recorded
//!   operation log, used by tests and as the adapter reference
//! - [`ops`]: typed convenience operations (get/save/delete) converting
//!   through the `Model` trait
//!
//! Timeout and retry policy belong to adapter implementations; the core
//! propagates adapter failures untouched.

pub mod memory;
pub mod ops;
pub mod store;

pub use memory::{MemoryStore, StoreOp};
pub use store::RemoteStore;
