//! Record Store client for Engram memory rows.

pub mod error;
pub mod model;
pub mod rest;
pub mod store;

/// Store error type.
pub use error::StoreError;
/// Memory record model and query types.
pub use model::{MemoryFilter, MemoryRecord, MemoryUpsert, TagCount};
/// PostgREST-style HTTP implementation.
pub use rest::RestRecordStore;
/// Record store interface.
pub use store::RecordStore;
