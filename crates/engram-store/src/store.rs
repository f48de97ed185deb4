//! Record store abstraction used by the dispatcher.

use crate::error::StoreError;
use crate::model::{MemoryFilter, MemoryRecord, MemoryUpsert};
use async_trait::async_trait;

#[async_trait]
/// External Record Store contract.
///
/// The store owns durability, uniqueness enforcement on
/// `(user_id, memory_key)`, and concurrency control; implementations issue a
/// single round trip per call and surface whatever failure the store
/// produces, with no retries or timeouts of their own.
pub trait RecordStore: Send + Sync {
    /// Insert or replace the record for `(user_id, memory_key)`.
    async fn upsert(&self, upsert: MemoryUpsert) -> Result<(), StoreError>;

    /// Point lookup by the unique pair. An absent row is `Ok(None)`, not an
    /// error.
    async fn fetch(
        &self,
        user_id: &str,
        memory_key: &str,
    ) -> Result<Option<MemoryRecord>, StoreError>;

    /// All records for a user matching the filter, ordered by `updated_at`
    /// descending.
    async fn list(
        &self,
        user_id: &str,
        filter: &MemoryFilter,
    ) -> Result<Vec<MemoryRecord>, StoreError>;

    /// Delete the record for the unique pair. Deleting an absent key
    /// succeeds.
    async fn delete(&self, user_id: &str, memory_key: &str) -> Result<(), StoreError>;

    /// Non-null tag values for a user, in `updated_at` descending row order.
    /// Aggregation happens client-side.
    async fn tags(&self, user_id: &str) -> Result<Vec<String>, StoreError>;
}
