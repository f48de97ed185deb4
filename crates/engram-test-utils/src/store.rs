//! In-process `RecordStore` implementations for tests.

use async_trait::async_trait;
use chrono::Utc;
use engram_store::{MemoryFilter, MemoryRecord, MemoryUpsert, RecordStore, StoreError};
use parking_lot::Mutex;

/// In-memory record store mirroring the Record Store contract.
///
/// Rows are kept most-recently-updated first so list order matches
/// `updated_at.desc` even when timestamps collide within a test.
#[derive(Default)]
pub struct InMemoryRecordStore {
    rows: Mutex<Vec<MemoryRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held, across all users.
    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn upsert(&self, upsert: MemoryUpsert) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut rows = self.rows.lock();
        let existing = rows
            .iter()
            .position(|row| row.user_id == upsert.user_id && row.memory_key == upsert.memory_key);
        let created_at = match existing {
            Some(index) => rows.remove(index).created_at,
            None => now,
        };
        rows.insert(
            0,
            MemoryRecord {
                user_id: upsert.user_id,
                memory_key: upsert.memory_key,
                content: upsert.content,
                tag: upsert.tag,
                metadata: upsert.metadata,
                created_at,
                updated_at: now,
            },
        );
        Ok(())
    }

    async fn fetch(
        &self,
        user_id: &str,
        memory_key: &str,
    ) -> Result<Option<MemoryRecord>, StoreError> {
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .find(|row| row.user_id == user_id && row.memory_key == memory_key)
            .cloned())
    }

    async fn list(
        &self,
        user_id: &str,
        filter: &MemoryFilter,
    ) -> Result<Vec<MemoryRecord>, StoreError> {
        let rows = self.rows.lock();
        let needle = filter.search.as_ref().map(|term| term.to_lowercase());
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .filter(|row| match &filter.tag {
                Some(tag) => row.tag.as_deref() == Some(tag.as_str()),
                None => true,
            })
            .filter(|row| match &needle {
                Some(needle) => {
                    row.memory_key.to_lowercase().contains(needle)
                        || row.content.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: &str, memory_key: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.lock();
        rows.retain(|row| !(row.user_id == user_id && row.memory_key == memory_key));
        Ok(())
    }

    async fn tags(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .filter_map(|row| row.tag.clone())
            .collect())
    }
}

/// Record store that fails every call with a fixed detail message.
pub struct FailingRecordStore {
    detail: String,
}

impl FailingRecordStore {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    fn failure(&self) -> StoreError {
        StoreError::Failed {
            status: 500,
            detail: self.detail.clone(),
        }
    }
}

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn upsert(&self, _upsert: MemoryUpsert) -> Result<(), StoreError> {
        Err(self.failure())
    }

    async fn fetch(
        &self,
        _user_id: &str,
        _memory_key: &str,
    ) -> Result<Option<MemoryRecord>, StoreError> {
        Err(self.failure())
    }

    async fn list(
        &self,
        _user_id: &str,
        _filter: &MemoryFilter,
    ) -> Result<Vec<MemoryRecord>, StoreError> {
        Err(self.failure())
    }

    async fn delete(&self, _user_id: &str, _memory_key: &str) -> Result<(), StoreError> {
        Err(self.failure())
    }

    async fn tags(&self, _user_id: &str) -> Result<Vec<String>, StoreError> {
        Err(self.failure())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryRecordStore;
    use engram_store::{MemoryFilter, MemoryUpsert, RecordStore};
    use pretty_assertions::assert_eq;

    fn upsert(user_id: &str, key: &str, content: &str, tag: Option<&str>) -> MemoryUpsert {
        MemoryUpsert {
            user_id: user_id.to_string(),
            memory_key: key.to_string(),
            content: content.to_string(),
            tag: tag.map(str::to_string),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let store = InMemoryRecordStore::new();
        store.upsert(upsert("u1", "k", "first", None)).await.expect("upsert");
        store.upsert(upsert("u1", "k", "second", None)).await.expect("upsert");

        assert_eq!(store.len(), 1);
        let record = store.fetch("u1", "k").await.expect("fetch").expect("record");
        assert_eq!(record.content, "second");
        assert!(record.updated_at >= record.created_at);
    }

    #[tokio::test]
    async fn list_orders_most_recent_first() {
        let store = InMemoryRecordStore::new();
        store.upsert(upsert("u1", "a", "one", None)).await.expect("upsert");
        store.upsert(upsert("u1", "b", "two", None)).await.expect("upsert");
        store.upsert(upsert("u1", "a", "updated", None)).await.expect("upsert");

        let rows = store
            .list("u1", &MemoryFilter::default())
            .await
            .expect("list");
        let keys: Vec<&str> = rows.iter().map(|row| row.memory_key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn list_is_scoped_per_user() {
        let store = InMemoryRecordStore::new();
        store.upsert(upsert("u1", "k", "mine", None)).await.expect("upsert");
        store.upsert(upsert("u2", "k", "theirs", None)).await.expect("upsert");

        let rows = store
            .list("u1", &MemoryFilter::default())
            .await
            .expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "mine");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryRecordStore::new();
        store.upsert(upsert("u1", "k", "one", None)).await.expect("upsert");
        store.delete("u1", "k").await.expect("delete");
        store.delete("u1", "k").await.expect("delete again");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn tags_skip_untagged_rows() {
        let store = InMemoryRecordStore::new();
        store
            .upsert(upsert("u1", "a", "one", Some("personal")))
            .await
            .expect("upsert");
        store.upsert(upsert("u1", "b", "two", None)).await.expect("upsert");
        store
            .upsert(upsert("u1", "c", "three", Some("work")))
            .await
            .expect("upsert");

        let tags = store.tags("u1").await.expect("tags");
        assert_eq!(tags, vec!["work".to_string(), "personal".to_string()]);
    }
}
