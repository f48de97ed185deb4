//! Memory record model shared by store implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted memory row.
///
/// `(user_id, memory_key)` is unique across the table; timestamps are
/// assigned by the Record Store and never set by callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryRecord {
    /// Owning user.
    pub user_id: String,
    /// Record name within the user's namespace.
    pub memory_key: String,
    /// Text payload.
    pub content: String,
    /// Optional classification tag.
    pub tag: Option<String>,
    /// Optional structured metadata.
    pub metadata: Option<serde_json::Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fully-populated upsert request built at the validation boundary.
///
/// Absent optional fields are normalized to `None` here, before any store
/// call, so the store writes explicit nulls rather than omitting columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryUpsert {
    /// Owning user.
    pub user_id: String,
    /// Record name within the user's namespace.
    pub memory_key: String,
    /// Text payload.
    pub content: String,
    /// Optional classification tag.
    pub tag: Option<String>,
    /// Optional structured metadata.
    pub metadata: Option<serde_json::Value>,
}

/// Filters applied to a list query; both compose with logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryFilter {
    /// Exact tag match.
    pub tag: Option<String>,
    /// Case-insensitive substring match on key or content.
    pub search: Option<String>,
}

impl MemoryFilter {
    /// Whether any filter is set.
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.search.is_none()
    }
}

/// Frequency of one distinct tag value for a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagCount {
    /// Tag value.
    pub tag: String,
    /// Number of records bearing the tag.
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::{MemoryFilter, MemoryRecord};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn record_round_trips_with_null_optionals() {
        let raw = json!({
            "user_id": "u1",
            "memory_key": "favorite_food",
            "content": "sushi",
            "tag": null,
            "metadata": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        });
        let record: MemoryRecord = serde_json::from_value(raw).expect("decode");
        assert_eq!(record.tag, None);
        assert_eq!(record.metadata, None);
        assert_eq!(record.memory_key, "favorite_food");
    }

    #[test]
    fn empty_filter_reports_empty() {
        assert!(MemoryFilter::default().is_empty());
        let filter = MemoryFilter {
            tag: Some("personal".to_string()),
            search: None,
        };
        assert!(!filter.is_empty());
    }
}
