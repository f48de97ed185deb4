//! PostgREST-style HTTP implementation of the Record Store.

use crate::error::StoreError;
use crate::model::{MemoryFilter, MemoryRecord, MemoryUpsert};
use crate::store::RecordStore;
use async_trait::async_trait;
use engram_config::EngramConfig;
use log::debug;
use serde::Deserialize;

/// Record store backed by a PostgREST-compatible REST endpoint.
///
/// Every request authenticates with the service credential via the `apikey`
/// and `Authorization` headers; upserts rely on the store's uniqueness
/// constraint through `on_conflict` merge resolution.
#[derive(Debug, Clone)]
pub struct RestRecordStore {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Endpoint base URL without a trailing slash.
    base_url: String,
    /// Service credential.
    service_key: String,
    /// Table holding memory rows.
    table: String,
}

/// Row shape for the tag projection query.
#[derive(Debug, Deserialize)]
struct TagRow {
    tag: Option<String>,
}

impl RestRecordStore {
    /// Create a store client for the given endpoint and table.
    pub fn new(
        store_url: impl Into<String>,
        service_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        let base_url = store_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            service_key: service_key.into(),
            table: table.into(),
        }
    }

    /// Create a store client from loaded process config.
    pub fn from_config(config: &EngramConfig) -> Self {
        Self::new(&config.store_url, &config.service_key, &config.table)
    }

    /// REST URL for the memory table.
    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    /// Start a request with the credential headers applied.
    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Convert a non-success response into a `StoreError::Failed`.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        let detail = if detail.trim().is_empty() {
            format!("store returned status {status}")
        } else {
            detail
        };
        Err(StoreError::Failed {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn upsert(&self, upsert: MemoryUpsert) -> Result<(), StoreError> {
        debug!(
            "upserting record (user_id={}, memory_key={})",
            upsert.user_id, upsert.memory_key
        );
        let response = self
            .request(reqwest::Method::POST, self.table_url())
            .query(&[("on_conflict", "user_id,memory_key")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&upsert)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch(
        &self,
        user_id: &str,
        memory_key: &str,
    ) -> Result<Option<MemoryRecord>, StoreError> {
        let user_filter = eq_filter(user_id);
        let key_filter = eq_filter(memory_key);
        let response = self
            .request(reqwest::Method::GET, self.table_url())
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("memory_key", key_filter.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await?;
        let mut rows: Vec<MemoryRecord> = Self::check(response).await?.json().await?;
        debug!(
            "fetched record (user_id={}, memory_key={}, found={})",
            user_id,
            memory_key,
            !rows.is_empty()
        );
        Ok(rows.pop())
    }

    async fn list(
        &self,
        user_id: &str,
        filter: &MemoryFilter,
    ) -> Result<Vec<MemoryRecord>, StoreError> {
        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            ("user_id".to_string(), eq_filter(user_id)),
            ("order".to_string(), "updated_at.desc".to_string()),
        ];
        if let Some(tag) = &filter.tag {
            query.push(("tag".to_string(), eq_filter(tag)));
        }
        if let Some(search) = &filter.search {
            query.push(("or".to_string(), search_filter(search)));
        }
        let response = self
            .request(reqwest::Method::GET, self.table_url())
            .query(&query)
            .send()
            .await?;
        let rows: Vec<MemoryRecord> = Self::check(response).await?.json().await?;
        debug!(
            "listed records (user_id={}, filtered={}, returned={})",
            user_id,
            !filter.is_empty(),
            rows.len()
        );
        Ok(rows)
    }

    async fn delete(&self, user_id: &str, memory_key: &str) -> Result<(), StoreError> {
        debug!(
            "deleting record (user_id={}, memory_key={})",
            user_id, memory_key
        );
        let user_filter = eq_filter(user_id);
        let key_filter = eq_filter(memory_key);
        let response = self
            .request(reqwest::Method::DELETE, self.table_url())
            .query(&[
                ("user_id", user_filter.as_str()),
                ("memory_key", key_filter.as_str()),
            ])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn tags(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let user_filter = eq_filter(user_id);
        let response = self
            .request(reqwest::Method::GET, self.table_url())
            .query(&[
                ("select", "tag"),
                ("user_id", user_filter.as_str()),
                ("tag", "not.is.null"),
                ("order", "updated_at.desc"),
            ])
            .send()
            .await?;
        let rows: Vec<TagRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().filter_map(|row| row.tag).collect())
    }
}

/// Build an exact-match filter value.
fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

/// Build the case-insensitive key-or-content filter for a search term.
///
/// Values are double-quoted so terms containing PostgREST syntax characters
/// (commas, parentheses, dots) stay literal inside the `or=(...)` group.
fn search_filter(term: &str) -> String {
    let pattern = quote_filter_value(&format!("*{term}*"));
    format!("(memory_key.ilike.{pattern},content.ilike.{pattern})")
}

/// Quote a filter value, escaping embedded quotes and backslashes.
fn quote_filter_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::{eq_filter, search_filter, RestRecordStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn eq_filter_prefixes_value() {
        assert_eq!(eq_filter("u1"), "eq.u1");
    }

    #[test]
    fn search_filter_checks_key_and_content() {
        assert_eq!(
            search_filter("sushi"),
            "(memory_key.ilike.\"*sushi*\",content.ilike.\"*sushi*\")"
        );
    }

    #[test]
    fn search_filter_quotes_syntax_characters() {
        let filter = search_filter("a,b");
        assert_eq!(
            filter,
            "(memory_key.ilike.\"*a,b*\",content.ilike.\"*a,b*\")"
        );
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        let store = RestRecordStore::new("https://store.example.com/rest/v1/", "key", "memories");
        assert_eq!(
            store.table_url(),
            "https://store.example.com/rest/v1/memories"
        );
    }
}
