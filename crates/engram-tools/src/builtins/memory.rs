//! Built-in tools over the per-user memory table.

use crate::builtins::utils::{parse_args, require_field, store_error};
use crate::{Tool, ToolContext};
use async_trait::async_trait;
use engram_protocol::ToolError;
use engram_store::{MemoryFilter, MemoryUpsert, TagCount};
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};

/// Tool that stores or replaces one memory for a user.
#[derive(Debug, Default)]
pub struct CreateMemoryTool;

#[async_trait]
impl Tool for CreateMemoryTool {
    fn name(&self) -> &str {
        "create_memory"
    }

    fn description(&self) -> &str {
        "Store a memory for a user; an existing memory with the same key is replaced"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": { "type": "string", "description": "Owning user id." },
                "key": { "type": "string", "description": "Memory key within the user's namespace." },
                "content": { "type": "string", "description": "Memory content to store." },
                "tag": { "type": "string", "description": "Optional classification tag." },
                "metadata": { "type": "object", "description": "Optional structured metadata." }
            },
            "required": ["user_id", "key", "content"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: CreateMemoryArgs = parse_args(args)?;
        require_field("user_id", &input.user_id)?;
        require_field("key", &input.key)?;
        require_field("content", &input.content)?;

        let upsert = MemoryUpsert {
            user_id: input.user_id,
            memory_key: input.key.clone(),
            content: input.content,
            tag: input.tag,
            metadata: input.metadata,
        };
        ctx.store.upsert(upsert).await.map_err(store_error)?;

        info!("stored memory (key={})", input.key);
        Ok(json!({
            "status": "success",
            "message": format!("Memory '{}' stored", input.key),
            "key": input.key,
        }))
    }
}

/// Arguments for CreateMemoryTool.
#[derive(Debug, Deserialize)]
struct CreateMemoryArgs {
    user_id: String,
    key: String,
    content: String,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    metadata: Option<Value>,
}

/// Tool that fetches one memory by key.
#[derive(Debug, Default)]
pub struct GetMemoryTool;

#[async_trait]
impl Tool for GetMemoryTool {
    fn name(&self) -> &str {
        "get_memory"
    }

    fn description(&self) -> &str {
        "Fetch a single memory by key for a user"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": { "type": "string", "description": "Owning user id." },
                "key": { "type": "string", "description": "Memory key to fetch." }
            },
            "required": ["user_id", "key"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: KeyedArgs = parse_args(args)?;
        require_field("user_id", &input.user_id)?;
        require_field("key", &input.key)?;

        // An absent row is an expected outcome, not a failure.
        let Some(record) = ctx
            .store
            .fetch(&input.user_id, &input.key)
            .await
            .map_err(store_error)?
        else {
            return Ok(json!({
                "status": "not_found",
                "message": format!("No memory found for key '{}'", input.key),
            }));
        };

        Ok(json!({
            "key": record.memory_key,
            "content": record.content,
            "tag": record.tag,
            "metadata": record.metadata,
            "created_at": record.created_at,
            "updated_at": record.updated_at,
        }))
    }
}

/// Arguments for tools addressed by `(user_id, key)`.
#[derive(Debug, Deserialize)]
struct KeyedArgs {
    user_id: String,
    key: String,
}

/// Tool that lists a user's memories, most recently updated first.
#[derive(Debug, Default)]
pub struct ListMemoriesTool;

#[async_trait]
impl Tool for ListMemoriesTool {
    fn name(&self) -> &str {
        "list_memories"
    }

    fn description(&self) -> &str {
        "List a user's memories, optionally filtered by tag and a case-insensitive search term"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": { "type": "string", "description": "Owning user id." },
                "tag": { "type": "string", "description": "Restrict to memories with this exact tag." },
                "search": { "type": "string", "description": "Restrict to memories whose key or content contains this term." }
            },
            "required": ["user_id"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: ListMemoriesArgs = parse_args(args)?;
        require_field("user_id", &input.user_id)?;

        let filter = MemoryFilter {
            tag: input.tag,
            search: input.search,
        };
        let records = ctx
            .store
            .list(&input.user_id, &filter)
            .await
            .map_err(store_error)?;

        let memories: Vec<Value> = records
            .iter()
            .map(|record| {
                json!({
                    "memory_key": record.memory_key,
                    "content": record.content,
                    "tag": record.tag,
                    "created_at": record.created_at,
                    "updated_at": record.updated_at,
                })
            })
            .collect();
        Ok(json!({
            "count": memories.len(),
            "memories": memories,
        }))
    }
}

/// Arguments for ListMemoriesTool.
#[derive(Debug, Deserialize)]
struct ListMemoriesArgs {
    user_id: String,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    search: Option<String>,
}

/// Tool that permanently deletes one memory by key.
#[derive(Debug, Default)]
pub struct ForgetMemoryTool;

#[async_trait]
impl Tool for ForgetMemoryTool {
    fn name(&self) -> &str {
        "forget_memory"
    }

    fn description(&self) -> &str {
        "Permanently delete a memory by key; deleting a missing key succeeds"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": { "type": "string", "description": "Owning user id." },
                "key": { "type": "string", "description": "Memory key to delete." }
            },
            "required": ["user_id", "key"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: KeyedArgs = parse_args(args)?;
        require_field("user_id", &input.user_id)?;
        require_field("key", &input.key)?;

        ctx.store
            .delete(&input.user_id, &input.key)
            .await
            .map_err(store_error)?;

        info!("forgot memory (key={})", input.key);
        Ok(json!({
            "status": "success",
            "message": format!("Memory '{}' forgotten", input.key),
            "key": input.key,
        }))
    }
}

/// Tool that aggregates tag frequencies for a user.
#[derive(Debug, Default)]
pub struct ListTagsTool;

#[async_trait]
impl Tool for ListTagsTool {
    fn name(&self) -> &str {
        "list_tags"
    }

    fn description(&self) -> &str {
        "List the distinct tags on a user's memories with usage counts"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": { "type": "string", "description": "Owning user id." }
            },
            "required": ["user_id"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: ListTagsArgs = parse_args(args)?;
        require_field("user_id", &input.user_id)?;

        let tags = ctx.store.tags(&input.user_id).await.map_err(store_error)?;
        let counts = count_tags(tags);
        Ok(json!({ "tags": counts }))
    }
}

/// Arguments for ListTagsTool.
#[derive(Debug, Deserialize)]
struct ListTagsArgs {
    user_id: String,
}

/// Count tag frequencies, preserving first-occurrence order.
fn count_tags(tags: Vec<String>) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for tag in tags {
        match counts.iter_mut().find(|entry| entry.tag == tag) {
            Some(entry) => entry.count += 1,
            None => counts.push(TagCount { tag, count: 1 }),
        }
    }
    counts
}
