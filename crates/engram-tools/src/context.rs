//! Tool execution context.

use engram_store::RecordStore;
use std::sync::Arc;

/// Shared context passed to tools during execution.
///
/// Holds the Record Store handle constructed once at startup; cloning per
/// call is a cheap reference-count bump, and no other mutable state exists.
#[derive(Clone)]
pub struct ToolContext {
    /// Injected Record Store handle.
    pub store: Arc<dyn RecordStore>,
}

impl ToolContext {
    /// Build a context around a store handle.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").finish_non_exhaustive()
    }
}
