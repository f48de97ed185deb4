//! Error types for Record Store operations.

/// Errors returned by record stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport-level HTTP failure.
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// The store rejected the request.
    #[error("{detail}")]
    Failed { status: u16, detail: String },
    /// The store returned a body we could not decode.
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
