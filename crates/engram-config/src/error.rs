//! Error types for config loading and validation.

use thiserror::Error;

/// Errors returned while loading config from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    /// An environment variable is present but unusable.
    #[error("invalid value for {name}: {message}")]
    InvalidVar { name: &'static str, message: String },
}
