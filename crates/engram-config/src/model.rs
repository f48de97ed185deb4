//! Configuration schema for the Engram server.

use crate::ConfigError;
use log::info;
use serde::{Deserialize, Serialize};

/// Record Store endpoint variable.
const ENV_STORE_URL: &str = "ENGRAM_STORE_URL";
/// Service credential variable.
const ENV_SERVICE_KEY: &str = "ENGRAM_SERVICE_KEY";
/// Optional table name override.
const ENV_TABLE: &str = "ENGRAM_TABLE";
/// Optional server name override.
const ENV_SERVER_NAME: &str = "ENGRAM_SERVER_NAME";

/// Default table holding memory rows.
const DEFAULT_TABLE: &str = "memories";
/// Default server name reported during initialize.
const DEFAULT_SERVER_NAME: &str = "engram";

/// Connection and identity settings for the server process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngramConfig {
    /// Base URL of the Record Store REST endpoint.
    pub store_url: String,
    /// Service credential sent with every store request.
    pub service_key: String,
    /// Table holding memory rows.
    pub table: String,
    /// Server name reported to clients.
    pub server_name: String,
}

impl EngramConfig {
    /// Load config from the process environment.
    ///
    /// The endpoint and credential are required; their absence is fatal and
    /// is expected to halt startup before any request is served.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load config through an arbitrary variable lookup.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_url = require(&lookup, ENV_STORE_URL)?;
        let service_key = require(&lookup, ENV_SERVICE_KEY)?;
        let table = lookup(ENV_TABLE)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        let server_name = lookup(ENV_SERVER_NAME)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());

        info!(
            "loaded config (store_url={}, table={}, server_name={})",
            store_url, table, server_name
        );
        Ok(Self {
            store_url,
            service_key,
            table,
            server_name,
        })
    }
}

/// Read a required variable, rejecting blank values.
fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or(ConfigError::MissingVar(name))?;
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidVar {
            name,
            message: "value is empty".to_string(),
        });
    }
    Ok(value)
}
