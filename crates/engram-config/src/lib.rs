//! Process configuration for the Engram server.

mod error;
mod model;

pub use error::ConfigError;
pub use model::EngramConfig;
