//! Error types for configuration handling.

use thiserror::Error;

/// Errors raised while decoding plugin configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration blob is not valid JSON or does not match the schema.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration decoded but is semantically invalid.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong with the configuration.
        reason: String,
    },
}

/// A convenience type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
