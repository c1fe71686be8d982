//! Plugin and host error types.

use slashgate_types::ConfigError;
use thiserror::Error;

/// Failure of a single call into the host.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostError {
    /// The requested entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity (`channel`, `team`, `user`).
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The host could not service the call.
    #[error("host unavailable: {0}")]
    Unavailable(String),

    /// The host rejected a command registration.
    #[error("registration rejected: {0}")]
    Rejected(String),
}

/// Errors produced by plugin lifecycle operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PluginError {
    /// The host reported a version string that is not valid semver.
    #[error("failed to parse server version {version:?}: {reason}")]
    InvalidServerVersion {
        version: String,
        reason: String,
    },

    /// The host is older than the minimum supported version.
    #[error("this plugin requires server v{required} or later (found v{found})")]
    UnsupportedServer {
        required: String,
        found: String,
    },

    /// Configuration could not be loaded or decoded.
    #[error("failed to load plugin configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// A trigger could not be registered with the host.
    #[error("failed to register command /{trigger}: {source}")]
    Registration {
        trigger: String,
        #[source]
        source: HostError,
    },

    /// The new configuration could not be published.
    #[error("failed to publish configuration: {0}")]
    Reload(String),

    /// A host call failed.
    #[error(transparent)]
    Host(#[from] HostError),
}
