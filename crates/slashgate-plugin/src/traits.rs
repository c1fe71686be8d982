//! Host collaborator trait and the entities it resolves.
//!
//! All host calls are async and the trait is `Send + Sync`, so a single
//! host handle can serve concurrent dispatches.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use slashgate_types::EndpointConfig;

use crate::error::HostError;

/// A chat channel as resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    /// URL-safe channel name.
    pub name: String,
}

/// A team as resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    /// URL-safe team name, forwarded as `team_domain`.
    pub name: String,
}

/// A user as resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// Command palette metadata for one trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRegistration {
    pub trigger: String,
    pub display_name: String,
    pub description: String,
    pub auto_complete: bool,
    pub auto_complete_desc: String,
    pub auto_complete_hint: String,
}

impl From<&EndpointConfig> for CommandRegistration {
    fn from(endpoint: &EndpointConfig) -> Self {
        Self {
            trigger: endpoint.trigger.clone(),
            display_name: endpoint.display_name.clone(),
            description: endpoint.description.clone(),
            auto_complete: endpoint.auto_complete,
            auto_complete_desc: endpoint.auto_complete_desc.clone(),
            auto_complete_hint: endpoint.auto_complete_hint.clone(),
        }
    }
}

/// Services provided by the chat server hosting the plugin.
#[async_trait]
pub trait PluginHost: Send + Sync {
    /// Version string of the running server (semver).
    fn server_version(&self) -> String;

    /// Resolve a channel by id.
    async fn channel(&self, channel_id: &str) -> Result<Channel, HostError>;

    /// Resolve a team by id.
    async fn team(&self, team_id: &str) -> Result<Team, HostError>;

    /// Resolve a user by id.
    async fn user(&self, user_id: &str) -> Result<User, HostError>;

    /// Fetch the plugin's raw configuration blob.
    async fn load_configuration(&self) -> Result<serde_json::Value, HostError>;

    /// Add a trigger to the host's command palette.
    async fn register_command(&self, command: &CommandRegistration) -> Result<(), HostError>;
}
