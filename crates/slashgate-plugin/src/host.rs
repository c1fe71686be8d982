//! In-process [`PluginHost`] backed by fixed lookup tables.
//!
//! Used by the `slashgate` CLI to run commands outside a chat server and
//! by tests that need a deterministic host.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::error::HostError;
use crate::traits::{Channel, CommandRegistration, PluginHost, Team, User};

/// A host whose channels, teams, users and configuration are supplied up
/// front.
///
/// With [`resolve_unknown`](Self::resolve_unknown) enabled, ids that are
/// not in the tables resolve to an entity named after the id instead of
/// failing.
pub struct StaticHost {
    server_version: String,
    channels: HashMap<String, String>,
    teams: HashMap<String, String>,
    users: HashMap<String, String>,
    resolve_unknown: bool,
    configuration: Mutex<serde_json::Value>,
    registered: Mutex<Vec<CommandRegistration>>,
}

impl StaticHost {
    /// Create an empty host reporting the given server version.
    pub fn new(server_version: impl Into<String>) -> Self {
        Self {
            server_version: server_version.into(),
            channels: HashMap::new(),
            teams: HashMap::new(),
            users: HashMap::new(),
            resolve_unknown: false,
            configuration: Mutex::new(serde_json::Value::Object(serde_json::Map::new())),
            registered: Mutex::new(Vec::new()),
        }
    }

    pub fn with_channel(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.channels.insert(id.into(), name.into());
        self
    }

    pub fn with_team(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.teams.insert(id.into(), name.into());
        self
    }

    pub fn with_user(mut self, id: impl Into<String>, username: impl Into<String>) -> Self {
        self.users.insert(id.into(), username.into());
        self
    }

    pub fn with_configuration(self, configuration: serde_json::Value) -> Self {
        self.set_configuration(configuration);
        self
    }

    /// Resolve unknown ids to themselves rather than returning
    /// [`HostError::NotFound`].
    pub fn resolve_unknown(mut self, enabled: bool) -> Self {
        self.resolve_unknown = enabled;
        self
    }

    /// Replace the stored configuration blob.
    pub fn set_configuration(&self, configuration: serde_json::Value) {
        *self
            .configuration
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = configuration;
    }

    /// Every registration received so far, in call order.
    pub fn registered_commands(&self) -> Vec<CommandRegistration> {
        self.registered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lookup(
        &self,
        table: &HashMap<String, String>,
        entity: &'static str,
        id: &str,
    ) -> Result<String, HostError> {
        match table.get(id) {
            Some(name) => Ok(name.clone()),
            None if self.resolve_unknown => Ok(id.to_owned()),
            None => Err(HostError::NotFound {
                entity,
                id: id.to_owned(),
            }),
        }
    }
}

#[async_trait]
impl PluginHost for StaticHost {
    fn server_version(&self) -> String {
        self.server_version.clone()
    }

    async fn channel(&self, channel_id: &str) -> Result<Channel, HostError> {
        let name = self.lookup(&self.channels, "channel", channel_id)?;
        Ok(Channel {
            id: channel_id.to_owned(),
            name,
        })
    }

    async fn team(&self, team_id: &str) -> Result<Team, HostError> {
        let name = self.lookup(&self.teams, "team", team_id)?;
        Ok(Team {
            id: team_id.to_owned(),
            name,
        })
    }

    async fn user(&self, user_id: &str) -> Result<User, HostError> {
        let username = self.lookup(&self.users, "user", user_id)?;
        Ok(User {
            id: user_id.to_owned(),
            username,
        })
    }

    async fn load_configuration(&self) -> Result<serde_json::Value, HostError> {
        Ok(self
            .configuration
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn register_command(&self, command: &CommandRegistration) -> Result<(), HostError> {
        debug!(trigger = %command.trigger, "registering command");
        self.registered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.clone());
        Ok(())
    }
}
