//! Plugin configuration schema.
//!
//! Mirrors the settings block the host stores for the plugin. Keys use the
//! host's PascalCase convention:
//!
//! ```json
//! {
//!   "SlashCommands": {
//!     "weather": {
//!       "DisplayName": "Weather",
//!       "CommandURL": "https://hooks.example.com/weather",
//!       "RequestType": "GET",
//!       "CustomHTTPHeaders": { "X-Api-Key": "abc" }
//!     }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::endpoint::{EndpointConfig, RequestType};
use crate::error::{ConfigError, Result};

/// Timeout applied to outbound command requests when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Root plugin configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginConfig {
    /// Optional umbrella command name. Informational only.
    #[serde(default)]
    pub main_command: Option<String>,

    /// Configured slash commands keyed by trigger.
    #[serde(default)]
    pub slash_commands: BTreeMap<String, SlashCommandConfig>,

    /// Per-request timeout for outbound calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            main_command: None,
            slash_commands: BTreeMap::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// One configured slash command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SlashCommandConfig {
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub auto_complete: bool,

    #[serde(default)]
    pub auto_complete_desc: String,

    #[serde(default)]
    pub auto_complete_hint: String,

    #[serde(rename = "CommandURL", alias = "CommandUrl", default)]
    pub command_url: String,

    #[serde(default)]
    pub request_type: RequestType,

    #[serde(rename = "CustomHTTPHeaders", alias = "CustomHttpHeaders", default)]
    pub custom_headers: BTreeMap<String, String>,
}

impl PluginConfig {
    /// Decode and validate a configuration value handed over by the host.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode and validate a JSON configuration document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                reason: "RequestTimeoutSecs must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Outbound request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve configured commands into dispatch-ready endpoints.
    ///
    /// Triggers are lowercased and stripped of a leading `/`. When two keys
    /// collapse onto the same trigger, the first in key order wins.
    pub fn endpoints(&self) -> Vec<EndpointConfig> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(self.slash_commands.len());

        for (key, cmd) in &self.slash_commands {
            let trigger = key.trim().trim_start_matches('/').to_lowercase();
            if trigger.is_empty() {
                warn!(key = %key, "skipping slash command with empty trigger");
                continue;
            }
            if !seen.insert(trigger.clone()) {
                warn!(key = %key, trigger = %trigger, "duplicate trigger, keeping first entry");
                continue;
            }
            out.push(EndpointConfig {
                trigger,
                display_name: cmd.display_name.clone(),
                description: cmd.description.clone(),
                auto_complete: cmd.auto_complete,
                auto_complete_desc: cmd.auto_complete_desc.clone(),
                auto_complete_hint: cmd.auto_complete_hint.clone(),
                command_url: cmd.command_url.clone(),
                request_type: cmd.request_type,
                custom_headers: cmd.custom_headers.clone(),
            });
        }

        out
    }
}
