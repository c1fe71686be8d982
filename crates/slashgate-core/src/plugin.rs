//! Plugin lifecycle.
//!
//! The host drives [`SlashPlugin`] through three entry points:
//!
//! - [`on_configuration_change`](SlashPlugin::on_configuration_change) --
//!   reload settings and publish a new registry snapshot.
//! - [`on_activate`](SlashPlugin::on_activate) -- check the server version
//!   and register every configured trigger.
//! - [`execute_command`](SlashPlugin::execute_command) -- run one command.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use semver::Version;
use slashgate_plugin::{CommandRegistration, PluginError, PluginHost};
use slashgate_types::{CommandInvocation, CommandReply, PluginConfig};
use tracing::{debug, info};

use crate::dispatch::Dispatcher;
use crate::error::DispatchError;
use crate::registry::{CommandRegistry, RegistrySnapshot};

/// Oldest server release the plugin runs on.
pub const MINIMUM_SERVER_VERSION: Version = Version::new(5, 4, 0);

/// Check a host version string against [`MINIMUM_SERVER_VERSION`].
pub fn check_server_version(version: &str) -> Result<(), PluginError> {
    let found = Version::parse(version.trim()).map_err(|e| PluginError::InvalidServerVersion {
        version: version.to_owned(),
        reason: e.to_string(),
    })?;
    if found < MINIMUM_SERVER_VERSION {
        return Err(PluginError::UnsupportedServer {
            required: MINIMUM_SERVER_VERSION.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

/// The slash command relay plugin.
pub struct SlashPlugin {
    host: Arc<dyn PluginHost>,
    registry: Arc<CommandRegistry>,
    dispatcher: Dispatcher,
    active: AtomicBool,
}

impl SlashPlugin {
    pub fn new(host: Arc<dyn PluginHost>) -> Self {
        Self::with_client(host, reqwest::Client::new())
    }

    /// Create a plugin whose dispatcher sends through the given client.
    pub fn with_client(host: Arc<dyn PluginHost>, http: reqwest::Client) -> Self {
        let registry = Arc::new(CommandRegistry::default());
        let dispatcher = Dispatcher::with_client(Arc::clone(&registry), Arc::clone(&host), http);
        Self {
            host,
            registry,
            dispatcher,
            active: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Verify the server version and register the configured triggers.
    pub async fn on_activate(&self) -> Result<(), PluginError> {
        check_server_version(&self.host.server_version())?;

        let snapshot = self.registry.snapshot();
        debug!(count = snapshot.len(), "registering custom slash commands");
        self.register_all(&snapshot).await?;

        self.active.store(true, Ordering::SeqCst);
        info!(commands = snapshot.len(), "slash command plugin activated");
        Ok(())
    }

    /// Load configuration from the host and publish it.
    ///
    /// Once the plugin is active, the new triggers are registered as well.
    /// The previous snapshot stays published if anything fails before the
    /// swap.
    pub async fn on_configuration_change(&self) -> Result<(), PluginError> {
        let raw = self.host.load_configuration().await?;
        let config = PluginConfig::from_value(raw)?;
        let snapshot = Arc::new(RegistrySnapshot::from_config(&config));

        self.registry
            .replace(Arc::clone(&snapshot))
            .map_err(|e| PluginError::Reload(e.to_string()))?;
        info!(
            commands = snapshot.len(),
            timeout_secs = config.request_timeout_secs,
            "configuration loaded"
        );

        if self.is_active() {
            self.register_all(&snapshot).await?;
        }
        Ok(())
    }

    /// Run one command. See [`Dispatcher::handle`].
    pub async fn execute_command(
        &self,
        invocation: &CommandInvocation,
    ) -> Result<CommandReply, DispatchError> {
        self.dispatcher.handle(invocation).await
    }

    async fn register_all(&self, snapshot: &RegistrySnapshot) -> Result<(), PluginError> {
        for endpoint in snapshot.endpoints() {
            debug!(trigger = %endpoint.trigger, "custom slash command");
            let registration = CommandRegistration::from(endpoint);
            self.host
                .register_command(&registration)
                .await
                .map_err(|source| PluginError::Registration {
                    trigger: endpoint.trigger.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slashgate_plugin::StaticHost;

    fn config() -> serde_json::Value {
        serde_json::json!({
            "SlashCommands": {
                "deploy": {
                    "DisplayName": "Deploy",
                    "AutoComplete": true,
                    "CommandURL": "http://127.0.0.1:9/deploy"
                },
                "weather": {
                    "CommandURL": "http://127.0.0.1:9/weather",
                    "RequestType": "GET"
                }
            }
        })
    }

    #[test]
    fn version_gate() {
        assert!(check_server_version("5.4.0").is_ok());
        assert!(check_server_version("9.11.2").is_ok());
        assert!(matches!(
            check_server_version("5.3.9"),
            Err(PluginError::UnsupportedServer { .. })
        ));
        assert!(matches!(
            check_server_version("five"),
            Err(PluginError::InvalidServerVersion { .. })
        ));
    }

    #[tokio::test]
    async fn configuration_change_publishes_snapshot() {
        let host = Arc::new(StaticHost::new("9.0.0").with_configuration(config()));
        let plugin = SlashPlugin::new(host.clone());

        assert!(plugin.registry().lookup("deploy").is_none());
        plugin.on_configuration_change().await.unwrap();
        assert_eq!(plugin.registry().snapshot().triggers(), vec!["deploy", "weather"]);
        // Not active yet, so nothing registered.
        assert!(host.registered_commands().is_empty());
    }

    #[tokio::test]
    async fn activation_registers_commands() {
        let host = Arc::new(StaticHost::new("9.0.0").with_configuration(config()));
        let plugin = SlashPlugin::new(host.clone());
        plugin.on_configuration_change().await.unwrap();
        plugin.on_activate().await.unwrap();

        assert!(plugin.is_active());
        let registered = host.registered_commands();
        assert_eq!(registered.len(), 2);
        assert_eq!(registered[0].trigger, "deploy");
        assert_eq!(registered[0].display_name, "Deploy");
        assert!(registered[0].auto_complete);
    }

    #[tokio::test]
    async fn activation_fails_on_old_server() {
        let host = Arc::new(StaticHost::new("5.0.0").with_configuration(config()));
        let plugin = SlashPlugin::new(host.clone());
        let err = plugin.on_activate().await.unwrap_err();
        assert!(matches!(err, PluginError::UnsupportedServer { .. }));
        assert!(!plugin.is_active());
        assert!(host.registered_commands().is_empty());
    }

    #[tokio::test]
    async fn reload_after_activation_registers_new_triggers() {
        let host = Arc::new(StaticHost::new("9.0.0"));
        let plugin = SlashPlugin::new(host.clone());
        plugin.on_activate().await.unwrap();
        assert!(host.registered_commands().is_empty());

        host.set_configuration(config());
        plugin.on_configuration_change().await.unwrap();
        assert_eq!(host.registered_commands().len(), 2);
    }

    #[tokio::test]
    async fn invalid_configuration_keeps_previous_snapshot() {
        let host = Arc::new(StaticHost::new("9.0.0").with_configuration(config()));
        let plugin = SlashPlugin::new(host.clone());
        plugin.on_configuration_change().await.unwrap();

        host.set_configuration(serde_json::json!({ "RequestTimeoutSecs": 0 }));
        let err = plugin.on_configuration_change().await.unwrap_err();
        assert!(matches!(err, PluginError::Configuration(_)));
        assert!(plugin.registry().lookup("deploy").is_some());
    }

    #[tokio::test]
    async fn unconfigured_plugin_rejects_every_trigger() {
        let host = Arc::new(
            StaticHost::new("9.0.0")
                .with_channel("c1", "town-square")
                .with_team("t1", "acme")
                .with_user("u1", "alice"),
        );
        let plugin = SlashPlugin::new(host);
        let reply = plugin
            .execute_command(&CommandInvocation::new("/deploy", "t1", "c1", "u1"))
            .await
            .unwrap();
        assert_eq!(reply.text, "Unrecognized command: /deploy");
    }
}
