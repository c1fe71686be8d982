//! `slashgate exec` -- dispatch one slash command.
//!
//! Runs the plugin against an in-process host: the configuration is loaded,
//! the plugin activated and the command dispatched exactly as a chat server
//! would. The reply is printed as JSON on stdout.
//!
//! ```text
//! slashgate exec --user u1 /weather Berlin tomorrow
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use slashgate_core::SlashPlugin;
use slashgate_plugin::StaticHost;
use slashgate_types::{CommandInvocation, CommandReply};

/// Server version reported by the in-process host.
pub const DEFAULT_SERVER_VERSION: &str = "5.4.0";

/// Arguments for `slashgate exec`.
#[derive(Args)]
pub struct ExecArgs {
    /// Command line to dispatch, e.g. `/weather Berlin`.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Team id sent with the command.
    #[arg(long, default_value = "team")]
    pub team: String,

    /// Channel id sent with the command.
    #[arg(long, default_value = "channel")]
    pub channel: String,

    /// User id sent with the command.
    #[arg(long, default_value = "user")]
    pub user: String,

    /// Server version the host reports during activation.
    #[arg(long, default_value = DEFAULT_SERVER_VERSION)]
    pub server_version: String,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the exec command.
pub async fn run(args: ExecArgs) -> anyhow::Result<()> {
    let raw = super::load_config(args.config.as_deref())?;
    let reply = execute(&args, raw).await?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}

/// Activate a plugin over `raw` configuration and dispatch the command.
async fn execute(args: &ExecArgs, raw: serde_json::Value) -> anyhow::Result<CommandReply> {
    // Ids missing from the host tables resolve to themselves.
    let host = StaticHost::new(args.server_version.as_str())
        .resolve_unknown(true)
        .with_configuration(raw);
    let plugin = SlashPlugin::new(Arc::new(host));

    plugin.on_configuration_change().await?;
    plugin.on_activate().await?;

    let invocation = CommandInvocation::new(
        args.command.join(" "),
        args.team.as_str(),
        args.channel.as_str(),
        args.user.as_str(),
    );
    Ok(plugin.execute_command(&invocation).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slashgate_types::ResponseType;

    fn args(command: &[&str]) -> ExecArgs {
        ExecArgs {
            command: command.iter().map(|s| s.to_string()).collect(),
            team: "team".into(),
            channel: "channel".into(),
            user: "user".into(),
            server_version: DEFAULT_SERVER_VERSION.into(),
            config: None,
        }
    }

    fn config() -> serde_json::Value {
        serde_json::json!({
            "SlashCommands": {
                "ping": { "CommandURL": "http://127.0.0.1:9/ping", "RequestType": "GET" }
            }
        })
    }

    #[tokio::test]
    async fn unknown_trigger_gets_ephemeral_reply() {
        let reply = execute(&args(&["/nope", "x"]), config()).await.unwrap();
        assert_eq!(reply.response_type, ResponseType::Ephemeral);
        assert_eq!(reply.text, "Unrecognized command: /nope");
    }

    #[tokio::test]
    async fn command_without_prefix_is_an_error() {
        let err = execute(&args(&["ping"]), config()).await.unwrap_err();
        assert!(err.to_string().contains("malformed command invocation"));
    }

    #[tokio::test]
    async fn old_server_version_fails_activation() {
        let mut args = args(&["/ping"]);
        args.server_version = "5.3.9".into();
        let err = execute(&args, config()).await.unwrap_err();
        assert!(err.to_string().contains("requires server v5.4.0"));
    }

    #[tokio::test]
    async fn invalid_configuration_is_reported() {
        let raw = serde_json::json!({ "SlashCommands": { "ping": { "RequestType": "PUT" } } });
        assert!(execute(&args(&["/ping"]), raw).await.is_err());
    }
}
