//! Slash command dispatcher.
//!
//! One call to [`Dispatcher::handle`] walks a command through
//! parse → lookup → context resolution → request build → send → classify.
//! Any failure ends the walk with an ephemeral error reply; nothing is
//! retried.

pub mod parse;
pub mod request;
pub mod response;

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use slashgate_plugin::PluginHost;
use slashgate_types::{CommandInvocation, CommandReply};
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::registry::CommandRegistry;

use parse::{ParsedCommand, parse_command};
use request::{OutboundRequest, ResolvedContext};
use response::{MAX_RESPONSE_SIZE, parse_reply, read_capped, status_line};

/// Relays slash commands to their configured HTTP endpoints.
///
/// Holds no per-dispatch state, so one instance can serve concurrent
/// invocations.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    host: Arc<dyn PluginHost>,
    http: reqwest::Client,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, host: Arc<dyn PluginHost>) -> Self {
        Self::with_client(registry, host, reqwest::Client::new())
    }

    /// Create a dispatcher that sends through the given client.
    pub fn with_client(
        registry: Arc<CommandRegistry>,
        host: Arc<dyn PluginHost>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            registry,
            host,
            http,
        }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Dispatch one invocation.
    ///
    /// Every failure except [`DispatchError::MalformedInvocation`] comes
    /// back as `Ok` with an ephemeral error reply.
    pub async fn handle(
        &self,
        invocation: &CommandInvocation,
    ) -> Result<CommandReply, DispatchError> {
        match self.dispatch(invocation).await {
            Ok(reply) => Ok(reply),
            Err(err) if err.is_recoverable() => {
                debug!(error = %err, "command failed");
                Ok(err.into_reply())
            }
            Err(err) => Err(err),
        }
    }

    async fn dispatch(
        &self,
        invocation: &CommandInvocation,
    ) -> Result<CommandReply, DispatchError> {
        let command = parse_command(&invocation.raw_text)?;
        debug!(trigger = %command.trigger, "executing command");

        // Hold one snapshot for the whole dispatch.
        let snapshot = self.registry.snapshot();
        let endpoint = snapshot
            .get(&command.trigger)
            .ok_or_else(|| DispatchError::UnrecognizedTrigger {
                trigger: command.trigger.clone(),
            })?;

        let ctx = self.resolve_context(invocation).await?;
        let request = OutboundRequest::build(endpoint, &command, &ctx)?;

        let response = self
            .send(&command, request, snapshot.request_timeout())
            .await?;
        self.classify(&command, response).await
    }

    async fn resolve_context(
        &self,
        invocation: &CommandInvocation,
    ) -> Result<ResolvedContext, DispatchError> {
        let channel = self
            .host
            .channel(&invocation.channel_id)
            .await
            .map_err(|source| {
                warn!(channel = %invocation.channel_id, error = %source, "unable to find channel");
                DispatchError::ContextResolution {
                    entity: "channel",
                    id: invocation.channel_id.clone(),
                    source,
                }
            })?;

        let team = self.host.team(&invocation.team_id).await.map_err(|source| {
            warn!(team = %invocation.team_id, error = %source, "unable to find team");
            DispatchError::ContextResolution {
                entity: "team",
                id: invocation.team_id.clone(),
                source,
            }
        })?;

        let user = self.host.user(&invocation.user_id).await.map_err(|source| {
            warn!(user = %invocation.user_id, error = %source, "unable to find user");
            DispatchError::ContextResolution {
                entity: "user",
                id: invocation.user_id.clone(),
                source,
            }
        })?;

        Ok(ResolvedContext {
            channel,
            team,
            user,
        })
    }

    async fn send(
        &self,
        command: &ParsedCommand,
        request: OutboundRequest,
        timeout: Duration,
    ) -> Result<reqwest::Response, DispatchError> {
        debug!(
            trigger = %command.trigger,
            method = %request.method,
            url = %request.url,
            "sending command request"
        );

        let mut builder = self
            .http
            .request(request.reqwest_method(), request.url)
            .headers(request.headers)
            .timeout(timeout);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        builder.send().await.map_err(|e| {
            warn!(trigger = %command.trigger, error = %e, "command http call failed");
            DispatchError::EndpointUnreachable {
                trigger: command.trigger.clone(),
                reason: e.to_string(),
            }
        })
    }

    async fn classify(
        &self,
        command: &ParsedCommand,
        mut response: reqwest::Response,
    ) -> Result<CommandReply, DispatchError> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        if status != StatusCode::OK {
            // The body is diagnostic only; a failed read just leaves it empty.
            let body = read_capped(&mut response, MAX_RESPONSE_SIZE)
                .await
                .unwrap_or_default();
            let line = status_line(status);
            warn!(
                trigger = %command.trigger,
                status = %line,
                body = %String::from_utf8_lossy(&body),
                "remote server returned failed status"
            );
            return Err(DispatchError::RemoteServerError {
                trigger: command.trigger.clone(),
                detail: format!("HTTP {line}"),
                status_line: Some(line),
            });
        }

        let body = read_capped(&mut response, MAX_RESPONSE_SIZE)
            .await
            .map_err(|e| DispatchError::RemoteServerError {
                trigger: command.trigger.clone(),
                status_line: None,
                detail: format!("failed to read body: {e}"),
            })?;

        let reply = parse_reply(content_type.as_deref(), &body).map_err(|detail| {
            warn!(
                trigger = %command.trigger,
                bytes = body.len(),
                error = %detail,
                "remote server returned unusable body"
            );
            DispatchError::RemoteServerError {
                trigger: command.trigger.clone(),
                status_line: None,
                detail,
            }
        })?;

        debug!(
            trigger = %command.trigger,
            response_type = %reply.response_type,
            "command reply received"
        );
        Ok(reply)
    }
}
