//! Outbound request construction.
//!
//! Parameters go in the query string for GET and in a form-encoded body for
//! POST. Headers are layered in a fixed order: `Accept`, then
//! `Content-Type` (POST only), then the endpoint's custom headers. Later
//! layers replace earlier ones, so a custom `Accept` wins over the default.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use slashgate_plugin::{Channel, Team, User};
use slashgate_types::{EndpointConfig, RequestType};
use tracing::warn;
use url::Url;

use super::parse::ParsedCommand;
use crate::error::DispatchError;

/// Value sent in the `token` parameter. Endpoint tokens are not supported.
pub const TOKEN_PLACEHOLDER: &str = "NOT SUPPORTED";

const ACCEPT_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Host entities resolved for one invocation.
#[derive(Debug, Clone)]
pub struct ResolvedContext {
    pub channel: Channel,
    pub team: Team,
    pub user: User,
}

/// A fully built request, ready to send.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: RequestType,
    pub url: Url,
    pub headers: HeaderMap,
    /// Form-encoded parameters for POST; `None` for GET.
    pub body: Option<String>,
}

impl OutboundRequest {
    /// Build the request for `endpoint` from a parsed command and its
    /// resolved context.
    pub fn build(
        endpoint: &EndpointConfig,
        command: &ParsedCommand,
        ctx: &ResolvedContext,
    ) -> Result<Self, DispatchError> {
        let mut url = Url::parse(&endpoint.command_url).map_err(|e| {
            DispatchError::EndpointUnreachable {
                trigger: endpoint.trigger.clone(),
                reason: format!("invalid command URL {:?}: {e}", endpoint.command_url),
            }
        })?;

        let encoded = encode_params(command, ctx);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let body = match endpoint.request_type {
            RequestType::Get => {
                let query = match url.query() {
                    Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
                    _ => encoded,
                };
                url.set_query(Some(&query));
                None
            }
            RequestType::Post => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
                Some(encoded)
            }
        };

        for (name, value) in &endpoint.custom_headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(
                    trigger = %endpoint.trigger,
                    header = %name,
                    "skipping invalid custom header"
                ),
            }
        }

        Ok(Self {
            method: endpoint.request_type,
            url,
            headers,
            body,
        })
    }

    pub fn reqwest_method(&self) -> reqwest::Method {
        match self.method {
            RequestType::Get => reqwest::Method::GET,
            RequestType::Post => reqwest::Method::POST,
        }
    }
}

/// The nine command parameters, in key order.
pub fn command_params(
    command: &ParsedCommand,
    ctx: &ResolvedContext,
) -> [(&'static str, String); 9] {
    [
        ("channel_id", ctx.channel.id.clone()),
        ("channel_name", ctx.channel.name.clone()),
        ("command", command.command()),
        ("team_domain", ctx.team.name.clone()),
        ("team_id", ctx.team.id.clone()),
        ("text", command.argument_text.clone()),
        ("token", TOKEN_PLACEHOLDER.to_owned()),
        ("user_id", ctx.user.id.clone()),
        ("user_name", ctx.user.username.clone()),
    ]
}

fn encode_params(command: &ParsedCommand, ctx: &ResolvedContext) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(command_params(command, ctx))
        .finish()
}
