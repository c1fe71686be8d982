//! Command invocations and host-facing replies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single slash command execution as delivered by the host.
///
/// Never persisted; lives for the duration of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    /// Full command line as typed, e.g. `/weather berlin tomorrow`.
    pub raw_text: String,
    /// Opaque team identifier.
    pub team_id: String,
    /// Opaque channel identifier.
    pub channel_id: String,
    /// Opaque user identifier.
    pub user_id: String,
}

impl CommandInvocation {
    pub fn new(
        raw_text: impl Into<String>,
        team_id: impl Into<String>,
        channel_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            raw_text: raw_text.into(),
            team_id: team_id.into(),
            channel_id: channel_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Visibility of a reply in the chat.
///
/// Hosts may define values beyond the two well-known ones; those are kept
/// verbatim in [`ResponseType::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseType {
    /// Visible only to the invoking user.
    #[default]
    Ephemeral,
    /// Posted to the channel.
    InChannel,
    /// Any other host-defined value.
    Other(String),
}

impl ResponseType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ephemeral => "ephemeral",
            Self::InChannel => "in_channel",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ResponseType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ephemeral" | "" => Self::Ephemeral,
            "in_channel" => Self::InChannel,
            _ => Self::Other(value),
        }
    }
}

impl From<ResponseType> for String {
    fn from(value: ResponseType) -> Self {
        match value {
            ResponseType::Other(s) => s,
            other => other.as_str().to_owned(),
        }
    }
}

/// Reply returned to the host for one command invocation.
///
/// Remote endpoints may include fields beyond `response_type` and `text`
/// (attachments, `username`, `icon_url`, `goto_location`, ...). Those are
/// kept in [`extra`](Self::extra) and serialized back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandReply {
    #[serde(default)]
    pub response_type: ResponseType,

    #[serde(default)]
    pub text: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CommandReply {
    /// An ephemeral plain-text reply.
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Whether the reply carries nothing the host could display.
    /// Whitespace-only text counts as empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_type_well_known_values() {
        assert_eq!(ResponseType::from("ephemeral".to_owned()), ResponseType::Ephemeral);
        assert_eq!(ResponseType::from("in_channel".to_owned()), ResponseType::InChannel);
        assert_eq!(ResponseType::from(String::new()), ResponseType::Ephemeral);
    }

    #[test]
    fn response_type_keeps_unknown_values() {
        let rt = ResponseType::from("thread".to_owned());
        assert_eq!(rt, ResponseType::Other("thread".into()));
        assert_eq!(String::from(rt), "thread");
    }

    #[test]
    fn reply_deserializes_minimal_payload() {
        let reply: CommandReply =
            serde_json::from_str(r#"{"response_type":"ephemeral","text":"hello"}"#).unwrap();
        assert_eq!(reply.response_type, ResponseType::Ephemeral);
        assert_eq!(reply.text, "hello");
        assert!(reply.extra.is_empty());
    }

    #[test]
    fn reply_defaults_missing_response_type_to_ephemeral() {
        let reply: CommandReply = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(reply.response_type, ResponseType::Ephemeral);
    }

    #[test]
    fn reply_passes_unknown_fields_through() {
        let input = serde_json::json!({
            "response_type": "in_channel",
            "text": "done",
            "username": "bot",
            "attachments": [{"title": "t"}]
        });
        let reply: CommandReply = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(reply.response_type, ResponseType::InChannel);
        assert_eq!(reply.extra["username"], "bot");
        assert_eq!(serde_json::to_value(&reply).unwrap(), input);
    }

    #[test]
    fn empty_reply_detection() {
        assert!(CommandReply::default().is_empty());
        assert!(!CommandReply::ephemeral("x").is_empty());
        assert!(CommandReply::ephemeral("  \n\t").is_empty());

        let reply: CommandReply = serde_json::from_str(r#"{"props":{"a":1}}"#).unwrap();
        assert!(!reply.is_empty());
    }
}
