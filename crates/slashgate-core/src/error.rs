//! Dispatch error taxonomy.
//!
//! Every variant except [`DispatchError::MalformedInvocation`] is recovered
//! at the dispatcher boundary and turned into an ephemeral reply through
//! [`DispatchError::into_reply`].

use slashgate_plugin::HostError;
use slashgate_types::CommandReply;
use thiserror::Error;

/// Reply text for transport failures.
pub const ENDPOINT_ERROR_TEXT: &str = "Slash Command Failed - Endpoint Error";

/// Reply text for non-200 statuses and unusable 200 bodies.
pub const REMOTE_SERVER_ERROR_TEXT: &str = "Slash Command Failed - Remote Server Error";

/// Errors produced while dispatching a slash command.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// The command line does not start with the command prefix.
    #[error("malformed command invocation: {0}")]
    MalformedInvocation(String),

    /// No endpoint is configured for the trigger.
    #[error("unrecognized command: /{trigger}")]
    UnrecognizedTrigger { trigger: String },

    /// The host could not resolve the channel, team or user.
    #[error("unable to find {entity} {id}: {source}")]
    ContextResolution {
        entity: &'static str,
        id: String,
        #[source]
        source: HostError,
    },

    /// The request never produced an HTTP response (connect, DNS, timeout,
    /// unusable URL).
    #[error("endpoint for /{trigger} unreachable: {reason}")]
    EndpointUnreachable { trigger: String, reason: String },

    /// The endpoint answered with a non-200 status or an unusable body.
    #[error("remote server error for /{trigger}: {detail}")]
    RemoteServerError {
        trigger: String,
        /// Status line (`500 Internal Server Error`) when the status was
        /// not 200.
        status_line: Option<String>,
        detail: String,
    },
}

impl DispatchError {
    /// Whether the error is converted into a reply rather than returned to
    /// the caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MalformedInvocation(_))
    }

    /// The ephemeral reply shown to the invoking user.
    pub fn into_reply(self) -> CommandReply {
        let text = match self {
            Self::MalformedInvocation(reason) => format!("Invalid command: {reason}"),
            Self::UnrecognizedTrigger { trigger } => format!("Unrecognized command: /{trigger}"),
            Self::ContextResolution { entity, id, source } => {
                format!("Unable to find {entity} {id}: {source}")
            }
            Self::EndpointUnreachable { .. } => ENDPOINT_ERROR_TEXT.to_owned(),
            Self::RemoteServerError {
                status_line: Some(status_line),
                ..
            } => format!("{REMOTE_SERVER_ERROR_TEXT} ({status_line})"),
            Self::RemoteServerError { .. } => REMOTE_SERVER_ERROR_TEXT.to_owned(),
        };
        CommandReply::ephemeral(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slashgate_types::ResponseType;

    #[test]
    fn only_malformed_invocation_is_unrecoverable() {
        assert!(!DispatchError::MalformedInvocation("x".into()).is_recoverable());
        assert!(
            DispatchError::UnrecognizedTrigger {
                trigger: "x".into()
            }
            .is_recoverable()
        );
        assert!(
            DispatchError::EndpointUnreachable {
                trigger: "x".into(),
                reason: "refused".into()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn unrecognized_reply() {
        let reply = DispatchError::UnrecognizedTrigger {
            trigger: "doesnotexist".into(),
        }
        .into_reply();
        assert_eq!(reply.response_type, ResponseType::Ephemeral);
        assert_eq!(reply.text, "Unrecognized command: /doesnotexist");
    }

    #[test]
    fn context_reply_names_entity_and_cause() {
        let reply = DispatchError::ContextResolution {
            entity: "channel",
            id: "c1".into(),
            source: HostError::Unavailable("rpc closed".into()),
        }
        .into_reply();
        assert_eq!(
            reply.text,
            "Unable to find channel c1: host unavailable: rpc closed"
        );
    }

    #[test]
    fn endpoint_reply_hides_reason() {
        let reply = DispatchError::EndpointUnreachable {
            trigger: "x".into(),
            reason: "connection refused at 10.0.0.1".into(),
        }
        .into_reply();
        assert_eq!(reply.text, ENDPOINT_ERROR_TEXT);
    }

    #[test]
    fn remote_reply_includes_status_line_only() {
        let reply = DispatchError::RemoteServerError {
            trigger: "x".into(),
            status_line: Some("500 Internal Server Error".into()),
            detail: "stack trace here".into(),
        }
        .into_reply();
        assert_eq!(
            reply.text,
            "Slash Command Failed - Remote Server Error (500 Internal Server Error)"
        );
        assert!(!reply.text.contains("stack trace"));

        let reply = DispatchError::RemoteServerError {
            trigger: "x".into(),
            status_line: None,
            detail: "invalid json".into(),
        }
        .into_reply();
        assert_eq!(reply.text, REMOTE_SERVER_ERROR_TEXT);
    }
}
