//! Response reading and classification.

use reqwest::StatusCode;
use slashgate_types::CommandReply;

/// Largest response body read from an endpoint. Anything beyond is
/// discarded unread.
pub const MAX_RESPONSE_SIZE: usize = 1024 * 1024;

/// Read at most `limit` bytes of the response body.
///
/// Stops pulling chunks once the limit is reached, whatever the declared
/// `Content-Length`.
pub async fn read_capped(
    response: &mut reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, reqwest::Error> {
    let mut buf = Vec::new();
    while buf.len() < limit {
        let Some(chunk) = response.chunk().await? else {
            break;
        };
        let room = limit - buf.len();
        buf.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }
    Ok(buf)
}

/// `200 OK` style status line.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// Whether a `Content-Type` header value names JSON.
fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}

/// Interpret a 200 response body as a command reply.
///
/// JSON bodies are decoded as a reply payload. Any other content type is
/// taken as plain reply text. Returns a description of the problem when the
/// body cannot be used.
pub fn parse_reply(content_type: Option<&str>, body: &[u8]) -> Result<CommandReply, String> {
    let reply = if is_json(content_type) {
        serde_json::from_slice::<Option<CommandReply>>(body)
            .map_err(|e| format!("invalid JSON body: {e}"))?
            .ok_or_else(|| "null JSON body".to_owned())?
    } else {
        CommandReply {
            text: String::from_utf8_lossy(body).into_owned(),
            ..CommandReply::default()
        }
    };

    if reply.is_empty() {
        return Err("empty reply".into());
    }
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slashgate_types::ResponseType;

    #[test]
    fn status_line_includes_reason() {
        assert_eq!(status_line(StatusCode::INTERNAL_SERVER_ERROR), "500 Internal Server Error");
        assert_eq!(status_line(StatusCode::NOT_FOUND), "404 Not Found");
        assert_eq!(status_line(StatusCode::from_u16(599).unwrap()), "599");
    }

    #[test]
    fn json_content_type_detection() {
        assert!(is_json(Some("application/json")));
        assert!(is_json(Some("Application/JSON; charset=utf-8")));
        assert!(!is_json(Some("text/plain")));
        assert!(!is_json(None));
    }

    #[test]
    fn parses_json_reply() {
        let reply = parse_reply(
            Some("application/json"),
            br#"{"response_type":"ephemeral","text":"hello"}"#,
        )
        .unwrap();
        assert_eq!(reply.response_type, ResponseType::Ephemeral);
        assert_eq!(reply.text, "hello");
    }

    #[test]
    fn json_null_and_empty_object_are_rejected() {
        assert!(parse_reply(Some("application/json"), b"null").is_err());
        assert!(parse_reply(Some("application/json"), b"{}").is_err());
        assert!(parse_reply(Some("application/json"), br#"{"text":"  "}"#).is_err());
    }

    #[test]
    fn truncated_json_is_rejected() {
        let err = parse_reply(Some("application/json"), br#"{"text":"hel"#).unwrap_err();
        assert!(err.starts_with("invalid JSON body"));
    }

    #[test]
    fn plain_text_becomes_reply_text() {
        let reply = parse_reply(Some("text/plain"), b"deployed to prod").unwrap();
        assert_eq!(reply.text, "deployed to prod");
        assert_eq!(reply.response_type, ResponseType::Ephemeral);

        let reply = parse_reply(None, b"no content type").unwrap();
        assert_eq!(reply.text, "no content type");
    }

    #[test]
    fn blank_plain_text_is_rejected() {
        assert!(parse_reply(Some("text/plain"), b"").is_err());
        assert!(parse_reply(Some("text/plain"), b"  \n").is_err());
    }
}
