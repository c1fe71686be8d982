//! Per-trigger endpoint configuration.
//!
//! An [`EndpointConfig`] is the resolved, dispatch-ready form of one
//! configured slash command. Registry snapshots hold one per trigger.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// HTTP method used to call a command endpoint.
///
/// Determines where the command parameters are placed: the query string
/// for [`RequestType::Get`], a form-encoded body for [`RequestType::Post`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RequestType {
    Get,
    #[default]
    Post,
}

impl RequestType {
    /// Canonical upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = String;

    /// Parse a method name case-insensitively. An empty string selects
    /// the default ([`RequestType::Post`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" | "" => Ok(Self::Post),
            other => Err(format!("unsupported request type: {other}")),
        }
    }
}

impl TryFrom<String> for RequestType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RequestType> for String {
    fn from(value: RequestType) -> Self {
        value.as_str().to_owned()
    }
}

/// Dispatch configuration for a single trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Lowercase trigger word, without the leading `/`.
    pub trigger: String,

    /// Name shown in the host's command palette.
    #[serde(default)]
    pub display_name: String,

    /// Longer description shown in the host's command palette.
    #[serde(default)]
    pub description: String,

    /// Whether the host should offer the trigger in autocomplete.
    #[serde(default)]
    pub auto_complete: bool,

    /// Autocomplete description line.
    #[serde(default)]
    pub auto_complete_desc: String,

    /// Autocomplete argument hint (e.g. `[city]`).
    #[serde(default)]
    pub auto_complete_hint: String,

    /// Absolute URL of the remote endpoint.
    pub command_url: String,

    /// Method used to call [`command_url`](Self::command_url).
    #[serde(default)]
    pub request_type: RequestType,

    /// Extra headers sent with every request for this trigger.
    ///
    /// Applied after the fixed headers, so an entry here replaces a fixed
    /// header with the same name.
    #[serde(default)]
    pub custom_headers: BTreeMap<String, String>,
}

impl EndpointConfig {
    /// Create an endpoint with no metadata and no custom headers.
    pub fn new(
        trigger: impl Into<String>,
        command_url: impl Into<String>,
        request_type: RequestType,
    ) -> Self {
        Self {
            trigger: trigger.into().to_lowercase(),
            display_name: String::new(),
            description: String::new(),
            auto_complete: false,
            auto_complete_desc: String::new(),
            auto_complete_hint: String::new(),
            command_url: command_url.into(),
            request_type,
            custom_headers: BTreeMap::new(),
        }
    }

    /// Add a custom header (builder style).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_type_parses_case_insensitively() {
        assert_eq!("get".parse::<RequestType>().unwrap(), RequestType::Get);
        assert_eq!("Get".parse::<RequestType>().unwrap(), RequestType::Get);
        assert_eq!("POST".parse::<RequestType>().unwrap(), RequestType::Post);
        assert_eq!("".parse::<RequestType>().unwrap(), RequestType::Post);
    }

    #[test]
    fn request_type_rejects_unknown_method() {
        let err = "PATCH".parse::<RequestType>().unwrap_err();
        assert!(err.contains("PATCH"));
    }

    #[test]
    fn request_type_serde_uses_uppercase() {
        let json = serde_json::to_string(&RequestType::Get).unwrap();
        assert_eq!(json, "\"GET\"");
        let parsed: RequestType = serde_json::from_str("\"post\"").unwrap();
        assert_eq!(parsed, RequestType::Post);
        assert!(serde_json::from_str::<RequestType>("\"DELETE\"").is_err());
    }

    #[test]
    fn endpoint_new_lowercases_trigger() {
        let ep = EndpointConfig::new("Weather", "https://example.com/hook", RequestType::Get);
        assert_eq!(ep.trigger, "weather");
        assert!(ep.custom_headers.is_empty());
    }

    #[test]
    fn endpoint_with_header_replaces_duplicate_name() {
        let ep = EndpointConfig::new("w", "https://example.com", RequestType::Post)
            .with_header("X-Token", "a")
            .with_header("X-Token", "b");
        assert_eq!(ep.custom_headers.len(), 1);
        assert_eq!(ep.custom_headers["X-Token"], "b");
    }
}
