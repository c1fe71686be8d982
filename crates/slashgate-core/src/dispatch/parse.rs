//! Command line parsing.

use crate::error::DispatchError;

/// Character that introduces a slash command.
pub const COMMAND_PREFIX: char = '/';

/// Trigger and arguments split out of a raw command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercase trigger without the prefix. Empty for a blank line or a
    /// bare `/`.
    pub trigger: String,
    /// Remaining tokens joined by single spaces.
    pub argument_text: String,
}

impl ParsedCommand {
    /// Trigger with the prefix restored, as forwarded in the `command`
    /// parameter.
    pub fn command(&self) -> String {
        format!("{COMMAND_PREFIX}{}", self.trigger)
    }
}

/// Split a raw command line into trigger and argument text.
///
/// Blank input yields an empty trigger, which no registry contains. A
/// first token that does not start with [`COMMAND_PREFIX`] is rejected.
pub fn parse_command(raw_text: &str) -> Result<ParsedCommand, DispatchError> {
    let mut tokens = raw_text.split_whitespace();

    let Some(first) = tokens.next() else {
        return Ok(ParsedCommand {
            trigger: String::new(),
            argument_text: String::new(),
        });
    };

    let Some(trigger) = first.strip_prefix(COMMAND_PREFIX) else {
        return Err(DispatchError::MalformedInvocation(format!(
            "command must start with '{COMMAND_PREFIX}', got {first:?}"
        )));
    };

    Ok(ParsedCommand {
        trigger: trigger.to_lowercase(),
        argument_text: tokens.collect::<Vec<_>>().join(" "),
    })
}
