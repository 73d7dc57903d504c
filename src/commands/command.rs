//! Command parsing.
//!
//! Converts Discord message content into structured [`Command`] enums. The
//! arguments of the `ai` command are kept verbatim, whitespace included, so the
//! prompt reaches the completion API unchanged.

use log::debug;

use crate::commands::markdown_response::format_unknown_command;

/// Represents a parsed bot command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Display help information
    Help,
    /// Complete a prompt
    ///
    /// # Fields
    ///
    /// * `String` - Raw arguments, optional temperature and prompt
    Ai(String),
    /// Draw a turtle avatar
    ///
    /// # Fields
    ///
    /// * `Option<String>` - Face name, a random face when absent
    Turtle(Option<String>),
    /// Join the channel game and show the board
    Tanks,
}

/// Errors that can occur during command parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The message does not start with the prefix
    UnableToParse,
    /// The command is not recognized
    Unknown,
}

impl Command {
    /// Parses a message content into a Command.
    ///
    /// The prefix alone parses as [`Command::Help`]. Command names are case
    /// insensitive.
    ///
    /// # Errors
    ///
    /// - The message does not start with `prefix` - [`CommandParsingError::UnableToParse`]
    /// - The command is not recognized - [`CommandParsingError::Unknown`]
    ///
    /// # Examples
    ///
    /// ```
    /// let result = Command::parse("!", "!ai 0.5 tell me a joke");
    /// assert_eq!(result, Ok(Command::Ai("0.5 tell me a joke".to_owned())));
    /// ```
    pub fn parse(prefix: &str, body: &str) -> Result<Self, CommandParsingError> {
        let Some(rest) = body.strip_prefix(prefix) else {
            return Err(CommandParsingError::UnableToParse);
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Ok(Command::Help);
        }

        let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));

        debug!("Parsing command: {} with args {:?}", name, args);

        match name.to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "ai" => Ok(Command::Ai(args.to_owned())),
            "turtle" => Ok(Command::Turtle(
                args.split_whitespace().next().map(str::to_lowercase),
            )),
            "tanks" => Ok(Command::Tanks),
            _ => Err(CommandParsingError::Unknown),
        }
    }
}

/// Formats a command error into a user-friendly message.
///
/// Returns `None` for messages which are not commands, no reply is expected
/// for those.
pub fn format_command_error(error: CommandParsingError, prefix: &str) -> Option<String> {
    match error {
        CommandParsingError::Unknown => Some(format_unknown_command(prefix)),
        CommandParsingError::UnableToParse => None,
    }
}
