//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing bot commands. It coordinates command parsing and execution, routing
//! commands to their appropriate handlers.
//!
//! # Architecture
//!
//! The Commander follows a two-phase processing model:
//!
//! 1. **Parsing Phase** - Validates and parses raw message text into structured [`Command`] enums
//! 2. **Execution Phase** - Routes parsed commands to specialized handlers that produce results
//!
//! # Flow
//!
//! ```text
//! Discord Message → parse() → Command → execute() → CommandResult
//! ```
//!
//! # Examples
//!
//! ```no_run
//! let commander = Commander::new("!", completer, AccessPolicy::default(), CompletionRequest::new(""));
//!
//! let command = commander.parse("!tanks").unwrap();
//! let context = CommandContext {
//!     user_id: "663270358161293343".to_owned(),
//!     channel_id: "1009876543210987654".to_owned(),
//! };
//! let result = commander.execute(&command, &context).await;
//! ```

use crate::{
    access::AccessPolicy,
    commands::{
        CommandContext, CommandParseError, CommandResult,
        actions::{handle_ai, handle_help, handle_tanks, handle_turtle},
        command::{Command, format_command_error},
    },
    completion::{Completer, CompletionRequest, Requester},
    tanks::GameRegistry,
};

/// Command orchestrator for parsing and executing bot commands.
///
/// The Commander owns everything the commands need across messages: the
/// completion client, the access policy and the game sessions of every
/// channel. It is shared by all message handlers.
///
/// # Supported Commands
///
/// - `help` - Display help information
/// - `ai [temperature] <prompt>` - Complete a prompt
/// - `turtle [face]` - Draw a turtle avatar
/// - `tanks` - Join the channel game and show the board
pub struct Commander<R: Requester> {
    /// Prefix every command starts with
    prefix: String,
    /// Completion client used by `ai`
    completer: Completer<R>,
    /// Users refused by `ai`
    access: AccessPolicy,
    /// Model, token limit and temperature of `ai` requests
    defaults: CompletionRequest,
    /// Game sessions indexed by channel
    registry: GameRegistry,
}

impl<R: Requester> Commander<R> {
    /// Creates a new Commander with an empty game registry.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix every command starts with
    /// * `completer` - Completion client
    /// * `access` - Users refused by the `ai` command
    /// * `defaults` - Request whose model, token limit and temperature are
    ///   used by the `ai` command, its prompt is ignored
    pub fn new(
        prefix: &str,
        completer: Completer<R>,
        access: AccessPolicy,
        defaults: CompletionRequest,
    ) -> Self {
        Commander {
            prefix: prefix.to_owned(),
            completer,
            access,
            defaults,
            registry: GameRegistry::default(),
        }
    }

    /// Parses a Discord message content into a structured command.
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - Successfully parsed command
    /// * `Err(CommandParseError::NotForBot)` - Message does not start with the prefix
    /// * `Err(CommandParseError::InvalidCommand)` - Command name is unknown
    ///
    /// # Examples
    ///
    /// ```no_run
    /// // Valid command
    /// assert!(commander.parse("!help").is_ok());
    ///
    /// // Not a command
    /// assert!(commander.parse("Hello, world!").is_err());
    /// ```
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        Command::parse(&self.prefix, body).map_err(|error| {
            // Return silently if the message is not a command
            // Otherwise, send an error message
            match format_command_error(error, &self.prefix) {
                Some(message) => CommandParseError::InvalidCommand(message),
                None => CommandParseError::NotForBot,
            }
        })
    }

    /// Executes a parsed command and returns the replies to send.
    ///
    /// # Command Handlers
    ///
    /// - [`Command::Help`] → [`handle_help`]
    /// - [`Command::Ai`] → [`handle_ai`]
    /// - [`Command::Turtle`] → [`handle_turtle`]
    /// - [`Command::Tanks`] → [`handle_tanks`]
    pub async fn execute(&self, command: &Command, context: &CommandContext) -> CommandResult {
        match command {
            Command::Help => handle_help(&self.prefix),
            Command::Ai(args) => {
                handle_ai(
                    context,
                    args,
                    &self.prefix,
                    &self.access,
                    &self.completer,
                    &self.defaults,
                )
                .await
            }
            Command::Turtle(face) => handle_turtle(face.as_deref()),
            Command::Tanks => handle_tanks(context, &self.registry).await,
        }
    }
}
