//! Bot command parsing and execution.
//!
//! This module turns the content of a Discord message into a `Command`,
//! runs it and hands the transport a list of [`Reply`]s to send back.
//!
//! # Overview
//!
//! 1. **Parsing** - [`Commander::parse`] checks the prefix and recognizes the
//!    command name
//! 2. **Execution** - [`Commander::execute`] routes the command to its action
//! 3. **Response** - Actions never fail, every error becomes a reply
//!
//! # Architecture
//!
//! ```text
//! Discord Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + execute()
//! └─────────────┘
//!      │
//!      ├── parse() ──────────► Command
//!      │
//!      └── execute() ────┐
//!                        ▼
//!             ┌─────────────────────┐
//!             │ Action Handlers     │
//!             │  - handle_help      │
//!             │  - handle_ai        │
//!             │  - handle_turtle    │
//!             │  - handle_tanks     │
//!             └─────────────────────┘
//!                        │
//!                        ▼
//!             ┌─────────────────────┐
//!             │  CommandResult      │
//!             │  - replies          │
//!             └─────────────────────┘
//! ```
//!
//! # Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `help` | None | Display help information |
//! | `ai` | `[temperature] <prompt>` | Complete the prompt with the completion API |
//! | `turtle` | `[face]` | Draw a turtle avatar |
//! | `tanks` | None | Join the channel game and show the board |
//!
//! # Error Handling
//!
//! - **Silent Errors** ([`CommandParseError::NotForBot`]): messages without the
//!   prefix. No reply is sent.
//! - **User Errors** ([`CommandParseError::InvalidCommand`]): unknown command
//!   names. The error carries the message to reply.

mod actions;
mod command;
mod commander;
mod markdown_response;

pub use crate::commands::commander::Commander;

/// Runtime context for command execution.
///
/// # Examples
///
/// ```
/// let context = CommandContext {
///     user_id: "663270358161293343".to_owned(),
///     channel_id: "1009876543210987654".to_owned(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Discord id of the command author
    pub user_id: String,
    /// Discord id of the channel the command was sent in
    pub channel_id: String,
}

/// A message the transport sends back after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Text replying to the command message
    Text(String),
    /// Text posted to the channel, not as a reply
    Announce(String),
    /// PNG attachment replying to the command message
    Image {
        /// Encoded PNG
        bytes: Vec<u8>,
        /// Attachment filename
        filename: String,
    },
}

/// Result of command execution.
///
/// Replies are sent in order.
#[derive(Debug, Default)]
pub struct CommandResult {
    pub replies: Vec<Reply>,
}

impl CommandResult {
    /// A result made of a single text reply.
    pub fn text(text: String) -> Self {
        CommandResult {
            replies: vec![Reply::Text(text)],
        }
    }
}

/// Errors that can occur during command parsing.
///
/// This enum distinguishes between errors that should produce user-facing
/// messages and those that should be silently ignored.
#[derive(Debug)]
pub enum CommandParseError {
    /// Message is not for this bot (silent error)
    NotForBot,
    /// Invalid command with error message
    InvalidCommand(String),
}
