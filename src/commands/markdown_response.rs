//! Markdown response formatters for bot commands.
//!
//! This module builds every text the bot replies with. User supplied or API
//! generated text goes through [`escape_markdown`] so Discord shows it
//! verbatim.

use crate::avatar::FACES;

/// Longest completion relayed to Discord, in characters.
pub const MAX_RESPONSE_CHARS: usize = 1900;

/// Characters Discord interprets as markdown.
const MARKDOWN_CHARS: &[char] = &['\\', '*', '_', '~', '`', '|', '>'];

/// Formats the help message showing available bot commands.
///
/// # Examples
///
/// ```
/// let help = format_help("!");
/// assert!(help.contains("Commands:"));
/// ```
pub fn format_help(prefix: &str) -> String {
    format!(
        "Commands:\n\
        - `{p}ai [temperature] <prompt>`: complete the prompt with the AI, see `{p}ai help`\n\
        - `{p}turtle [face]`: draw a turtle, faces are {faces}\n\
        - `{p}tanks`: join the turtle tanks game of this channel and show the board\n\
        - `{p}help`: show this help message",
        p = prefix,
        faces = FACES.join(", ")
    )
}

/// Formats the usage of the `ai` command.
pub fn format_ai_help(prefix: &str) -> String {
    format!(
        "Usage: `{p}ai [temperature] <prompt>`\n\
        Completes the prompt with the AI and replies with the result, prompt included.\n\
        The optional temperature, usually between 0 and 2, makes the answer more random when higher.\n\
        Example: `{p}ai 0.5 Once upon a time`",
        p = prefix
    )
}

/// Formats a response for an unknown command.
///
/// # Examples
///
/// ```
/// let msg = format_unknown_command("!");
/// assert!(msg.contains("Unknown command"));
/// ```
pub fn format_unknown_command(prefix: &str) -> String {
    format!(
        "Unknown command. Type `{}help` for more information.",
        prefix
    )
}

/// Formats the hint sent when the `ai` command has no prompt.
pub fn format_no_prompt(prefix: &str) -> String {
    format!("No prompt given. Try `{}ai help`", prefix)
}

pub fn format_access_denied() -> String {
    "Sorry, this function has been disabled for your user.".to_owned()
}

/// Formats a completion for Discord.
///
/// The text is cut to [`MAX_RESPONSE_CHARS`] characters, then escaped.
pub fn format_completion(text: &str) -> String {
    let truncated: String = text.chars().take(MAX_RESPONSE_CHARS).collect();
    escape_markdown(&truncated)
}

/// Prefixes every Discord markdown character with a backslash.
///
/// # Examples
///
/// ```
/// assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn format_game_created() -> String {
    "Created new game!".to_owned()
}

pub fn format_game_joined() -> String {
    "You have successfully joined the game!".to_owned()
}

pub fn format_render_error() -> String {
    "Failed to render the image.".to_owned()
}
