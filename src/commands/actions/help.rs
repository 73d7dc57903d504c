//! Help command handler.
//!
//! This is a stateless command that always returns the same help message.

use log::debug;

use crate::commands::{CommandResult, markdown_response::format_help};

/// Returns formatted help information about available commands.
pub fn handle_help(prefix: &str) -> CommandResult {
    debug!("handling help command");

    CommandResult::text(format_help(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Reply;

    #[test]
    fn test_handle_help() {
        let result = handle_help("!");

        assert_eq!(result.replies.len(), 1);
        assert!(matches!(&result.replies[0], Reply::Text(text) if text.contains("`!help`")));
    }
}
