//! Tanks command handler.
//!
//! Creates the game of the channel on first use, enrolls the author and shows
//! them the board.

use std::collections::hash_map::Entry;

use log::{debug, error, info};

use crate::{
    commands::{
        CommandContext, CommandResult, Reply,
        markdown_response::{format_game_created, format_game_joined, format_render_error},
    },
    tanks::{BOARD_FILENAME, GameRegistry},
};

/// Handles the `tanks` command.
///
/// The registry stays locked for the whole command. The replies are, in order:
///
/// 1. "Created new game!" posted to the channel when the channel had no game
/// 2. The join confirmation when the author was not enrolled yet, or the
///    reason the join failed, in which case nothing else follows
/// 3. The board rendered for the author
pub async fn handle_tanks(context: &CommandContext, registry: &GameRegistry) -> CommandResult {
    debug!(
        "handling tanks command for {} in {}",
        context.user_id, context.channel_id
    );

    let mut replies = Vec::new();
    let mut sessions = registry.sessions().await;

    let session = match sessions.entry(context.channel_id.clone()) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            info!("created game in channel {}", context.channel_id);
            replies.push(Reply::Announce(format_game_created()));
            entry.insert(registry.new_session())
        }
    };

    if !session.has_player(&context.user_id) {
        if let Err(e) = session.join(&context.user_id) {
            info!("{} could not join the game: {:?}", context.user_id, e);
            replies.push(Reply::Text(e.to_string()));
            return CommandResult { replies };
        }
        debug!(
            "game in {} has {} players",
            context.channel_id,
            session.players().len()
        );
        replies.push(Reply::Text(format_game_joined()));
    }

    match session.render(&context.user_id) {
        Ok(bytes) => replies.push(Reply::Image {
            bytes,
            filename: BOARD_FILENAME.to_owned(),
        }),
        Err(e) => {
            error!("failed to render game board: {}", e);
            replies.push(Reply::Text(format_render_error()));
        }
    }

    CommandResult { replies }
}
