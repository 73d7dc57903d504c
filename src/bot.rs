//! Bot module connecting Discord to the command handlers.
//!
//! This module provides the main [`Bot`] implementation. It builds the
//! [`Commander`] from the configuration, logs in to Discord and turns every
//! incoming message into a command whose replies are sent back.
//!
//! # Command Processing Flow
//!
//! ```text
//! Discord Message → Parse Command → Execute → Send Replies
//! ```
//!
//! # Example
//!
//! ```no_run
//! let config = Config::load("config.yaml")?;
//!
//! // Create and start the bot
//! let bot = Bot::new(config)?;
//! bot.start().await?; // Runs until the gateway connection fails
//! ```

use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use serenity::all::{
    Client, Context, CreateAttachment, CreateMessage, EventHandler, GatewayIntents, Message, Ready,
};

use crate::{
    access::AccessPolicy,
    commands::{CommandContext, CommandParseError, Commander, Reply},
    completion::{Completer, CompletionRequest, OpenAiRequester},
    config::Config,
    filter::WordFilter,
};

/// Main bot structure holding the Discord token and the command handlers.
pub struct Bot {
    /// Discord bot token
    token: String,

    /// Command parser and executor.
    ///
    /// Shared by every message handler task. Only the game registry inside is
    /// mutable, behind its own lock.
    commander: Arc<Commander<OpenAiRequester>>,
}

/// Serenity event handler forwarding messages to the [`Commander`].
struct Handler {
    commander: Arc<Commander<OpenAiRequester>>,
}

impl Bot {
    /// Builds the completion client, the word filter, the access policy and
    /// the command handlers from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or if the banned
    /// word list does not compile.
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let requester = OpenAiRequester::new(
            &config.completion.url,
            &config.completion.api_key,
            Duration::from_millis(config.completion.timeout),
        )?;
        let filter = WordFilter::new(&config.filter.words)?;
        let completer = Completer::new(requester, Box::new(filter));

        let defaults = CompletionRequest::new("")
            .model(&config.completion.model)
            .max_tokens(config.completion.max_tokens)
            .temperature(config.completion.temperature);

        let commander = Arc::new(Commander::new(
            &config.discord.prefix,
            completer,
            AccessPolicy::new(&config.access.denied_users),
            defaults,
        ));

        Ok(Bot {
            token: config.discord.token,
            commander,
        })
    }

    /// Connects to the Discord gateway and handles messages until the
    /// connection is lost for good.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let handler = Handler {
            commander: Arc::clone(&self.commander),
        };

        let mut client = Client::builder(&self.token, intents)
            .event_handler(handler)
            .await?;

        info!("connecting to discord");
        client.start().await?;

        Ok(())
    }
}

impl Handler {
    /// Sends `replies` in order, a failed send does not stop the next ones.
    async fn send_replies(ctx: &Context, msg: &Message, replies: Vec<Reply>) {
        for reply in replies {
            let result = match reply {
                Reply::Text(text) => msg.reply(ctx, text).await.map(|_| ()),
                Reply::Announce(text) => msg.channel_id.say(ctx, text).await.map(|_| ()),
                Reply::Image { bytes, filename } => {
                    let builder = CreateMessage::new()
                        .add_file(CreateAttachment::bytes(bytes, filename))
                        .reference_message(msg);
                    msg.channel_id
                        .send_message(ctx, builder)
                        .await
                        .map(|_| ())
                }
            };

            if let Err(e) = result {
                warn!("failed to send reply in {}: {}", msg.channel_id, e);
            }
        }
    }
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore other bots and ourselves
        if msg.author.bot {
            return;
        }

        let command = match self.commander.parse(&msg.content) {
            Ok(command) => command,
            Err(e) => match e {
                // Return silently if the message is not for the bot
                CommandParseError::NotForBot => return,
                // Send error message if the command is invalid
                CommandParseError::InvalidCommand(message) => {
                    Self::send_replies(&ctx, &msg, vec![Reply::Text(message)]).await;
                    return;
                }
            },
        };

        debug!("command {:?} from {}", command, msg.author.id);

        let context = CommandContext {
            user_id: msg.author.id.to_string(),
            channel_id: msg.channel_id.to_string(),
        };

        let result = self.commander.execute(&command, &context).await;
        Self::send_replies(&ctx, &msg, result.replies).await;
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!("{} is connected", ready.user.name);
    }
}
