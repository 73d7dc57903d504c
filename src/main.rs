//! Turtlebot - A Discord bot relaying text completions and drawing turtles.
//!
//! This is the main entry point of the turtlebot, which listens to Discord
//! messages and answers the commands it recognizes.
//!
//! # Features
//!
//! - **AI Completions**: Relay a prompt to an OpenAI compatible completion API,
//!   with an optional sampling temperature
//! - **Prompt Filtering**: Banned words are masked before the prompt leaves the bot
//! - **Access Policy**: Deny the completion command to some users
//! - **Turtle Avatars**: Draw a turtle wearing a chosen or random face
//! - **Turtle Tanks**: One toy game per channel, rendered as a PNG for each player
//! - **YAML Configuration**: Simple configuration file format with environment variable support
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! discord:
//!   token: "your-bot-token"
//!   prefix: "!"
//!
//! completion:
//!   api_key: "sk-..."
//!
//! access:
//!   denied_users: []
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `TURTLEBOT_` prefix:
//!
//! ```bash
//! export TURTLEBOT_DISCORD__TOKEN="your-bot-token"
//! export TURTLEBOT_COMPLETION__API_KEY="sk-..."
//! ```
//!
//! # Usage
//!
//! ```bash
//! turtlebot --config config.yaml
//! ```
//!
//! # Bot Commands
//!
//! - `!help` - Display help information
//! - `!ai [temperature] <prompt>` - Complete a prompt
//! - `!turtle [face]` - Draw a turtle
//! - `!tanks` - Join the game of the channel and show the board

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod access;
mod avatar;
mod bot;
mod canvas;
mod commands;
mod completion;
mod config;
mod filter;
mod tanks;

/// Command-line arguments for the turtlebot.
///
/// Everything else is configured through the YAML file (see [`config::Config`]).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Values can be overridden with `TURTLEBOT_` environment variables, e.g.
    /// `TURTLEBOT_DISCORD__TOKEN`.
    #[arg(short, long)]
    config: String,
}

/// Main entry point for the turtlebot.
///
/// 1. **Logging Setup**: Configures the logger with `info` level by default
///    (can be overridden with the `RUST_LOG` environment variable)
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML configuration file and applies
///    the environment variable overrides
/// 4. **Bot Execution**: Builds the command handlers and connects to Discord
///
/// Startup errors are logged and end the process without panicking.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting turtlebot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Discord client stopped: {}", e);
    }
}
