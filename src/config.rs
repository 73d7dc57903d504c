//! Configuration file structures for the turtlebot.
//!
//! The configuration is a YAML file split into four sections: the Discord
//! account, the completion API, the access policy and the word filter. Any value
//! can be overridden with an environment variable prefixed by `TURTLEBOT_`, using
//! `__` to separate nested keys.
//!
//! # Configuration File Format
//!
//! ```yaml
//! discord:
//!   # Bot token from the Discord developer portal
//!   token: "your-token"
//!   # Prefix every command starts with
//!   prefix: "!"
//!
//! completion:
//!   # Secret key of the completion API
//!   api_key: "sk-..."
//!   url: "https://api.openai.com"
//!   model: "text-davinci-002"
//!   max_tokens: 250
//!   temperature: 0.9
//!   # Per request timeout in milliseconds
//!   timeout: 30000
//!
//! access:
//!   # Users refused by the `ai` command
//!   denied_users: ["663270358161293343"]
//!
//! filter:
//!   # Words added to the built-in banned word list
//!   words: ["heck"]
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export TURTLEBOT_DISCORD__TOKEN="your-token"
//! export TURTLEBOT_COMPLETION__API_KEY="sk-..."
//! ```

use std::path::Path;

use anyhow::bail;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::completion::{
    DEFAULT_AI_MODEL, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "TURTLEBOT_";

/// Root configuration structure for the turtlebot.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Discord account configuration
    pub discord: Discord,
    /// Completion API configuration
    pub completion: Completion,
    /// Access policy of the `ai` command
    #[serde(default)]
    pub access: Access,
    /// Extra banned words
    #[serde(default)]
    pub filter: Filter,
}

/// Discord account configuration.
#[derive(Debug, Deserialize)]
pub struct Discord {
    /// Bot token.
    ///
    /// Prefer the `TURTLEBOT_DISCORD__TOKEN` environment variable over writing
    /// the token in the configuration file.
    pub token: String,

    /// Prefix every command starts with, `!` by default.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Completion API configuration.
///
/// Only the API key is mandatory, every other value falls back to the defaults
/// of the [`completion`](crate::completion) module.
#[derive(Debug, Deserialize)]
pub struct Completion {
    /// Secret key sent as a bearer token.
    pub api_key: String,

    /// Base URL of the completion API, without trailing slash.
    #[serde(default = "default_url")]
    pub url: String,

    /// Model used when the command does not name one.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum number of generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature used when the prompt has no numeric prefix.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Timeout of a single upstream call, in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Access policy configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Access {
    /// Discord user ids refused by the `ai` command.
    #[serde(default)]
    pub denied_users: Vec<String>,
}

/// Word filter configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Filter {
    /// Words banned on top of the built-in list.
    #[serde(default)]
    pub words: Vec<String>,
}

fn default_prefix() -> String {
    "!".to_owned()
}

fn default_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_model() -> String {
    DEFAULT_AI_MODEL.to_owned()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

impl Config {
    /// Loads the configuration from a YAML file, then applies the
    /// `TURTLEBOT_` environment variable overrides.
    ///
    /// A trailing slash in the completion URL is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or if the merged
    /// configuration misses a mandatory value.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        if !Path::new(path).exists() {
            bail!("config file {} not found", path);
        }

        let mut config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        while config.completion.url.ends_with('/') {
            config.completion.url.pop();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_load_full_config() {
        let file = write_config(
            r#"
discord:
  token: "discord-token"
  prefix: "$"
completion:
  api_key: "sk-test"
  url: "http://localhost:8080/"
  model: "davinci"
  max_tokens: 100
  temperature: 0.5
  timeout: 1000
access:
  denied_users: ["42"]
filter:
  words: ["heck"]
"#,
        );

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.discord.token, "discord-token");
        assert_eq!(config.discord.prefix, "$");
        assert_eq!(config.completion.api_key, "sk-test");
        assert_eq!(config.completion.url, "http://localhost:8080");
        assert_eq!(config.completion.model, "davinci");
        assert_eq!(config.completion.max_tokens, 100);
        assert_eq!(config.completion.temperature, 0.5);
        assert_eq!(config.completion.timeout, 1000);
        assert_eq!(config.access.denied_users, vec!["42".to_owned()]);
        assert_eq!(config.filter.words, vec!["heck".to_owned()]);
    }

    #[test]
    #[serial]
    fn test_load_minimal_config_uses_defaults() {
        let file = write_config(
            r#"
discord:
  token: "discord-token"
completion:
  api_key: "sk-test"
"#,
        );

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.discord.prefix, "!");
        assert_eq!(config.completion.url, "https://api.openai.com");
        assert_eq!(config.completion.model, "text-davinci-002");
        assert_eq!(config.completion.max_tokens, 250);
        assert_eq!(config.completion.temperature, 0.9);
        assert_eq!(config.completion.timeout, 30000);
        assert!(config.access.denied_users.is_empty());
        assert!(config.filter.words.is_empty());
    }

    #[test]
    #[serial]
    fn test_load_missing_api_key_fails() {
        let file = write_config(
            r#"
discord:
  token: "discord-token"
"#,
        );

        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_fails() {
        assert!(Config::load("nonexistent_config.yaml").is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let file = write_config(
            r#"
discord:
  token: "from-file"
completion:
  api_key: "sk-file"
"#,
        );

        // SAFETY: tests touching the environment are serialized
        unsafe {
            std::env::set_var("TURTLEBOT_DISCORD__TOKEN", "from-env");
        }
        let config = Config::load(file.path().to_str().unwrap());
        unsafe {
            std::env::remove_var("TURTLEBOT_DISCORD__TOKEN");
        }

        let config = config.unwrap();
        assert_eq!(config.discord.token, "from-env");
        assert_eq!(config.completion.api_key, "sk-file");
    }
}
