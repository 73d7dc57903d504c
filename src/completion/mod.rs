//! Text-completion API client and retry policy.
//!
//! This module sends user prompts to a completion API and relays the generated
//! text. The upstream call goes through the [`Requester`] trait so the retry
//! logic of [`Completer`] can be tested against a mock.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the completion endpoint
//! - `response_structs` - Wire structures of the completion endpoint
//! - `completer` - Prompt filtering and bounded retry loop
//!
//! # Examples
//!
//! ```no_run
//! use turtlebot::completion::{Completer, CompletionRequest, DEFAULT_TIMEOUT, OpenAiRequester};
//! use turtlebot::filter::WordFilter;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let requester = OpenAiRequester::new("https://api.openai.com", "sk-...", DEFAULT_TIMEOUT)?;
//! let completer = Completer::new(requester, Box::new(WordFilter::new(&[])?));
//! let result = completer
//!     .request_completion(CompletionRequest::new("Once upon a time"))
//!     .await;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

mod completer;
mod requester;
mod response_structs;

pub use crate::completion::completer::Completer;
pub use crate::completion::requester::{OpenAiRequester, RequestError, Requester};
#[cfg(test)]
pub use crate::completion::requester::MockRequester;
#[cfg(test)]
pub use crate::completion::response_structs::{Choice, CompletionResponse};

/// Base URL of the completion API.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";
/// Model used when none is configured.
pub const DEFAULT_AI_MODEL: &str = "text-davinci-002";
/// Maximum number of generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 250;
/// Sampling temperature used when the prompt has no numeric prefix.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
/// Timeout of a single upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A single completion request.
///
/// Built with [`CompletionRequest::new`] and the builder methods, then handed
/// to [`Completer::request_completion`]. The requester id is forwarded
/// upstream for attribution and is never validated.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Text to complete
    pub prompt: String,
    /// Model identifier
    pub model: String,
    /// Maximum number of generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Opaque id of the user asking for the completion
    pub requester_id: String,
}

impl CompletionRequest {
    /// Creates a request for `prompt` with the default model, token limit and
    /// temperature, and an empty requester id.
    pub fn new(prompt: &str) -> Self {
        CompletionRequest {
            prompt: prompt.to_owned(),
            model: DEFAULT_AI_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            requester_id: String::new(),
        }
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_owned();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn requester_id(mut self, requester_id: &str) -> Self {
        self.requester_id = requester_id.to_owned();
        self
    }
}

/// Outcome of [`Completer::request_completion`].
///
/// Either the generated text or a message to relay to the user, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResult {
    /// Text returned by the API, prompt included
    Text(String),
    /// Human readable failure cause
    Error(String),
}
