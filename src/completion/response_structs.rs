//! Wire structures of the completion endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/completions`.
///
/// `echo` is always set so the returned text starts with the prompt, which is
/// how a response that generated nothing is detected.
#[derive(Debug, Serialize)]
pub struct CompletionBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
    pub echo: bool,
    pub user: &'a str,
}

/// Response of `POST /v1/completions`.
///
/// ```json
/// { "choices": [{ "text": "Once upon a time, there was a turtle" }] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionResponse {
    /// Generated choices, only the first one is used
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub text: Option<String>,
}

/// Error body returned alongside a non-2xx status.
///
/// ```json
/// { "error": { "message": "Incorrect API key provided" } }
/// ```
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}
