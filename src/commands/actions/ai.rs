//! AI command handler.
//!
//! Relays a prompt to the completion API. The arguments are an optional
//! temperature followed by the prompt:
//!
//! ```text
//! !ai Once upon a time
//! !ai 0.5 Once upon a time
//! ```

use log::{debug, info};

use crate::{
    access::AccessPolicy,
    commands::{
        CommandContext, CommandResult,
        markdown_response::{
            format_access_denied, format_ai_help, format_completion, format_no_prompt,
        },
    },
    completion::{Completer, CompletionRequest, CompletionResult, Requester},
};

/// Handles the `ai` command for the author of `context`.
///
/// # Arguments
///
/// * `context` - Command context, the author id is the requester id
/// * `args` - Raw command arguments
/// * `prefix` - Command prefix, used in the usage hints
/// * `access` - Users refused by the command
/// * `completer` - Completion client
/// * `defaults` - Model, token limit and temperature of the request
///
/// # Returns
///
/// A single text reply: the escaped completion, a usage hint, the refusal or
/// the error relayed from the API.
pub async fn handle_ai<R: Requester>(
    context: &CommandContext,
    args: &str,
    prefix: &str,
    access: &AccessPolicy,
    completer: &Completer<R>,
    defaults: &CompletionRequest,
) -> CommandResult {
    if !access.is_allowed(&context.user_id) {
        info!("user {} is not allowed to use ai", context.user_id);
        return CommandResult::text(format_access_denied());
    }

    let args = args.trim();
    if args == "help" {
        return CommandResult::text(format_ai_help(prefix));
    }

    let (temperature, prompt) = split_temperature(args);
    if prompt.is_empty() {
        return CommandResult::text(format_no_prompt(prefix));
    }

    debug!(
        "handling ai command, temperature: {:?}, prompt: {:?}",
        temperature, prompt
    );

    let request = CompletionRequest::new(prompt)
        .model(&defaults.model)
        .max_tokens(defaults.max_tokens)
        .temperature(temperature.unwrap_or(defaults.temperature))
        .requester_id(&context.user_id);

    match completer.request_completion(request).await {
        CompletionResult::Text(text) => CommandResult::text(format_completion(&text)),
        CompletionResult::Error(error) => CommandResult::text(error),
    }
}

/// Splits a leading temperature off `args`.
///
/// The first whitespace delimited token is a temperature when it is only made
/// of ASCII digits and dots and parses as a float. The prompt is then the rest
/// of `args`, otherwise `args` as a whole.
fn split_temperature(args: &str) -> (Option<f32>, &str) {
    let (token, rest) = match args.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (args, ""),
    };

    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        if let Ok(temperature) = token.parse::<f32>() {
            return (Some(temperature), rest);
        }
    }

    (None, args)
}
