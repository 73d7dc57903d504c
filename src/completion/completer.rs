//! Prompt filtering and bounded retry loop around the completion API.
//!
//! This module provides the [`Completer`] struct, which cleans the prompt and
//! classifies every upstream attempt before deciding whether to retry.

use log::{debug, info, warn};

use crate::{
    completion::{CompletionRequest, CompletionResult, RequestError, Requester},
    filter::ProfanityFilter,
};

/// Upper bound of upstream calls for a single request, retries included.
const MAX_ATTEMPTS: u32 = 4;

/// Error relayed when every attempt returned a degenerate response.
pub const RETRIES_EXHAUSTED: &str = "Failed to get response from API";

/// Error returned for a blank prompt, no upstream call is made.
const EMPTY_PROMPT: &str = "No prompt given.";

/// Classification of a single upstream call.
#[derive(Debug)]
enum AttemptOutcome {
    /// The API generated some text
    Success(String),
    /// The API answered without generating anything, retry
    Degenerate,
    /// The call failed, abort
    Failure(RequestError),
}

/// Sends prompts upstream with a bounded number of attempts.
///
/// A failed call ends the request right away. A response which only echoes
/// the prompt back is retried, up to [`MAX_ATTEMPTS`] calls in total.
///
/// # Examples
///
/// ```no_run
/// let completer = Completer::new(requester, Box::new(WordFilter::new(&[])?));
/// match completer.request_completion(CompletionRequest::new("Hello")).await {
///     CompletionResult::Text(text) => println!("{}", text),
///     CompletionResult::Error(error) => println!("failed: {}", error),
/// }
/// ```
pub struct Completer<R: Requester> {
    /// Upstream completion API
    requester: R,
    /// Filter applied to every prompt before it is sent
    filter: Box<dyn ProfanityFilter + Send + Sync>,
}

impl<R: Requester> Completer<R> {
    /// Create a new [Completer].
    pub fn new(requester: R, filter: Box<dyn ProfanityFilter + Send + Sync>) -> Self {
        Completer { requester, filter }
    }

    /// Requests a completion for `request`.
    ///
    /// A profane prompt is replaced by its cleaned version before being sent,
    /// without telling the caller.
    ///
    /// # Returns
    ///
    /// * [`CompletionResult::Text`] - The first choice of the first attempt which
    ///   generated something
    /// * [`CompletionResult::Error`] - The stringified cause of the first failed
    ///   call, or [`RETRIES_EXHAUSTED`] when every attempt was degenerate
    pub async fn request_completion(&self, request: CompletionRequest) -> CompletionResult {
        if request.prompt.trim().is_empty() {
            return CompletionResult::Error(EMPTY_PROMPT.to_owned());
        }

        let request = self.clean_prompt(request);

        for attempt in 1..=MAX_ATTEMPTS {
            debug!("completion attempt {}/{}", attempt, MAX_ATTEMPTS);

            match self.attempt(&request).await {
                AttemptOutcome::Success(text) => {
                    info!("completion succeeded after {} attempt(s)", attempt);
                    return CompletionResult::Text(text);
                }
                AttemptOutcome::Degenerate => {
                    warn!("degenerate completion on attempt {}", attempt);
                }
                AttemptOutcome::Failure(e) => {
                    warn!("completion failed on attempt {}: {}", attempt, e);
                    return CompletionResult::Error(e.to_string());
                }
            }
        }

        warn!("no completion after {} attempts", MAX_ATTEMPTS);
        CompletionResult::Error(RETRIES_EXHAUSTED.to_owned())
    }

    fn clean_prompt(&self, mut request: CompletionRequest) -> CompletionRequest {
        if self.filter.is_profane(&request.prompt) {
            debug!("prompt is profane, sending the cleaned version");
            request.prompt = self.filter.clean(&request.prompt);
        }
        request
    }

    async fn attempt(&self, request: &CompletionRequest) -> AttemptOutcome {
        let response = match self.requester.create_completion(request).await {
            Ok(response) => response,
            Err(e) => return AttemptOutcome::Failure(e),
        };

        // The API echoes the prompt, an identical or empty text means nothing was generated
        match response.choices.into_iter().next().and_then(|c| c.text) {
            Some(text) if !text.is_empty() && text != request.prompt => {
                AttemptOutcome::Success(text)
            }
            _ => AttemptOutcome::Degenerate,
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::completion::{Choice, CompletionResponse, MockRequester};
    use crate::filter::WordFilter;

    fn response(text: &str) -> CompletionResponse {
        CompletionResponse {
            choices: vec![Choice {
                text: Some(text.to_owned()),
            }],
        }
    }

    fn create_completer(mock_requester: MockRequester) -> Completer<MockRequester> {
        Completer::new(mock_requester, Box::new(WordFilter::new(&[]).unwrap()))
    }

    #[tokio::test]
    async fn test_request_completion_success() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_create_completion()
            .times(1)
            .returning(|request| Ok(response(&format!("{} there", request.prompt))));

        let completer = create_completer(mock_requester);
        let result = completer
            .request_completion(CompletionRequest::new("Hello"))
            .await;

        assert_eq!(result, CompletionResult::Text("Hello there".to_owned()));
    }

    #[tokio::test]
    async fn test_request_completion_sends_cleaned_prompt() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_create_completion()
            .withf(|request| request.prompt == "tell me a **** joke")
            .times(1)
            .returning(|_| Ok(response("tell me a **** joke. No.")));

        let completer = create_completer(mock_requester);
        let result = completer
            .request_completion(CompletionRequest::new("tell me a damn joke"))
            .await;

        assert_eq!(
            result,
            CompletionResult::Text("tell me a **** joke. No.".to_owned())
        );
    }

    #[tokio::test]
    async fn test_request_completion_forwards_parameters() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_create_completion()
            .withf(|request| {
                request.model == "davinci"
                    && request.max_tokens == 10
                    && request.temperature == 0.5
                    && request.requester_id == "1234"
            })
            .times(1)
            .returning(|_| Ok(response("Hello world")));

        let completer = create_completer(mock_requester);
        let request = CompletionRequest::new("Hello")
            .model("davinci")
            .max_tokens(10)
            .temperature(0.5)
            .requester_id("1234");
        let result = completer.request_completion(request).await;

        assert_eq!(result, CompletionResult::Text("Hello world".to_owned()));
    }

    #[tokio::test]
    async fn test_request_completion_retries_exhausted() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_create_completion()
            .times(4)
            .returning(|request| Ok(response(&request.prompt)));

        let completer = create_completer(mock_requester);
        let result = completer
            .request_completion(CompletionRequest::new("Hello"))
            .await;

        assert_eq!(
            result,
            CompletionResult::Error("Failed to get response from API".to_owned())
        );
    }

    #[tokio::test]
    async fn test_request_completion_retries_after_degenerate() {
        let mut sequence = Sequence::new();
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_create_completion()
            .times(2)
            .in_sequence(&mut sequence)
            .returning(|request| Ok(response(&request.prompt)));
        mock_requester
            .expect_create_completion()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(response("Hello world")));

        let completer = create_completer(mock_requester);
        let result = completer
            .request_completion(CompletionRequest::new("Hello"))
            .await;

        assert_eq!(result, CompletionResult::Text("Hello world".to_owned()));
    }

    #[tokio::test]
    async fn test_request_completion_empty_choices_are_degenerate() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_create_completion()
            .times(4)
            .returning(|_| Ok(CompletionResponse::default()));

        let completer = create_completer(mock_requester);
        let result = completer
            .request_completion(CompletionRequest::new("Hello"))
            .await;

        assert_eq!(
            result,
            CompletionResult::Error(RETRIES_EXHAUSTED.to_owned())
        );
    }

    #[tokio::test]
    async fn test_request_completion_failure_is_not_retried() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_create_completion()
            .times(1)
            .returning(|_| Err(RequestError::Status(429, None)));

        let completer = create_completer(mock_requester);
        let result = completer
            .request_completion(CompletionRequest::new("Hello"))
            .await;

        assert_eq!(
            result,
            CompletionResult::Error("Error: Request failed with status code 429".to_owned())
        );
    }

    #[tokio::test]
    async fn test_request_completion_failure_after_degenerate() {
        let mut sequence = Sequence::new();
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_create_completion()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|request| Ok(response(&request.prompt)));
        mock_requester
            .expect_create_completion()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Err(RequestError::Status(503, Some("overloaded".to_owned()))));

        let completer = create_completer(mock_requester);
        let result = completer
            .request_completion(CompletionRequest::new("Hello"))
            .await;

        assert_eq!(
            result,
            CompletionResult::Error(
                "Error: Request failed with status code 503: overloaded".to_owned()
            )
        );
    }

    #[tokio::test]
    async fn test_request_completion_blank_prompt() {
        let mut mock_requester = MockRequester::new();
        mock_requester.expect_create_completion().times(0);

        let completer = create_completer(mock_requester);
        let result = completer
            .request_completion(CompletionRequest::new("   "))
            .await;

        assert!(matches!(result, CompletionResult::Error(_)));
    }
}
