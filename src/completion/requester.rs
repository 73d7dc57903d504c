//! HTTP client for the text-completion API.
//!
//! This module provides the [`OpenAiRequester`] struct sending prompts to the
//! `/v1/completions` endpoint.

use std::{fmt, time::Duration};

use log::{debug, info};
use mockall::automock;
use reqwest::Client;

use crate::completion::{
    CompletionRequest,
    response_structs::{CompletionBody, CompletionResponse, ErrorResponse},
};

/// Errors raised by a single upstream call.
///
/// Every variant aborts the retry loop of the
/// [`Completer`](crate::completion::Completer); the `Display` output is relayed
/// to the user as is.
#[derive(Debug)]
pub enum RequestError {
    /// Transport failure, timeout or undecodable body
    Http(reqwest::Error),
    /// Non-2xx status with the API error message when the body carries one
    Status(u16, Option<String>),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Http(e) => write!(f, "Error: {}", e),
            RequestError::Status(status, None) => {
                write!(f, "Error: Request failed with status code {}", status)
            }
            RequestError::Status(status, Some(message)) => write!(
                f,
                "Error: Request failed with status code {}: {}",
                status, message
            ),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        RequestError::Http(e)
    }
}

/// Trait for sending completion requests upstream.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Sends one completion request, without any retry.
    async fn create_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, RequestError>;
}

/// HTTP client for an OpenAI compatible completion API.
///
/// # Examples
///
/// ```no_run
/// let requester = OpenAiRequester::new("https://api.openai.com", "sk-...", DEFAULT_TIMEOUT)?;
/// let response = requester.create_completion(&CompletionRequest::new("Hello")).await?;
/// println!("Response: {:?}", response);
/// ```
pub struct OpenAiRequester {
    /// Base URL of the API, without trailing slash
    url: String,
    /// Secret key sent as a bearer token
    api_key: String,
    /// HTTP client, bounded by the request timeout
    client: Client,
}

impl OpenAiRequester {
    /// Create a new [OpenAiRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the completion API.
    /// * `api_key` - The secret API key.
    /// * `timeout` - Upper bound of a single request. A request running past it
    ///   fails with [`RequestError::Http`].
    pub fn new(url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(OpenAiRequester {
            url: url.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }
}

impl Requester for OpenAiRequester {
    /// Request `POST /v1/completions`.
    ///
    /// The request body echoes the prompt:
    /// ```json
    /// {
    ///   "model": "text-davinci-002",
    ///   "prompt": "Once upon a time",
    ///   "max_tokens": 250,
    ///   "temperature": 0.9,
    ///   "echo": true,
    ///   "user": "1234"
    /// }
    /// ```
    /// and the response is transformed into a [`CompletionResponse`].
    async fn create_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, RequestError> {
        let url = format!("{}/v1/completions", &self.url);
        info!("request completion with model {}", &request.model);
        debug!("request {} -> {:?}", &url, request);

        let body = CompletionBody {
            model: &request.model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            echo: true,
            user: &request.requester_id,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|e| e.error.message);
            debug!("response from {} -> {} {:?}", &url, status, message);
            return Err(RequestError::Status(status.as_u16(), message));
        }

        let completion: CompletionResponse = response.json().await?;

        debug!("response from {} -> {:?}", &url, &completion);

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_create_completion() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = r#"{"id": "cmpl-1", "choices": [{"text": "Hello world", "index": 0}]}"#;

        let mock = server
            .mock("POST", "/v1/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "text-davinci-002",
                "prompt": "Hello",
                "max_tokens": 250,
                "temperature": 0.5,
                "echo": true,
                "user": "1234",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = OpenAiRequester::new(&url, "sk-test", Duration::from_secs(5)).unwrap();
        let request = CompletionRequest::new("Hello")
            .temperature(0.5)
            .requester_id("1234");
        let response = requester.create_completion(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].text.as_deref(), Some("Hello world"));
    }

    #[tokio::test]
    async fn test_create_completion_without_choices() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("POST", "/v1/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "cmpl-1"}"#)
            .create_async()
            .await;

        let requester = OpenAiRequester::new(&url, "sk-test", Duration::from_secs(5)).unwrap();
        let response = requester
            .create_completion(&CompletionRequest::new("Hello"))
            .await
            .unwrap();

        assert!(response.choices.is_empty());
    }

    #[tokio::test]
    async fn test_create_completion_error_status() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("POST", "/v1/completions")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let requester = OpenAiRequester::new(&url, "sk-wrong", Duration::from_secs(5)).unwrap();
        let error = requester
            .create_completion(&CompletionRequest::new("Hello"))
            .await
            .unwrap_err();

        assert!(matches!(error, RequestError::Status(401, Some(_))));
        assert_eq!(
            error.to_string(),
            "Error: Request failed with status code 401: Incorrect API key provided"
        );
    }

    #[tokio::test]
    async fn test_create_completion_error_status_without_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("POST", "/v1/completions")
            .with_status(500)
            .create_async()
            .await;

        let requester = OpenAiRequester::new(&url, "sk-test", Duration::from_secs(5)).unwrap();
        let error = requester
            .create_completion(&CompletionRequest::new("Hello"))
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Error: Request failed with status code 500"
        );
    }

    #[tokio::test]
    async fn test_create_completion_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("POST", "/v1/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let requester = OpenAiRequester::new(&url, "sk-test", Duration::from_secs(5)).unwrap();
        let error = requester
            .create_completion(&CompletionRequest::new("Hello"))
            .await
            .unwrap_err();

        assert!(matches!(error, RequestError::Http(_)));
    }

    #[tokio::test]
    async fn test_create_completion_timeout() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let requester =
            OpenAiRequester::new(&url, "sk-test", Duration::from_millis(200)).unwrap();
        let error = requester
            .create_completion(&CompletionRequest::new("Hello"))
            .await
            .unwrap_err();

        match error {
            RequestError::Http(e) => assert!(e.is_timeout()),
            _ => panic!("Expected a timeout error"),
        }
        drop(listener);
    }
}
