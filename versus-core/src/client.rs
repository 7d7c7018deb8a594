//! AI client — generative-text endpoint abstraction and HTTP implementation.
//!
//! Defines the `AiClient` trait for endpoint-agnostic text generation, the
//! production `PollinationsClient` backed by `reqwest`, and a `MockAiClient`
//! for tests. Exactly one outbound call is made per invocation; no retries.

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::AiError;

/// The default generative-text endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://pollinations.ai/prompt";

/// The default model name sent in the request body.
pub const DEFAULT_MODEL: &str = "flux";

/// Hard per-request timeout, measured from dispatch. Fixed by design;
/// there is no configuration surface for it.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Trait for generative-text clients.
///
/// Implementations must issue at most one outbound call per invocation
/// and honor the cancellation token: an external abort rides the same
/// channel as the internal timeout and is observably identical to it.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send the prompt and return the raw response text.
    async fn generate(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, AiError>;
}

/// HTTP client for the Pollinations generative-text endpoint.
pub struct PollinationsClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl PollinationsClient {
    /// Create a client against the default endpoint and model.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    /// Create a client against a custom endpoint and model.
    pub fn with_endpoint(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Build the JSON request body.
    ///
    /// The seed is randomized per request to bust upstream caches and keep
    /// generations non-deterministic.
    fn build_request_body(&self, prompt: &str) -> Value {
        let seed: u32 = rand::thread_rng().gen_range(0..1_000_000);
        json!({
            "model": self.model,
            "prompt": prompt,
            "width": 1024,
            "height": 1024,
            "n": 1,
            "seed": seed,
            "response_format": "text",
        })
    }

    /// Perform the single POST and read the text body.
    async fn dispatch(&self, prompt: &str) -> Result<String, AiError> {
        let body = self.build_request_body(prompt);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "AI service returned non-success status");
            return Err(AiError::Network {
                message: format!("AI service error: {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| AiError::Network {
            message: e.to_string(),
        })
    }
}

impl Default for PollinationsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiClient for PollinationsClient {
    async fn generate(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, AiError> {
        debug!(
            endpoint = %self.endpoint,
            prompt_len = prompt.len(),
            "Dispatching AI request"
        );

        // Both arms drop the in-flight request future, which aborts the
        // underlying connection. A caller abort and a timeout expiry are
        // observably identical.
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("AI request aborted by caller");
                Err(AiError::Timeout {
                    timeout_secs: REQUEST_TIMEOUT_SECS,
                })
            }
            outcome = tokio::time::timeout(
                Duration::from_secs(REQUEST_TIMEOUT_SECS),
                self.dispatch(prompt),
            ) => {
                match outcome {
                    Ok(result) => result,
                    Err(_elapsed) => {
                        warn!(
                            timeout_secs = REQUEST_TIMEOUT_SECS,
                            "AI request timed out"
                        );
                        Err(AiError::Timeout {
                            timeout_secs: REQUEST_TIMEOUT_SECS,
                        })
                    }
                }
            }
        }
    }
}

/// Mock AI client for testing.
///
/// Returns queued responses in order and counts invocations so tests can
/// assert how many outbound calls a scenario produced. An optional delay
/// simulates a slow upstream; the delay honors the cancellation token.
pub struct MockAiClient {
    responses: std::sync::Mutex<Vec<Result<String, AiError>>>,
    calls: std::sync::atomic::AtomicUsize,
    delay: Option<Duration>,
}

impl MockAiClient {
    pub fn new() -> Self {
        Self {
            responses: std::sync::Mutex::new(Vec::new()),
            calls: std::sync::atomic::AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Create a mock that always returns the given text.
    ///
    /// Queues multiple copies so it can serve repeated calls.
    pub fn with_response(text: &str) -> Self {
        let client = Self::new();
        for _ in 0..20 {
            client.queue_ok(text);
        }
        client
    }

    /// Create a mock that always fails with the given error.
    pub fn with_failure(err: AiError) -> Self {
        let client = Self::new();
        for _ in 0..20 {
            client.queue_err(err.clone());
        }
        client
    }

    /// Delay every response, simulating a slow upstream.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful response for the next call.
    pub fn queue_ok(&self, text: &str) {
        self.responses.lock().unwrap().push(Ok(text.to_string()));
    }

    /// Queue a failure for the next call.
    pub fn queue_err(&self, err: AiError) {
        self.responses.lock().unwrap().push(Err(err));
    }

    /// Number of `generate` invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl Default for MockAiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiClient for MockAiClient {
    async fn generate(
        &self,
        _prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, AiError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(AiError::Timeout {
                        timeout_secs: REQUEST_TIMEOUT_SECS,
                    });
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("{}".to_string())
        } else {
            responses.remove(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let client = PollinationsClient::new();
        let body = client.build_request_body("compare these");
        assert_eq!(body["model"], "flux");
        assert_eq!(body["prompt"], "compare these");
        assert_eq!(body["width"], 1024);
        assert_eq!(body["height"], 1024);
        assert_eq!(body["n"], 1);
        assert_eq!(body["response_format"], "text");
        let seed = body["seed"].as_u64().unwrap();
        assert!(seed < 1_000_000);
    }

    #[test]
    fn test_custom_endpoint_and_model() {
        let client = PollinationsClient::with_endpoint("http://localhost:9999/gen", "test-model");
        assert_eq!(client.endpoint, "http://localhost:9999/gen");
        let body = client.build_request_body("p");
        assert_eq!(body["model"], "test-model");
    }

    #[tokio::test]
    async fn test_generate_fails_immediately_when_already_cancelled() {
        let client = PollinationsClient::with_endpoint("http://localhost:1/never", "m");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = client.generate("prompt", &cancel).await;
        assert!(matches!(result, Err(AiError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_mock_queued_responses_in_order() {
        let mock = MockAiClient::new();
        mock.queue_ok("first");
        mock.queue_err(AiError::Network {
            message: "down".into(),
        });
        let cancel = CancellationToken::new();
        assert_eq!(mock.generate("p", &cancel).await.unwrap(), "first");
        assert!(matches!(
            mock.generate("p", &cancel).await,
            Err(AiError::Network { .. })
        ));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_delay_honors_cancellation() {
        let mock = MockAiClient::with_response("slow").with_delay(Duration::from_secs(30));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = mock.generate("p", &cancel).await;
        assert!(matches!(result, Err(AiError::Timeout { .. })));
    }
}
