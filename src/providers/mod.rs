/*!
 * Provider implementations for LLM translation services.
 *
 * This module contains client implementations for:
 * - OpenAI-compatible chat completions (OpenAI, DeepSeek, LM Studio)
 * - Anthropic messages API
 * - A mock provider for tests and dry runs
 */

use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use crate::errors::ProviderError;

pub mod anthropic;
pub mod mock;
pub mod openai;

/// A provider-neutral completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System prompt
    pub system: String,
    /// User prompt
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// A provider-neutral completion response
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated text
    pub text: String,
    /// Prompt tokens, if the provider reports them
    pub prompt_tokens: Option<u64>,
    /// Completion tokens, if the provider reports them
    pub completion_tokens: Option<u64>,
}

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request using this provider
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider name for logs
    fn name(&self) -> &str;
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// `max_retries` extra attempts have been spent
///
/// Waits `backoff_base_ms * 2^(attempt-1)` between attempts.
pub async fn with_retry<T, F, Fut>(
    label: &str,
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                let backoff_ms = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(16));
                warn!(
                    "{} request failed: {} - retrying in {}ms (attempt {}/{})",
                    label,
                    e,
                    backoff_ms,
                    attempt + 1,
                    max_retries + 1
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Map an HTTP error status to a provider error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationError(body),
        429 => ProviderError::RateLimitExceeded(body),
        code => ProviderError::ApiError {
            status_code: code,
            message: body,
        },
    }
}

/// Map a transport error to a provider error
pub(crate) fn transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}
