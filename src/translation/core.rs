/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its implementation,
 * which sends one batch at a time to an AI provider and maps the answer back
 * onto the batch's segment ids.
 */

use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, warn};
use parking_lot::Mutex;

use crate::app_config::{Config, TranslationProvider};
use crate::batching::{BatchFile, OutputFile};
use crate::errors::TranslationError;
use crate::glossary::Glossary;
use crate::providers::anthropic::Anthropic;
use crate::providers::openai::OpenAI;
use crate::providers::{CompletionRequest, Provider};

use super::prompts::{PromptTemplate, TranslationPromptBuilder};
use super::response::map_translations;

/// Token usage statistics for tracking API consumption
#[derive(Debug, Clone)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Start time of token tracking
    pub start_time: Instant,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl TokenUsageStats {
    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Add token usage numbers
    pub fn add_token_usage(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>) {
        if let Some(pt) = prompt_tokens {
            self.prompt_tokens += pt;
            self.total_tokens += pt;
        }

        if let Some(ct) = completion_tokens {
            self.completion_tokens += ct;
            self.total_tokens += ct;
        }
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token Usage Summary:\n\
             Provider: {}\n\
             Model: {}\n\
             Prompt tokens: {}\n\
             Completion tokens: {}\n\
             Total tokens: {}\n\
             API request time: {:.2} minutes",
            self.provider,
            self.model,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.api_duration.as_secs_f64() / 60.0
        )
    }
}

/// Build the configured provider client
pub fn build_provider(config: &Config) -> Box<dyn Provider> {
    let translation = &config.translation;
    let retries = translation.common.retry_count;
    let backoff = translation.common.retry_backoff_ms;

    match translation.provider {
        TranslationProvider::OpenAI => Box::new(
            OpenAI::new(
                translation.get_api_key(),
                translation.get_endpoint(),
                translation.get_model(),
                translation.get_timeout_secs(),
            )
            .with_retry_policy(retries, backoff),
        ),
        TranslationProvider::Anthropic => Box::new(
            Anthropic::new(
                translation.get_api_key(),
                translation.get_endpoint(),
                translation.get_model(),
                translation.get_timeout_secs(),
            )
            .with_retry_policy(retries, backoff),
        ),
    }
}

/// Translates batches through a single provider
pub struct TranslationService {
    provider: Box<dyn Provider>,
    source_language: String,
    target_language: String,
    system_prompt: String,
    domain_hint: Option<String>,
    temperature: f32,
    max_tokens: u32,
    token_usage: Mutex<TokenUsageStats>,
}

impl TranslationService {
    /// Create a service for `config`'s languages and prompt settings
    pub fn new(provider: Box<dyn Provider>, config: &Config) -> Self {
        let common = &config.translation.common;
        let token_usage = TokenUsageStats::with_provider_info(
            provider.name().to_string(),
            config.translation.get_model(),
        );

        Self {
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            system_prompt: PromptTemplate::new(&common.system_prompt)
                .render(&config.source_language, &config.target_language),
            domain_hint: common.domain_hint.clone(),
            temperature: common.temperature,
            max_tokens: config.translation.get_max_tokens(),
            token_usage: Mutex::new(token_usage),
            provider,
        }
    }

    /// Create a service with the provider named in the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate_for_translation()?;
        Ok(Self::new(build_provider(config), config))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Check that the provider is reachable
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        self.provider.test_connection().await?;
        Ok(())
    }

    /// Build the user prompt for a batch
    pub fn build_prompt(&self, batch: &BatchFile, glossary: &Glossary) -> String {
        TranslationPromptBuilder::for_batch(
            batch,
            &self.source_language,
            &self.target_language,
            glossary,
            self.domain_hint.as_deref(),
        )
        .build()
    }

    /// Translate every segment of a batch in one request
    ///
    /// Segments the answer does not cover get an empty target, which merge
    /// counts as untranslated.
    pub async fn translate_batch(
        &self,
        batch: &BatchFile,
        glossary: &Glossary,
    ) -> Result<OutputFile, TranslationError> {
        let request = CompletionRequest {
            system: self.system_prompt.clone(),
            prompt: self.build_prompt(batch, glossary),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            "Translating batch {} ({} segment(s)) with {}",
            batch.batch_number,
            batch.segments.len(),
            self.provider.name()
        );

        let started = Instant::now();
        let response = self.provider.complete(request).await?;
        {
            let mut usage = self.token_usage.lock();
            usage.api_duration += started.elapsed();
            usage.add_token_usage(response.prompt_tokens, response.completion_tokens);
        }

        if response.text.trim().is_empty() {
            return Err(TranslationError::EmptyResponse(batch.batch_number));
        }

        let mapped = map_translations(&batch.segments, &response.text);
        if !mapped.missing.is_empty() {
            warn!(
                "Batch {}: no translation returned for {} segment(s): {}",
                batch.batch_number,
                mapped.missing.len(),
                mapped.missing.join(", ")
            );
        }

        Ok(OutputFile {
            batch_number: batch.batch_number,
            translations: mapped.items,
        })
    }

    /// Snapshot of the token usage so far
    pub fn token_usage(&self) -> TokenUsageStats {
        self.token_usage.lock().clone()
    }
}
