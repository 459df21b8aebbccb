// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Summarization client
//!
//! [`Summarizer`] is the seam the note generator depends on.
//! [`OpenAiClient`] implements it against an OpenAI-compatible
//! `/chat/completions` endpoint. Requests are sent one at a time and never
//! retried.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info};

use crate::error::SummarizeError;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Produces release-note text from a repository's merge log
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `log` for repository `repo`
    async fn summarize(&self, repo: &str, log: &str) -> Result<String, SummarizeError>;
}

/// The user message sent for one repository
///
/// The same text is printed when summarization is skipped.
#[must_use]
pub fn user_message(repo: &str, log: &str) -> String {
    format!("Repository: {repo}\n\n{log}\n\n")
}

/// Connection settings for [`OpenAiClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer credential
    pub api_key: String,
    /// Model ID
    pub model: String,
    /// Base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Sampling temperature override
    pub temperature: Option<f64>,
}

impl ClientConfig {
    /// Settings with the default model and base URL
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
        }
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Full endpoint URL
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Chat-completion client
pub struct OpenAiClient {
    config: ClientConfig,
    system_prompt: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client with a rendered system instruction
    #[must_use]
    pub fn new(config: ClientConfig, system_prompt: impl Into<String>) -> Self {
        info!(model = %config.model, base_url = %config.base_url, "Summarization client initialized");
        Self {
            config,
            system_prompt: system_prompt.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The system instruction sent with every request
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Build the request body for one repository
    #[must_use]
    pub fn build_request(&self, repo: &str, log: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.clone()),
                ChatMessage::user(user_message(repo, log)),
            ],
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiClient {
    async fn summarize(&self, repo: &str, log: &str) -> Result<String, SummarizeError> {
        let request = self.build_request(repo, log);
        let url = self.config.endpoint();
        debug!(repo, url = %url, bytes = log.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message: parse_api_error(&body),
            });
        }

        let data: ChatResponse = response.json().await?;
        data.first_content()
            .map(str::to_string)
            .ok_or(SummarizeError::EmptyResponse)
    }
}

/// Extract `error.message` from an error body, falling back to the raw body
fn parse_api_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
