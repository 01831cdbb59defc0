// ABOUTME: OpenAI-compatible chat completions client used for injury analysis
// ABOUTME: Sends non-streaming requests with bearer auth and maps HTTP failures to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! # `OpenAI`-Compatible Provider
//!
//! Talks to `{base_url}/chat/completions`. Works with the hosted `OpenAI` API
//! and any server implementing the same contract.
//!
//! ## Example
//!
//! ```rust,no_run
//! use injury_tracker::config::LlmConfig;
//! use injury_tracker::errors::AppError;
//! use injury_tracker::llm::{
//!     ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = OpenAiCompatibleConfig::from_llm_config(&LlmConfig::default());
//!     let provider = OpenAiCompatibleProvider::new(config)?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("How long does a sprain take?")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::constants::service_names::LLM_SERVICE;
use crate::constants::timeouts::{LLM_CONNECT_TIMEOUT_SECS, LLM_REQUEST_TIMEOUT_SECS};
use crate::errors::{llm_transport_error, AppError, ErrorCode};

/// Host of the hosted `OpenAI` API
const OPENAI_HOST: &str = "api.openai.com";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAiMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API, e.g. <https://api.openai.com/v1>
    pub base_url: String,
    /// Bearer token; omitted from requests when `None`
    pub api_key: Option<String>,
    /// Model used when a request does not name one
    pub default_model: String,
    /// Capabilities of the endpoint
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Build provider settings from the application's LLM configuration
    #[must_use]
    pub fn from_llm_config(llm: &LlmConfig) -> Self {
        Self {
            base_url: llm.base_url.clone(),
            api_key: llm.api_key.clone(),
            default_model: llm.model.clone(),
            capabilities: LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE,
        }
    }

    /// Whether the base URL points at the hosted `OpenAI` API
    #[must_use]
    pub fn is_hosted_openai(&self) -> bool {
        self.base_url.contains(OPENAI_HOST)
    }
}

impl fmt::Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Chat completions client for `OpenAI`-compatible endpoints
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(LLM_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(LLM_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &OpenAiCompatibleConfig {
        &self.config
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Add authorization header if an API key is configured
    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.bearer_auth(api_key)
        } else {
            request
        }
    }
}

/// Map a non-success response to an `AppError`
fn parse_error_response(status: StatusCode, body: &str) -> AppError {
    if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
        let detail = error_response.error;
        match status.as_u16() {
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("API authentication failed: {}", detail.message),
            ),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                extract_rate_limit_message(&detail.message),
            ),
            400 => AppError::invalid_input(format!("API validation error: {}", detail.message)),
            404 => AppError::new(
                ErrorCode::ResourceNotFound,
                format!("Model or endpoint not found: {}", detail.message),
            ),
            500..=599 => AppError::external_unavailable(
                LLM_SERVICE,
                format!("Service unavailable: {}", detail.message),
            ),
            _ => AppError::external_service(
                LLM_SERVICE,
                format!(
                    "{} - {}",
                    detail.error_type.as_deref().unwrap_or("unknown"),
                    detail.message
                ),
            ),
        }
    } else {
        match status.as_u16() {
            502..=504 => AppError::external_unavailable(
                LLM_SERVICE,
                format!("Upstream server is not responding ({status})"),
            ),
            _ => AppError::external_service(
                LLM_SERVICE,
                format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                ),
            ),
        }
    }
}

/// Turn an `OpenAI` rate limit message into a user-facing one
///
/// Keeps the "try again in N" hint when present, rounded up to whole seconds.
fn extract_rate_limit_message(message: &str) -> String {
    const MARKER: &str = "try again in ";
    let lower = message.to_lowercase();
    if let Some(after) = lower
        .find(MARKER)
        .map(|pos| &lower[pos + MARKER.len()..])
    {
        let number: String = after
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if let Ok(seconds) = number.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let seconds_int = seconds.ceil() as u64;
            return format!("LLM rate limit reached. Please try again in {seconds_int} seconds.");
        }
    }
    "LLM rate limit reached. Please wait a moment and try again.".to_owned()
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        if self.config.is_hosted_openai() {
            "openai"
        } else {
            "openai_compatible"
        }
    }

    fn display_name(&self) -> &'static str {
        if self.config.is_hosted_openai() {
            "OpenAI"
        } else {
            "OpenAI-compatible"
        }
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        if self.config.api_key.is_none() && self.config.is_hosted_openai() {
            return Err(AppError::new(
                ErrorCode::ConfigMissing,
                "OPENAI_API_KEY is not set",
            ));
        }

        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let openai_request = OpenAiRequest {
            model,
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };
        debug!(
            "Sending chat completion request with {} messages",
            openai_request.messages.len()
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to {}: {}", self.display_name(), e);
                llm_transport_error(&e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {}", e);
            llm_transport_error(&e)
        })?;

        if !status.is_success() {
            return Err(parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {}", e);
            AppError::external_service(LLM_SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(LLM_SERVICE, "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();
        debug!(
            "Received response: {} chars, finish_reason: {:?}",
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: openai_response.model,
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .add_auth_header(self.client.get(self.api_url("models")))
            .send()
            .await
            .map_err(|e| {
                error!("Health check failed: {}", e);
                llm_transport_error(&e)
            })?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!("Health check failed with status: {}", response.status());
        }
        Ok(healthy)
    }
}
