// ABOUTME: LLM-backed injury analysis, recovery plan drafting, and progress review
// ABOUTME: Wraps a provider with prompt construction and empty-response handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_core::constants::messages::{EMPTY_ANALYSIS, RECOVERY_PLAN_FAILED};
use injury_core::models::{InjuryDetails, InjuryStatus, ProgressEntry};
use tracing::{debug, instrument, warn};

use crate::config::LlmConfig;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::prompts::{
    injury_analysis_messages, progress_analysis_messages, recovery_plan_messages,
};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Most items kept when extracting possible injuries from an analysis
const MAX_POSSIBLE_INJURIES: usize = 5;

/// Text analysis of injuries through an LLM provider
///
/// The provider is borrowed, so one client can serve many analysts.
pub struct InjuryAnalyst<'a> {
    provider: &'a dyn LlmProvider,
    model: Option<String>,
    temperature: f32,
}

impl<'a> InjuryAnalyst<'a> {
    /// Analyst using the provider's default model
    #[must_use]
    pub fn new(provider: &'a dyn LlmProvider) -> Self {
        Self {
            provider,
            model: None,
            temperature: defaults::OPENAI_TEMPERATURE,
        }
    }

    /// Analyst using the model and temperature from configuration
    #[must_use]
    pub fn from_config(provider: &'a dyn LlmProvider, config: &LlmConfig) -> Self {
        Self::new(provider)
            .with_model(config.model.clone())
            .with_temperature(config.temperature)
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Possible injuries, first steps, and warning signs for a new report
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete report, the provider's
    /// error on failure, or an error when the model returns no text.
    #[instrument(skip(self, details), fields(body_part = %details.body_part))]
    pub async fn analyze_injury(&self, details: &InjuryDetails) -> AppResult<String> {
        details.validate()?;
        self.complete(injury_analysis_messages(details)).await
    }

    /// Draft a recovery plan
    ///
    /// # Errors
    ///
    /// Any failure is reported with a generic "try again later" message; the
    /// error code and source of the underlying failure are kept.
    #[instrument(skip(self, details, additional_info), fields(body_part = %details.body_part))]
    pub async fn generate_recovery_plan(
        &self,
        details: &InjuryDetails,
        status: InjuryStatus,
        additional_info: &str,
    ) -> AppResult<String> {
        self.complete(recovery_plan_messages(details, status, additional_info))
            .await
            .map_err(|e| {
                warn!("Recovery plan generation failed: {e}");
                AppError::new(e.code, RECOVERY_PLAN_FAILED).with_source(e)
            })
    }

    /// Review the recovery trajectory across progress entries
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when `entries` is empty, otherwise the
    /// provider's error or an error when the model returns no text.
    #[instrument(skip(self, details, entries), fields(entries = entries.len()))]
    pub async fn analyze_progress(
        &self,
        details: &InjuryDetails,
        entries: &[ProgressEntry],
    ) -> AppResult<String> {
        if entries.is_empty() {
            return Err(AppError::insufficient_data(
                "No progress entries to analyze yet",
            ));
        }
        self.complete(progress_analysis_messages(details, entries))
            .await
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> AppResult<String> {
        let mut request = ChatRequest::new(messages).with_temperature(self.temperature);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let response = self.provider.complete(&request).await?;
        if let Some(usage) = response.usage {
            debug!(
                model = %response.model,
                total_tokens = usage.total_tokens,
                "LLM completion received"
            );
        }

        let content = response.content.trim();
        if content.is_empty() {
            warn!("{} returned empty content", self.provider.display_name());
            return Err(AppError::new(ErrorCode::ExternalServiceError, EMPTY_ANALYSIS));
        }
        Ok(content.to_owned())
    }
}

/// Pull the "possible injuries" list out of an analysis
///
/// Looks for the heading that mentions possible injuries and collects the
/// bullet items beneath it until the next numbered heading. Returns an empty
/// list when the analysis does not follow that layout.
#[must_use]
pub fn extract_possible_injuries(analysis: &str) -> Vec<String> {
    let mut lines = analysis.lines().map(str::trim);
    if !lines
        .by_ref()
        .any(|line| line.to_lowercase().contains("possible injur"))
    {
        return Vec::new();
    }

    lines
        .skip_while(|line| line.is_empty())
        .take_while(|line| !is_numbered_heading(line))
        .filter_map(strip_bullet)
        .map(|item| item.trim_end_matches(['.', ';']).to_owned())
        .filter(|item| !item.is_empty())
        .take(MAX_POSSIBLE_INJURIES)
        .collect()
}

fn is_numbered_heading(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with('.')
}

fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
        .map(str::trim)
}
