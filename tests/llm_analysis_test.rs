// ABOUTME: Integration tests for LLM-backed injury analysis with a scripted provider
// ABOUTME: Checks prompt assembly, request options, empty replies, and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Mutex;

use async_trait::async_trait;
use common::sample_details;
use injury_tracker::config::LlmConfig;
use injury_tracker::constants::messages::{EMPTY_ANALYSIS, RECOVERY_PLAN_FAILED};
use injury_tracker::errors::{AppError, ErrorCode};
use injury_tracker::llm::prompts::{INJURY_ANALYSIS_SYSTEM_PROMPT, RECOVERY_PLAN_SYSTEM_PROMPT};
use injury_tracker::llm::{
    ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage,
};
use injury_tracker::models::{InjuryStatus, ProgressEntry};
use injury_tracker::services::{extract_possible_injuries, InjuryAnalyst};

/// Replies with a fixed result and remembers every request
struct ScriptedProvider {
    reply: Result<String, ErrorCode>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    fn replying(content: &str) -> Self {
        Self {
            reply: Ok(content.to_owned()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(code: ErrorCode) -> Self {
        Self {
            reply: Err(code),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn last_request(&self) -> ChatRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::SYSTEM_MESSAGES
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-model".to_owned(),
                usage: Some(TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    total_tokens: 30,
                }),
                finish_reason: Some("stop".to_owned()),
            }),
            Err(code) => Err(AppError::new(*code, "scripted failure")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

const ANALYSIS: &str = "\
1. Possible injuries
- Lateral ankle sprain
- Peroneal tendon strain

2. Immediate steps
- Rest and ice";

#[tokio::test]
async fn test_analyze_injury_sends_system_and_user_prompt() {
    let provider = ScriptedProvider::replying(&format!("  {ANALYSIS}\n"));
    let analyst = InjuryAnalyst::new(&provider)
        .with_model("gpt-4o-mini")
        .with_temperature(0.3);

    let analysis = analyst.analyze_injury(&sample_details()).await.unwrap();
    assert_eq!(analysis, ANALYSIS);
    assert_eq!(
        extract_possible_injuries(&analysis),
        vec!["Lateral ankle sprain", "Peroneal tendon strain"]
    );

    let request = provider.last_request();
    assert_eq!(request.model.as_deref(), Some("gpt-4o-mini"));
    assert!((request.temperature.unwrap() - 0.3).abs() < f32::EPSILON);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(request.messages[0].content, INJURY_ANALYSIS_SYSTEM_PROMPT);
    assert_eq!(request.messages[1].role, MessageRole::User);
    assert!(request.messages[1].content.contains("Left Knee"));
    assert!(request.messages[1].content.contains("Basketball"));
}

#[tokio::test]
async fn test_analyze_injury_validates_before_calling() {
    let provider = ScriptedProvider::replying(ANALYSIS);
    let mut details = sample_details();
    details.symptoms.clear();

    let err = InjuryAnalyst::new(&provider)
        .analyze_injury(&details)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert!(provider.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_reply_is_an_error() {
    let provider = ScriptedProvider::replying(" \n ");
    let err = InjuryAnalyst::new(&provider)
        .analyze_injury(&sample_details())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.message, EMPTY_ANALYSIS);
}

#[tokio::test]
async fn test_recovery_plan_uses_config_and_hides_failure_detail() {
    let config = LlmConfig {
        model: "gpt-4-turbo".to_owned(),
        temperature: 0.5,
        ..LlmConfig::default()
    };

    let provider = ScriptedProvider::replying("Week 1: gentle range of motion");
    let mut details = sample_details();
    details.severity = Some("moderate".to_owned());
    let plan = InjuryAnalyst::from_config(&provider, &config)
        .generate_recovery_plan(&details, InjuryStatus::Active, "Prefers home workouts")
        .await
        .unwrap();
    assert_eq!(plan, "Week 1: gentle range of motion");

    let request = provider.last_request();
    assert_eq!(request.model.as_deref(), Some("gpt-4-turbo"));
    assert_eq!(request.messages[0].content, RECOVERY_PLAN_SYSTEM_PROMPT);
    assert!(request.messages[1].content.contains("moderate"));
    assert!(request.messages[1].content.contains("Prefers home workouts"));

    let failing = ScriptedProvider::failing(ErrorCode::ExternalRateLimited);
    let err = InjuryAnalyst::from_config(&failing, &config)
        .generate_recovery_plan(&details, InjuryStatus::Active, "")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert_eq!(err.message, RECOVERY_PLAN_FAILED);
}

#[tokio::test]
async fn test_progress_review_needs_entries() {
    let provider = ScriptedProvider::replying("Trending well");
    let analyst = InjuryAnalyst::new(&provider);
    let details = sample_details();

    let err = analyst.analyze_progress(&details, &[]).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientData);

    let entry = ProgressEntry {
        id: "p1".to_owned(),
        user_id: "user-1".to_owned(),
        injury_id: "injury-1".to_owned(),
        date: details.date,
        pain_level: 6,
        mobility: 4,
        swelling: 3,
        notes: "Stiff in the morning".to_owned(),
        exercises: Vec::new(),
    };
    let review = analyst.analyze_progress(&details, &[entry]).await.unwrap();
    assert_eq!(review, "Trending well");
    assert!(provider.last_request().messages[1]
        .content
        .contains("Stiff in the morning"));
}
