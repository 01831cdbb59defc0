// ABOUTME: AI analysis commands for injury-cli
// ABOUTME: Sends stored injuries and progress to the configured LLM and prints the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_tracker::errors::AppResult;
use injury_tracker::llm::{LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use injury_tracker::services::InjuryAnalyst;
use tracing::info;

use super::CliContext;
use crate::helpers::display::display_analysis;

fn provider(ctx: &CliContext) -> AppResult<OpenAiCompatibleProvider> {
    let provider =
        OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_llm_config(&ctx.config.llm))?;
    info!(
        "Using {} model {}",
        provider.display_name(),
        provider.default_model()
    );
    Ok(provider)
}

/// Analyze a stored injury
pub async fn injury(ctx: &CliContext, injury_id: &str) -> AppResult<()> {
    let injury = ctx.owned_injury(injury_id).await?;
    let provider = provider(ctx)?;
    let analysis = InjuryAnalyst::from_config(&provider, &ctx.config.llm)
        .analyze_injury(&injury.details())
        .await?;
    display_analysis("Injury Analysis", &analysis);
    Ok(())
}

/// Draft a recovery plan for a stored injury
pub async fn plan(
    ctx: &CliContext,
    injury_id: &str,
    additional_info: &str,
    severity: Option<String>,
) -> AppResult<()> {
    let injury = ctx.owned_injury(injury_id).await?;
    let mut details = injury.details();
    details.severity = severity;

    let provider = provider(ctx)?;
    let plan = InjuryAnalyst::from_config(&provider, &ctx.config.llm)
        .generate_recovery_plan(&details, injury.status, additional_info)
        .await?;
    display_analysis("Recovery Plan", &plan);
    Ok(())
}

/// Review progress entries of a stored injury
pub async fn progress(ctx: &CliContext, injury_id: &str) -> AppResult<()> {
    let injury = ctx.owned_injury(injury_id).await?;
    let entries = ctx
        .database
        .progress()
        .list_for_injury(&ctx.user_id, injury_id)
        .await?;

    let provider = provider(ctx)?;
    let review = InjuryAnalyst::from_config(&provider, &ctx.config.llm)
        .analyze_progress(&injury.details(), &entries)
        .await?;
    display_analysis("Progress Review", &review);
    Ok(())
}
