// ABOUTME: Injury commands for injury-cli
// ABOUTME: Handles report, list, show, status, and delete operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use chrono::{DateTime, NaiveDate, Utc};
use injury_tracker::errors::{AppError, AppResult};
use injury_tracker::llm::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use injury_tracker::models::{BodyPart, InjuryDetails, InjuryStatus};
use injury_tracker::services::{extract_possible_injuries, InjuryAnalyst};
use tracing::{info, warn};

use super::CliContext;
use crate::helpers::display::{
    display_alerts, display_analysis, display_injury, display_injury_list, display_plan, display_progress,
};

/// Number of progress entries shown by `injury show`
const RECENT_PROGRESS_SHOWN: usize = 5;

/// Arguments of `injury report`
pub struct ReportArgs {
    pub body_parts: Vec<String>,
    pub cause: String,
    pub sport: String,
    pub symptoms: String,
    pub date: Option<String>,
    pub analyze: bool,
}

/// Report a new injury
pub async fn report(ctx: &CliContext, args: ReportArgs) -> AppResult<()> {
    let parts = args
        .body_parts
        .iter()
        .map(|part| part.parse::<BodyPart>())
        .collect::<AppResult<Vec<_>>>()?;

    let details = InjuryDetails {
        body_part: BodyPart::join_display_names(&parts),
        cause: args.cause,
        date: parse_injury_date(args.date.as_deref())?,
        sport: args.sport,
        symptoms: InjuryDetails::parse_symptoms(&args.symptoms),
        severity: None,
    };
    details.validate()?;

    let mut possible_injuries = Vec::new();
    if args.analyze {
        let provider =
            OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_llm_config(&ctx.config.llm))?;
        let analyst = InjuryAnalyst::from_config(&provider, &ctx.config.llm);
        match analyst.analyze_injury(&details).await {
            Ok(analysis) => {
                possible_injuries = extract_possible_injuries(&analysis);
                display_analysis("AI Analysis", &analysis);
            }
            // The report is still worth saving without the analysis
            Err(e) => warn!("Analysis failed, saving report without it: {e}"),
        }
    }

    let injury = ctx
        .database
        .injuries()
        .add(&ctx.user_id, &details, possible_injuries)
        .await?;
    info!("Injury {} reported", injury.id);

    println!("Injury reported: {}", injury.id);
    display_injury(&injury);
    Ok(())
}

/// List the user's injuries
pub async fn list(ctx: &CliContext) -> AppResult<()> {
    let injuries = ctx.database.injuries().list_for_user(&ctx.user_id).await?;
    display_injury_list(&injuries);
    Ok(())
}

/// Show an injury with its plan, latest progress, and unread alerts
pub async fn show(ctx: &CliContext, injury_id: &str) -> AppResult<()> {
    let injury = ctx.owned_injury(injury_id).await?;
    display_injury(&injury);

    match ctx
        .database
        .recovery_plans()
        .latest_for_injury(injury_id)
        .await?
    {
        Some(plan) => display_plan(&plan),
        None => println!("\nNo recovery plan yet."),
    }

    let entries = ctx
        .database
        .progress()
        .list_for_injury(&ctx.user_id, injury_id)
        .await?;
    let skip = entries.len().saturating_sub(RECENT_PROGRESS_SHOWN);
    display_progress(&entries[skip..]);

    let unread: Vec<_> = ctx
        .database
        .alerts()
        .list_for_injury(injury_id)
        .await?
        .into_iter()
        .filter(|alert| !alert.read)
        .collect();
    if !unread.is_empty() {
        display_alerts(&unread);
    }
    Ok(())
}

/// Change an injury's status
pub async fn set_status(ctx: &CliContext, injury_id: &str, status: &str) -> AppResult<()> {
    let status: InjuryStatus = status.parse()?;
    let injury = ctx
        .database
        .injuries()
        .update_status(&ctx.user_id, injury_id, status)
        .await?;
    println!("Injury {} is now {}", injury.id, injury.status);
    Ok(())
}

/// Delete an injury and its related records
pub async fn delete(ctx: &CliContext, injury_id: &str) -> AppResult<()> {
    ctx.database
        .injuries()
        .delete(&ctx.user_id, injury_id)
        .await?;
    println!("Deleted injury {injury_id} with its progress, plans, and alerts");
    Ok(())
}

/// Parse `YYYY-MM-DD` as midnight UTC; today when absent
fn parse_injury_date(value: Option<&str>) -> AppResult<DateTime<Utc>> {
    let Some(value) = value else {
        return Ok(Utc::now());
    };
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::invalid_input(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}
