// ABOUTME: Alert commands for injury-cli
// ABOUTME: Lists an injury's alerts and marks them read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use injury_tracker::errors::{AppError, AppResult};

use super::CliContext;
use crate::helpers::display::display_alerts;

/// List alerts for an injury
pub async fn list(ctx: &CliContext, injury_id: &str, unread_only: bool) -> AppResult<()> {
    ctx.owned_injury(injury_id).await?;

    let mut alerts = ctx.database.alerts().list_for_injury(injury_id).await?;
    if unread_only {
        alerts.retain(|alert| !alert.read);
    }
    display_alerts(&alerts);
    Ok(())
}

/// Mark an alert read after checking the user owns its injury
pub async fn read(ctx: &CliContext, alert_id: &str) -> AppResult<()> {
    let manager = ctx.database.alerts();
    let alert = manager
        .get(alert_id)
        .await?
        .ok_or_else(|| AppError::not_found("Alert").with_resource_id(alert_id))?;
    ctx.owned_injury(&alert.injury_id).await?;

    manager.mark_read(alert_id).await?;
    println!("Alert {alert_id} marked as read");
    Ok(())
}
