// ABOUTME: Alert notifications attached to an injury
// ABOUTME: Warning, milestone, recommendation, and plan-adjustment alerts with read state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Something in the progress data looks concerning
    Warning,
    /// A milestone was reached
    Milestone,
    /// A general recommendation
    Recommendation,
    /// The exercise plan was adjusted
    Adjustment,
}

impl AlertType {
    /// Convert to the stored string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Milestone => "milestone",
            Self::Recommendation => "recommendation",
            Self::Adjustment => "adjustment",
        }
    }

    /// Parse from the stored representation, defaulting to `Recommendation`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "warning" => Self::Warning,
            "milestone" => Self::Milestone,
            "adjustment" => Self::Adjustment,
            _ => Self::Recommendation,
        }
    }
}

/// A notification shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Store-assigned identifier
    pub id: String,
    /// Injury the alert belongs to
    pub injury_id: String,
    /// Kind of alert
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Message body
    pub message: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Whether the user has read it
    pub read: bool,
    /// Suggested follow-up action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}
