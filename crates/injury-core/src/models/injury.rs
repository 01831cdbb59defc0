// ABOUTME: Injury report models with lifecycle status
// ABOUTME: InjuryDetails is the client-supplied report; Injury is the stored document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// Lifecycle status of an injury
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum InjuryStatus {
    /// Still recovering
    #[default]
    Active,
    /// Fully recovered
    Recovered,
    /// Progress suggests the user should seek attention
    NeedsAttention,
}

impl InjuryStatus {
    /// Convert to the stored string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Recovered => "recovered",
            Self::NeedsAttention => "needsAttention",
        }
    }
}

impl fmt::Display for InjuryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InjuryStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "active" => Ok(Self::Active),
            "recovered" => Ok(Self::Recovered),
            "needsattention" => Ok(Self::NeedsAttention),
            other => Err(AppError::invalid_input(format!(
                "Unknown injury status: {other}"
            ))),
        }
    }
}

/// What the user reports about a new injury
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjuryDetails {
    /// Affected body part(s) as display text, comma-separated when several
    pub body_part: String,
    /// How the injury happened
    pub cause: String,
    /// When the injury happened
    pub date: DateTime<Utc>,
    /// Sport or activity
    pub sport: String,
    /// Reported symptoms
    pub symptoms: Vec<String>,
    /// Optional severity description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl InjuryDetails {
    /// Split a comma-separated symptom list, trimming blanks
    #[must_use]
    pub fn parse_symptoms(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Check the fields the report form requires
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for the first empty field.
    pub fn validate(&self) -> AppResult<()> {
        if self.body_part.trim().is_empty() {
            return Err(AppError::missing_field("At least one body part"));
        }
        if self.sport.trim().is_empty() {
            return Err(AppError::missing_field("Sport/Activity"));
        }
        if self.cause.trim().is_empty() {
            return Err(AppError::missing_field("Cause"));
        }
        if self.symptoms.iter().all(|s| s.trim().is_empty()) {
            return Err(AppError::missing_field("At least one symptom"));
        }
        Ok(())
    }
}

/// A stored injury report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Injury {
    /// Store-assigned identifier
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Affected body part(s) as display text
    pub body_part: String,
    /// How the injury happened
    pub cause: String,
    /// When the injury happened
    pub date: DateTime<Utc>,
    /// Sport or activity
    pub sport: String,
    /// Reported symptoms
    pub symptoms: Vec<String>,
    /// Possible injuries extracted from the analysis
    #[serde(default)]
    pub possible_injuries: Vec<String>,
    /// Lifecycle status
    pub status: InjuryStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Injury {
    /// Whether `user_id` owns this injury
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// The report fields, for prompting the analysis service
    #[must_use]
    pub fn details(&self) -> InjuryDetails {
        InjuryDetails {
            body_part: self.body_part.clone(),
            cause: self.cause.clone(),
            date: self.date,
            sport: self.sport.clone(),
            symptoms: self.symptoms.clone(),
            severity: None,
        }
    }
}
