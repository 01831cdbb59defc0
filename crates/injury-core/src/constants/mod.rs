// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Value ranges, smart-adjustment limits, and fixed user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large list.

/// Self-reported scale bounds
pub mod scales {
    /// Lowest value on the pain/mobility/swelling/difficulty scale
    pub const MIN_SCORE: u8 = 1;
    /// Highest value on the pain/mobility/swelling/difficulty scale
    pub const MAX_SCORE: u8 = 10;
    /// Lowest derived exercise intensity
    pub const MIN_INTENSITY: u8 = 1;
    /// Highest derived exercise intensity
    pub const MAX_INTENSITY: u8 = 5;
}

/// Smart exercise adjustment orchestration limits
pub mod adjustment {
    /// Number of most recent progress entries fetched for a smart adjustment
    pub const SMART_ADJUSTMENT_HISTORY_LIMIT: u32 = 10;
    /// Minimum progress entries required before a smart adjustment is attempted
    pub const MIN_PROGRESS_ENTRIES_FOR_ADJUSTMENT: usize = 2;
    /// Reason recorded on history entries when the exercise carries none
    pub const DEFAULT_ADJUSTMENT_REASON: &str = "Based on recent progress data";
    /// Action text attached to adjustment alerts
    pub const ADJUSTMENT_ALERT_ACTION: &str = "View your updated exercise plan";
}

/// User-facing error messages
pub mod messages {
    /// Raised before invoking the engine when history is too short
    pub const INSUFFICIENT_PROGRESS: &str =
        "Not enough progress data for smart adjustment (minimum 2 entries required)";
    /// Raised when no plan or an empty plan exists for the injury
    pub const NO_RECOVERY_PLAN: &str = "No recovery plan or exercises found";
    /// Raised when a plan was updated after the adjustment read it
    pub const PLAN_CHANGED_CONCURRENTLY: &str =
        "The recovery plan was changed by another adjustment. Please try again.";
    /// Raised when a user touches another user's injury
    pub const ACCESS_DENIED: &str = "Access denied";
    /// Raised when the LLM returns no analysis text
    pub const EMPTY_ANALYSIS: &str = "Failed to generate analysis. Please try again.";
    /// Raised when recovery plan generation fails
    pub const RECOVERY_PLAN_FAILED: &str =
        "Failed to generate recovery plan. Please try again later.";
}

/// Service names used in logs and error messages
pub mod service_names {
    /// CLI binary service name
    pub const INJURY_TRACKER: &str = "injury-tracker";
    /// LLM service label for errors
    pub const LLM_SERVICE: &str = "OpenAI";
}
