// ABOUTME: Human-readable formatting helpers for dates and symptom lists
// ABOUTME: Shared by LLM prompt construction and CLI output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use chrono::{DateTime, Utc};

/// Format a date like "March 4, 2025"
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Join a list for display, or return `fallback` when it is empty
#[must_use]
pub fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_owned()
    } else {
        items.join(", ")
    }
}
