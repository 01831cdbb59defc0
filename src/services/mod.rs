// ABOUTME: Domain service layer combining persistence, the adjustment engine, and the LLM client
// ABOUTME: Used by the CLI and reusable by any other front end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! Domain service layer
//!
//! Services take their collaborators explicitly (a `Database`, an
//! `LlmProvider`) so callers control client lifecycles.

/// LLM-backed injury analysis, recovery plan drafting, and progress review
pub mod injury_analysis;

/// Progress-driven exercise plan adjustment
pub mod smart_adjustment;

pub use injury_analysis::{extract_possible_injuries, InjuryAnalyst};
pub use smart_adjustment::{SmartAdjustmentOutcome, SmartAdjustmentService};
