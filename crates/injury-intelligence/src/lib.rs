// ABOUTME: Exercise adjustment engine for injury recovery plans
// ABOUTME: Pure functions mapping an exercise list and progress history to an adjusted plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

#![deny(unsafe_code)]

//! # Injury Intelligence
//!
//! The exercise adjustment engine. Given the exercises of a recovery plan and
//! the injury's recent progress entries, it estimates each exercise's
//! intensity, decides whether to increase, decrease, or maintain it, applies
//! that decision to sets and reps, and summarizes the changes.
//!
//! Everything here is synchronous and side-effect free apart from `debug`
//! tracing. Inputs are borrowed and never modified; identical inputs always
//! produce identical outputs.
//!
//! ```
//! use injury_core::models::Exercise;
//! use injury_intelligence::generate_smart_program;
//!
//! let plan = vec![Exercise::new("Wall slides", 3, 10)];
//! let program = generate_smart_program(&plan, &[]);
//! assert_eq!(program.exercises, plan);
//! ```

/// Thresholds, progression rules, and message text
pub mod config;
/// Rule-table decisions from progress trends
pub mod decision;
/// Engine holding an explicit configuration
pub mod engine;
/// 1-5 intensity estimate
pub mod intensity;
/// Applying decisions to prescriptions
pub mod mutator;
/// Whole-plan adjustment and summaries
pub mod program;

pub use config::{AdjustmentEngineConfig, ConfigError};
pub use decision::{determine_adjustment, Decision, DecisionRule};
pub use engine::AdjustmentEngine;
pub use intensity::estimate_intensity;
pub use mutator::adjust_exercise;
pub use program::{generate_smart_program, AdjustedProgram, ExerciseDecision};
