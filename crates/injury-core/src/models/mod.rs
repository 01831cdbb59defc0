// ABOUTME: Core data models for injury tracking and recovery planning
// ABOUTME: Re-exports Injury, Exercise, ProgressEntry, RecoveryPlan, Alert, and BodyPart
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

//! # Data Models
//!
//! This module contains the document shapes shared by the adjustment engine,
//! the persistence adapter, and the CLI.
//!
//! ## Design Principles
//!
//! - **Store Agnostic**: Models carry no persistence logic; ids and timestamps are
//!   assigned by whichever store writes them
//! - **Serializable**: camelCase JSON matches the document layout other clients use
//! - **Append-only history**: progress entries and adjustment history are never edited
//!
//! ## Core Models
//!
//! - `Injury`: a reported injury with lifecycle status
//! - `Exercise`: a prescribed movement in a recovery plan
//! - `ProgressEntry`: a dated pain/mobility/swelling self-report
//! - `RecoveryPlan`: the current exercise list plus adjustment history
//! - `Alert`: a dashboard notification

mod alert;
mod body_part;
mod exercise;
mod injury;
mod plan;
mod progress;

pub use alert::{Alert, AlertType};
pub use body_part::BodyPart;
pub use exercise::Exercise;
pub use injury::{Injury, InjuryDetails, InjuryStatus};
pub use plan::{AdjustmentType, ExerciseAdjustment, Milestone, NewRecoveryPlan, RecoveryPlan};
pub use progress::{CompletedExercise, NewProgressEntry, ProgressEntry};
