// ABOUTME: Command modules for injury-cli and the context they share
// ABOUTME: CliContext carries the database, configuration, and acting user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

pub mod alerts;
pub mod analyze;
pub mod injury;
pub mod plan;
pub mod progress;

use injury_tracker::config::AppConfig;
use injury_tracker::database::Database;
use injury_tracker::errors::AppResult;
use injury_tracker::models::Injury;

/// Everything a command needs to run
pub struct CliContext {
    pub database: Database,
    pub config: AppConfig,
    pub user_id: String,
}

impl CliContext {
    pub const fn new(database: Database, config: AppConfig, user_id: String) -> Self {
        Self {
            database,
            config,
            user_id,
        }
    }

    /// Load an injury the acting user owns
    pub async fn owned_injury(&self, injury_id: &str) -> AppResult<Injury> {
        self.database
            .injuries()
            .get_owned(&self.user_id, injury_id)
            .await
    }
}
