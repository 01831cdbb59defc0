// ABOUTME: injury-cli - command-line front end for the injury tracker
// ABOUTME: Reports injuries, logs progress, manages and adjusts recovery plans, and runs AI analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors
//!
//! Usage:
//! ```bash
//! # Report an injury (optionally with AI analysis)
//! injury-cli --user alex injury report --body-part left_ankle --cause "Rolled on landing" \
//!     --sport Basketball --symptoms "swelling, bruising" --analyze
//!
//! # Log today's progress, with per-exercise difficulty
//! injury-cli --user alex progress log <injury-id> --pain 4 --mobility 6 --swelling 3 \
//!     --exercise "Ankle circles:3"
//!
//! # Create a plan from a JSON exercise list, then adjust it from recent progress
//! injury-cli --user alex plan create <injury-id> --file exercises.json
//! injury-cli --user alex plan adjust <injury-id>
//!
//! # List selectable body parts
//! injury-cli body-parts
//! ```

mod commands;
mod helpers;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use injury_tracker::config::{AppConfig, DatabaseUrl};
use injury_tracker::database::Database;
use injury_tracker::errors::AppResult;
use injury_tracker::logging::LoggingConfig;
use tracing::{debug, error};

use commands::CliContext;

#[derive(Parser)]
#[command(
    name = "injury-cli",
    about = "Sports injury tracker",
    long_about = "Track sports injuries, log recovery progress, and keep exercise plans matched to how recovery is going."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override (e.g. sqlite:./data/injuries.db)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// User the records belong to
    #[arg(long, global = true, default_value = "local")]
    user: String,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Injury reports
    Injury {
        #[command(subcommand)]
        action: InjuryCommand,
    },

    /// Progress entries
    Progress {
        #[command(subcommand)]
        action: ProgressCommand,
    },

    /// Recovery plans and smart adjustment
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Alerts raised for an injury
    Alerts {
        #[command(subcommand)]
        action: AlertsCommand,
    },

    /// AI analysis through the configured LLM
    Analyze {
        #[command(subcommand)]
        action: AnalyzeCommand,
    },

    /// List selectable body parts
    BodyParts,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum InjuryCommand {
    /// Report a new injury
    Report {
        /// Body part id or display name; repeat for multiple regions
        #[arg(long = "body-part", required = true)]
        body_parts: Vec<String>,

        /// What happened
        #[arg(long)]
        cause: String,

        /// Sport or activity
        #[arg(long)]
        sport: String,

        /// Comma-separated symptoms
        #[arg(long)]
        symptoms: String,

        /// Date of injury (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Run AI analysis and store the possible injuries it names
        #[arg(long)]
        analyze: bool,
    },

    /// List your injuries, newest first
    List,

    /// Show an injury with its current plan and recent activity
    Show {
        /// Injury ID
        injury_id: String,
    },

    /// Change an injury's status (active, recovered, needs-attention)
    Status {
        /// Injury ID
        injury_id: String,

        /// New status
        status: String,
    },

    /// Delete an injury and everything attached to it
    Delete {
        /// Injury ID
        injury_id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProgressCommand {
    /// Record today's progress
    Log {
        /// Injury ID
        injury_id: String,

        /// Pain level (1-10)
        #[arg(long)]
        pain: u8,

        /// Mobility (1-10)
        #[arg(long)]
        mobility: u8,

        /// Swelling (1-10)
        #[arg(long)]
        swelling: u8,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Completed exercise as NAME:DIFFICULTY (difficulty 1-10); repeatable
        #[arg(long = "exercise")]
        exercises: Vec<String>,
    },

    /// List progress entries, oldest first
    List {
        /// Injury ID
        injury_id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PlanCommand {
    /// Create a recovery plan from a JSON array of exercises
    Create {
        /// Injury ID
        injury_id: String,

        /// Path to the exercise list
        #[arg(long)]
        file: String,

        /// Expected recovery timeline
        #[arg(long, default_value = "")]
        timeline: String,
    },

    /// Show the current recovery plan
    Show {
        /// Injury ID
        injury_id: String,
    },

    /// Adjust the current plan from recent progress
    Adjust {
        /// Injury ID
        injury_id: String,
    },

    /// Show the adjustment history of the current plan
    History {
        /// Injury ID
        injury_id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AlertsCommand {
    /// List alerts for an injury, newest first
    List {
        /// Injury ID
        injury_id: String,

        /// Only show unread alerts
        #[arg(long)]
        unread: bool,
    },

    /// Mark an alert as read
    Read {
        /// Alert ID
        alert_id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AnalyzeCommand {
    /// Possible injuries, first steps, and warning signs
    Injury {
        /// Injury ID
        injury_id: String,
    },

    /// Draft a recovery plan
    Plan {
        /// Injury ID
        injury_id: String,

        /// Extra context: schedule, goals, previous treatment
        #[arg(long, default_value = "")]
        info: String,

        /// Severity as you would describe it
        #[arg(long)]
        severity: Option<String>,
    },

    /// Review the recovery trajectory from logged progress
    Progress {
        /// Injury ID
        injury_id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::from_env().with_level("debug")
    } else {
        LoggingConfig::from_env()
    };
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    if matches!(cli.command, Command::BodyParts) {
        helpers::display::display_body_parts();
        return Ok(());
    }

    let mut config = AppConfig::from_env()?;
    if let Some(url) = &cli.database_url {
        config.database_url = DatabaseUrl::parse_url(url)?;
    }
    config.summary_log();

    debug!("Connecting to database: {}", config.database_url);
    let database = Database::new(&config.database_url).await?;
    let ctx = CliContext::new(database, config, cli.user);

    match cli.command {
        Command::Injury { action } => match action {
            InjuryCommand::Report {
                body_parts,
                cause,
                sport,
                symptoms,
                date,
                analyze,
            } => {
                let report = commands::injury::ReportArgs {
                    body_parts,
                    cause,
                    sport,
                    symptoms,
                    date,
                    analyze,
                };
                commands::injury::report(&ctx, report).await?;
            }
            InjuryCommand::List => commands::injury::list(&ctx).await?,
            InjuryCommand::Show { injury_id } => commands::injury::show(&ctx, &injury_id).await?,
            InjuryCommand::Status { injury_id, status } => {
                commands::injury::set_status(&ctx, &injury_id, &status).await?;
            }
            InjuryCommand::Delete { injury_id } => {
                commands::injury::delete(&ctx, &injury_id).await?;
            }
        },
        Command::Progress { action } => match action {
            ProgressCommand::Log {
                injury_id,
                pain,
                mobility,
                swelling,
                notes,
                exercises,
            } => {
                let entry = commands::progress::LogArgs {
                    pain,
                    mobility,
                    swelling,
                    notes,
                    exercises,
                };
                commands::progress::log(&ctx, &injury_id, entry).await?;
            }
            ProgressCommand::List { injury_id } => {
                commands::progress::list(&ctx, &injury_id).await?;
            }
        },
        Command::Plan { action } => match action {
            PlanCommand::Create {
                injury_id,
                file,
                timeline,
            } => commands::plan::create(&ctx, &injury_id, &file, timeline).await?,
            PlanCommand::Show { injury_id } => commands::plan::show(&ctx, &injury_id).await?,
            PlanCommand::Adjust { injury_id } => commands::plan::adjust(&ctx, &injury_id).await?,
            PlanCommand::History { injury_id } => {
                commands::plan::history(&ctx, &injury_id).await?;
            }
        },
        Command::Alerts { action } => match action {
            AlertsCommand::List { injury_id, unread } => {
                commands::alerts::list(&ctx, &injury_id, unread).await?;
            }
            AlertsCommand::Read { alert_id } => commands::alerts::read(&ctx, &alert_id).await?,
        },
        Command::Analyze { action } => match action {
            AnalyzeCommand::Injury { injury_id } => {
                commands::analyze::injury(&ctx, &injury_id).await?;
            }
            AnalyzeCommand::Plan {
                injury_id,
                info,
                severity,
            } => commands::analyze::plan(&ctx, &injury_id, &info, severity).await?,
            AnalyzeCommand::Progress { injury_id } => {
                commands::analyze::progress(&ctx, &injury_id).await?;
            }
        },
        Command::BodyParts => helpers::display::display_body_parts(),
    }

    Ok(())
}
