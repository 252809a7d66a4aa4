//! ANS CLI - Health-insurance operator expense data
//!
//! Usage:
//!   ans init                    Initialize database with sample data
//!   ans serve --port 5000       Start web server
//!   ans operators --search X    List operators
//!   ans stats                   Show aggregated statistics

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve {
            port,
            host,
            stats_ttl,
            no_seed,
        } => commands::cmd_serve(&cli.db, &host, port, stats_ttl, no_seed).await,
        Commands::Operators {
            action,
            search,
            page,
            limit,
        } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                Some(OperatorsAction::Show { cnpj }) => commands::cmd_operators_show(&db, &cnpj),
                None => commands::cmd_operators_list(&db, search.as_deref(), page, limit),
            }
        }
        Commands::Expenses { cnpj } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_expenses(&db, &cnpj)
        }
        Commands::Stats => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_stats(&db)
        }
    }
}
