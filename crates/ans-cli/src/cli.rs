//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ANS - Health-insurance operator expense data
#[derive(Parser)]
#[command(name = "ans")]
#[command(about = "Read-only API and tools for ANS operator expense data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "dados_ans.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and load sample data
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Seconds computed statistics are served from memory
        #[arg(long, default_value = "300")]
        stats_ttl: u64,

        /// Do not load sample data on startup
        #[arg(long)]
        no_seed: bool,
    },

    /// List operators (paginated) or show one
    Operators {
        #[command(subcommand)]
        action: Option<OperatorsAction>,

        /// Filter by legal name or tax id substring
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (starting at 1)
        #[arg(long, default_value = "1")]
        page: i64,

        /// Operators per page (max 100)
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },

    /// Show an operator's expense history
    Expenses {
        /// Operator tax id (CNPJ)
        cnpj: String,
    },

    /// Show aggregated expense statistics
    Stats,
}

#[derive(Subcommand)]
pub enum OperatorsAction {
    /// Show a single operator
    Show {
        /// Operator tax id (CNPJ)
        cnpj: String,
    },
}
