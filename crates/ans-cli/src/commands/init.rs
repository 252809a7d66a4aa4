//! Init command and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Create the schema and load sample data

use std::path::Path;

use anyhow::{Context, Result};
use ans_core::db::Database;

/// Open the database, creating the schema if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;

    let summary = db
        .seed_sample_data()
        .context("Failed to seed sample data")?;
    println!(
        "   Seeded {} operator(s) and {} expense record(s)",
        summary.operators_inserted, summary.expenses_inserted
    );
    println!(
        "   Store now holds {} operator(s) and {} expense record(s)",
        db.count_operators_total()?,
        db.count_expenses()?
    );

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Browse operators: ans operators");
    println!("  2. Start the API: ans serve");

    Ok(())
}
