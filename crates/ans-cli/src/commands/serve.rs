//! Server command implementation

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    stats_ttl: u64,
    no_seed: bool,
) -> Result<()> {
    println!("🚀 Starting ANS API server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    println!("   Statistics cache: {}s", stats_ttl);

    let db = open_db(db_path)?;

    if no_seed {
        println!("   Sample data: skipped (--no-seed)");
    } else {
        // Idempotent: only fills what is missing
        db.seed_sample_data()
            .context("Failed to seed sample data")?;
    }

    println!();
    println!("   Routes:");
    println!("   GET  /api/operadoras                  - List operators (paginated)");
    println!("   GET  /api/operadoras/{{cnpj}}           - Operator details");
    println!("   GET  /api/operadoras/{{cnpj}}/despesas  - Expense history");
    println!("   GET  /api/estatisticas                - Aggregated statistics");
    println!("   GET  /api/health                      - Health check");
    println!();
    println!("   Press Ctrl+C to stop");

    let config = ans_server::ServerConfig {
        stats_ttl: Duration::from_secs(stats_ttl),
    };

    ans_server::serve_with_config(db, host, port, config).await?;

    Ok(())
}
