//! Statistics command implementation

use anyhow::Result;
use ans_core::db::Database;

use super::{format_brl, truncate};

pub fn cmd_stats(db: &Database) -> Result<()> {
    let stats = db.compute_statistics()?;

    println!();
    println!("📊 Expense Statistics");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total:   {}", format_brl(stats.resumo.total_despesas));
    println!("   Average: {}", format_brl(stats.resumo.media_despesas));

    if stats.top_operadoras.is_empty() {
        println!();
        println!("   No expense records yet.");
        return Ok(());
    }

    println!();
    println!("   Top {} operators:", stats.resumo.num_operadoras);
    for (i, op) in stats.top_operadoras.iter().enumerate() {
        println!(
            "   {}. {:<40} {:>20}",
            i + 1,
            truncate(&op.razao_social, 40),
            format_brl(op.total_despesas)
        );
    }

    println!();
    println!("   By region:");
    for region in &stats.distribuicao_uf {
        println!(
            "   {:<2} │ {:>3} operator(s) │ {:>20}",
            region.uf.as_deref().unwrap_or("--"),
            region.num_operadoras,
            format_brl(region.total_despesas)
        );
    }

    Ok(())
}
