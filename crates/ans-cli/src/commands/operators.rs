//! Operator command implementations (list, show, expense history)

use anyhow::Result;
use ans_core::db::Database;
use ans_core::pagination::PageRequest;

use super::{format_brl, truncate};

pub fn cmd_operators_list(
    db: &Database,
    search: Option<&str>,
    page: i64,
    limit: i64,
) -> Result<()> {
    let result = db.list_operators(search, PageRequest::new(Some(page), Some(limit)))?;

    if result.total == 0 {
        match search {
            Some(q) => println!("No operators match \"{}\".", q.trim()),
            None => println!("No operators found. Load sample data with:\n  ans init"),
        }
        return Ok(());
    }

    println!();
    println!(
        "🏥 Operators (page {}/{}, {} total)",
        result.page, result.total_pages, result.total
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if result.data.is_empty() {
        println!("   (page {} is past the last page)", result.page);
        return Ok(());
    }

    for op in &result.data {
        println!(
            "   {:<18} │ {:<2} │ {}",
            op.cnpj,
            op.uf.as_deref().unwrap_or("--"),
            truncate(&op.razao_social, 40)
        );
    }

    Ok(())
}

pub fn cmd_operators_show(db: &Database, cnpj: &str) -> Result<()> {
    let op = db.get_operator(cnpj)?;

    println!();
    println!("🏥 {}", op.razao_social);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   CNPJ:         {}", op.cnpj);
    println!("   Registro ANS: {}", op.registro_ans.as_deref().unwrap_or("-"));
    println!("   Modalidade:   {}", op.modalidade.as_deref().unwrap_or("-"));
    println!("   UF:           {}", op.uf.as_deref().unwrap_or("-"));

    Ok(())
}

pub fn cmd_expenses(db: &Database, cnpj: &str) -> Result<()> {
    let history = db.get_expense_history(cnpj)?;

    println!();
    println!("💰 Expenses - {}", history.razao_social);
    println!("   ─────────────────────────────────────────────────────────────");

    if history.despesas.is_empty() {
        println!("   No expense records.");
        return Ok(());
    }

    for d in &history.despesas {
        println!("   {}T{} │ {:>20}", d.trimestre, d.ano, format_brl(d.valor));
    }

    Ok(())
}
