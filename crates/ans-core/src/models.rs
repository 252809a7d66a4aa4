//! Domain models for the ANS data API
//!
//! Field names on serialized types are the public wire contract
//! (`cnpj`, `razao_social`, `trimestre`, ...) and must not change.

use serde::{Deserialize, Serialize};

/// A health-insurance operator registered with the regulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    /// Tax identifier, primary key
    pub cnpj: String,
    /// Legal name
    pub razao_social: String,
    /// Regulatory registration id
    pub registro_ans: Option<String>,
    /// Market-segment category
    pub modalidade: Option<String>,
    /// Two-letter region code
    pub uf: Option<String>,
}

/// Operator to be inserted during bootstrap
#[derive(Debug, Clone)]
pub struct NewOperator<'a> {
    pub cnpj: &'a str,
    pub razao_social: &'a str,
    pub registro_ans: Option<&'a str>,
    pub modalidade: Option<&'a str>,
    pub uf: Option<&'a str>,
}

/// One expense row of an operator's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub trimestre: i64,
    pub ano: i64,
    pub valor: f64,
}

/// Expense to be inserted during bootstrap
#[derive(Debug, Clone)]
pub struct NewExpense<'a> {
    pub cnpj: &'a str,
    pub trimestre: i64,
    pub ano: i64,
    pub valor: f64,
}

/// Full expense history of one operator, most recent fiscal period first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseHistory {
    pub cnpj: String,
    pub razao_social: String,
    pub despesas: Vec<ExpenseRecord>,
}

/// Aggregated statistics over the whole store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub resumo: StatisticsSummary,
    pub top_operadoras: Vec<TopOperator>,
    pub distribuicao_uf: Vec<RegionDistribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    /// Sum of all expense amounts, rounded to 2 decimal places
    pub total_despesas: f64,
    /// Mean of all expense amounts, rounded to 2 decimal places
    pub media_despesas: f64,
    /// Number of entries in `top_operadoras` (not the operator population)
    pub num_operadoras: usize,
}

/// Operator ranked by the sum of its own expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopOperator {
    pub cnpj: String,
    pub razao_social: String,
    pub total_despesas: f64,
}

/// Expense totals for one region code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDistribution {
    pub uf: Option<String>,
    /// Distinct operators in the region with at least one expense
    pub num_operadoras: i64,
    pub total_despesas: f64,
}

/// Rows written by a bootstrap seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub operators_inserted: usize,
    pub expenses_inserted: usize,
}
