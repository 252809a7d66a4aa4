//! Expense history and inserts

use rusqlite::params;
use tracing::debug;

use super::operators::find_operator_with;
use super::Database;
use crate::error::{Error, Result};
use crate::models::{ExpenseHistory, ExpenseRecord, NewExpense};

impl Database {
    /// Full expense history of an operator, most recent fiscal period first
    ///
    /// Fails with `NotFound` before querying expenses when the operator
    /// does not exist. The history is not paginated.
    pub fn get_expense_history(&self, cnpj: &str) -> Result<ExpenseHistory> {
        let conn = self.conn()?;

        let operator = find_operator_with(&conn, cnpj)?
            .ok_or_else(|| Error::NotFound(format!("operator {}", cnpj)))?;

        let mut stmt = conn.prepare(
            r#"
            SELECT trimestre, ano, valor
            FROM despesas
            WHERE cnpj = ?
            ORDER BY ano DESC, trimestre DESC
            "#,
        )?;
        let despesas = stmt
            .query_map(params![cnpj], |row| {
                Ok(ExpenseRecord {
                    trimestre: row.get(0)?,
                    ano: row.get(1)?,
                    valor: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(cnpj, records = despesas.len(), "Loaded expense history");

        Ok(ExpenseHistory {
            cnpj: operator.cnpj,
            razao_social: operator.razao_social,
            despesas,
        })
    }

    /// Insert an expense row, returning its id
    ///
    /// Rows are never deduplicated: inserting the same (operator, quarter,
    /// year) twice stores two records.
    pub fn insert_expense(&self, expense: &NewExpense<'_>) -> Result<i64> {
        if !(1..=4).contains(&expense.trimestre) {
            return Err(Error::InvalidData(format!(
                "quarter must be between 1 and 4, got {}",
                expense.trimestre
            )));
        }
        if !expense.valor.is_finite() || expense.valor < 0.0 {
            return Err(Error::InvalidData(format!(
                "expense amount must be a non-negative number, got {}",
                expense.valor
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO despesas (cnpj, trimestre, ano, valor) VALUES (?, ?, ?, ?)",
            params![expense.cnpj, expense.trimestre, expense.ano, expense.valor],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Number of expense rows in the store
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM despesas", [], |row| row.get(0))?;
        Ok(count)
    }
}
