//! Aggregations over operators and expenses

use tracing::debug;

use super::Database;
use crate::error::Result;
use crate::models::{RegionDistribution, Statistics, StatisticsSummary, TopOperator};

/// Size of the top-operator ranking
pub const TOP_OPERATORS_LIMIT: i64 = 5;

/// Round to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Database {
    /// Compute totals, the top-5 ranking and the per-region distribution
    ///
    /// Operators without expenses never appear in the ranking or the
    /// distribution. Order among operators with equal sums is whatever the
    /// store yields and is not guaranteed.
    pub fn compute_statistics(&self) -> Result<Statistics> {
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;

        let (total, average): (f64, f64) = tx.query_row(
            "SELECT COALESCE(SUM(valor), 0), COALESCE(AVG(valor), 0) FROM despesas",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let top_operadoras = {
            let mut stmt = tx.prepare(
                r#"
                SELECT o.cnpj, o.razao_social, SUM(d.valor) AS total_despesas
                FROM operadoras o
                INNER JOIN despesas d ON o.cnpj = d.cnpj
                GROUP BY o.cnpj, o.razao_social
                ORDER BY total_despesas DESC
                LIMIT ?
                "#,
            )?;
            let rows = stmt.query_map([TOP_OPERATORS_LIMIT], |row| {
                Ok(TopOperator {
                    cnpj: row.get(0)?,
                    razao_social: row.get(1)?,
                    total_despesas: row.get(2)?,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        let distribuicao_uf = {
            let mut stmt = tx.prepare(
                r#"
                SELECT o.uf, COUNT(DISTINCT o.cnpj) AS num_operadoras, SUM(d.valor) AS total_despesas
                FROM operadoras o
                INNER JOIN despesas d ON o.cnpj = d.cnpj
                GROUP BY o.uf
                ORDER BY total_despesas DESC
                "#,
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(RegionDistribution {
                    uf: row.get(0)?,
                    num_operadoras: row.get(1)?,
                    total_despesas: row.get(2)?,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        tx.commit()?;

        debug!(
            total,
            average,
            top = top_operadoras.len(),
            regions = distribuicao_uf.len(),
            "Computed statistics"
        );

        Ok(Statistics {
            resumo: StatisticsSummary {
                total_despesas: round2(total),
                media_despesas: round2(average),
                // Counts the ranking, not the operator population
                num_operadoras: top_operadoras.len(),
            },
            top_operadoras,
            distribuicao_uf,
        })
    }
}
