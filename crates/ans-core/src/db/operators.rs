//! Operator listing and lookup

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbConn, OperatorFilter};
use crate::error::{Error, Result};
use crate::models::{NewOperator, Operator};
use crate::pagination::{Page, PageRequest};

const SELECT_BY_CNPJ: &str =
    "SELECT cnpj, razao_social, registro_ans, modalidade, uf FROM operadoras WHERE cnpj = ?";

fn row_to_operator(row: &Row<'_>) -> rusqlite::Result<Operator> {
    Ok(Operator {
        cnpj: row.get(0)?,
        razao_social: row.get(1)?,
        registro_ans: row.get(2)?,
        modalidade: row.get(3)?,
        uf: row.get(4)?,
    })
}

impl Database {
    /// List operators ordered by legal name, optionally filtered by a
    /// substring of the legal name or tax id
    ///
    /// The page and the total are read in one transaction with the same
    /// predicate, so `total` always describes the rows `data` was cut from.
    pub fn list_operators(
        &self,
        search: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<Operator>> {
        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;

        let query = OperatorFilter::new().search(search).build();
        let limit = request.limit();
        let offset = request.offset();

        let (operators, total) = match query.pattern.as_deref() {
            Some(pattern) => {
                let mut stmt = tx.prepare(query.list_sql)?;
                let operators = stmt
                    .query_map(params![pattern, limit, offset], row_to_operator)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                let total: i64 =
                    tx.query_row(query.count_sql, params![pattern], |row| row.get(0))?;
                (operators, total)
            }
            None => {
                let mut stmt = tx.prepare(query.list_sql)?;
                let operators = stmt
                    .query_map(params![limit, offset], row_to_operator)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                let total: i64 = tx.query_row(query.count_sql, [], |row| row.get(0))?;
                (operators, total)
            }
        };

        tx.commit()?;
        Ok(Page::new(operators, request, total))
    }

    /// Look up an operator by tax id, `None` if absent
    pub fn find_operator(&self, cnpj: &str) -> Result<Option<Operator>> {
        let conn = self.conn()?;
        find_operator_with(&conn, cnpj)
    }

    /// Look up an operator by tax id, failing with `NotFound` if absent
    pub fn get_operator(&self, cnpj: &str) -> Result<Operator> {
        self.find_operator(cnpj)?
            .ok_or_else(|| Error::NotFound(format!("operator {}", cnpj)))
    }

    /// Insert an operator; an existing tax id is left untouched.
    /// Returns true if a row was written.
    pub fn insert_operator(&self, op: &NewOperator<'_>) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO operadoras (cnpj, razao_social, registro_ans, modalidade, uf) VALUES (?, ?, ?, ?, ?)",
            params![op.cnpj, op.razao_social, op.registro_ans, op.modalidade, op.uf],
        )?;
        Ok(changed > 0)
    }

    /// Number of operators in the store
    pub fn count_operators_total(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM operadoras", [], |row| row.get(0))?;
        Ok(count)
    }
}

pub(super) fn find_operator_with(conn: &DbConn, cnpj: &str) -> Result<Option<Operator>> {
    conn.query_row(SELECT_BY_CNPJ, params![cnpj], row_to_operator)
        .optional()
        .map_err(Into::into)
}
