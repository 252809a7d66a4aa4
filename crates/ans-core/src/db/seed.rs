//! Sample data for a fresh store

use sha2::{Digest, Sha256};
use tracing::info;

use super::Database;
use crate::error::Result;
use crate::models::{NewExpense, NewOperator, SeedSummary};

/// (cnpj, razao_social, registro_ans, modalidade, uf)
const SAMPLE_OPERATORS: [(&str, &str, &str, &str, &str); 5] = [
    ("12.345.678/0001-90", "Operadora Saúde Bem Estar Ltda", "123456", "Medicina de Grupo", "SP"),
    ("98.765.432/0001-10", "Plano Saúde Total S.A.", "654321", "Cooperativa Médica", "RJ"),
    ("11.222.333/0001-44", "Assistência Médica Premium", "111222", "Seguradora", "MG"),
    ("44.555.666/0001-77", "Saúde Plus Operadora", "444555", "Autogestão", "SP"),
    ("77.888.999/0001-33", "Vida Saudável Planos", "777888", "Medicina de Grupo", "RJ"),
];

const SAMPLE_QUARTERS: [i64; 3] = [1, 2, 3];
const SAMPLE_YEAR: i64 = 2024;

const BASE_AMOUNT: f64 = 100_000.0;
const AMOUNT_SPREAD: u64 = 500_000;

/// Deterministic amount in `[100000, 600000)` for an operator and quarter
pub(crate) fn sample_amount(cnpj: &str, quarter: i64) -> f64 {
    let digest = Sha256::digest(format!("{}{}", cnpj, quarter).as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    BASE_AMOUNT + (u64::from_le_bytes(bytes) % AMOUNT_SPREAD) as f64
}

impl Database {
    /// Insert the sample operators and their expenses
    ///
    /// Idempotent: operators are insert-or-ignore, and expenses are only
    /// written while the expense table is still empty.
    pub fn seed_sample_data(&self) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();

        for (cnpj, razao_social, registro_ans, modalidade, uf) in SAMPLE_OPERATORS {
            let inserted = self.insert_operator(&NewOperator {
                cnpj,
                razao_social,
                registro_ans: Some(registro_ans),
                modalidade: Some(modalidade),
                uf: Some(uf),
            })?;
            if inserted {
                summary.operators_inserted += 1;
            }
        }

        if self.count_expenses()? == 0 {
            for (cnpj, ..) in SAMPLE_OPERATORS {
                for trimestre in SAMPLE_QUARTERS {
                    self.insert_expense(&NewExpense {
                        cnpj,
                        trimestre,
                        ano: SAMPLE_YEAR,
                        valor: sample_amount(cnpj, trimestre),
                    })?;
                    summary.expenses_inserted += 1;
                }
            }
        }

        info!(
            operators = summary.operators_inserted,
            expenses = summary.expenses_inserted,
            "Sample data seeded"
        );
        Ok(summary)
    }
}
