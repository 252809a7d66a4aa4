//! Database access layer with connection pooling and schema bootstrap
//!
//! This module is organized by domain:
//! - `operators` - Operator listing and lookup
//! - `operator_filter` - Fixed statement variants for the operator listing
//! - `expenses` - Expense history and inserts
//! - `statistics` - Aggregations over operators and expenses
//! - `seed` - Sample data for a fresh store

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::debug;

use crate::error::Result;

mod expenses;
mod operator_filter;
mod operators;
mod seed;
mod statistics;

pub use operator_filter::{OperatorFilter, OperatorQuery};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Maximum number of pooled connections
const POOL_MAX_SIZE: u32 = 10;

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database file and bootstrap the schema
    pub fn new(path: &str) -> Result<Self> {
        // Pragmas are per-connection, so every pooled connection gets them
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        let pool = Pool::builder().max_size(POOL_MAX_SIZE).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create an empty throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every
    /// pooled connection would otherwise see its own private database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "ans_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    ///
    /// The connection goes back to the pool when dropped.
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Create tables and indexes if they do not exist yet
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Operators (keyed by tax identifier)
            CREATE TABLE IF NOT EXISTS operadoras (
                cnpj TEXT PRIMARY KEY,
                razao_social TEXT NOT NULL,
                registro_ans TEXT,
                modalidade TEXT,
                uf TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_operadoras_razao_social ON operadoras(razao_social);

            -- Quarterly expenses, many per operator
            CREATE TABLE IF NOT EXISTS despesas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cnpj TEXT NOT NULL,
                trimestre INTEGER NOT NULL CHECK (trimestre BETWEEN 1 AND 4),
                ano INTEGER NOT NULL,
                valor REAL NOT NULL CHECK (valor >= 0),
                FOREIGN KEY (cnpj) REFERENCES operadoras(cnpj)
            );

            CREATE INDEX IF NOT EXISTS idx_despesas_cnpj ON despesas(cnpj);
            "#,
        )?;

        debug!(path = %self.db_path, "Database schema ready");
        Ok(())
    }
}
