//! ANS Core Library
//!
//! Shared functionality for the health-insurance operator data API:
//! - Pooled SQLite access and schema bootstrap
//! - Paginated, filterable operator listing
//! - Operator detail and expense history lookups
//! - Aggregated expense statistics
//! - Single-slot TTL cache for the statistics
//! - Sample data seeding

pub mod cache;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;

pub use cache::{CacheState, StatisticsCache};
pub use db::Database;
pub use error::{Error, Result};
pub use pagination::{Page, PageRequest};
