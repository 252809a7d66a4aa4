//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `init` - Init command and shared utilities (open_db)
//! - `operators` - Operator listing, detail and expense history
//! - `serve` - Web server command
//! - `stats` - Aggregated statistics

pub mod init;
pub mod operators;
pub mod serve;
pub mod stats;

// Re-export command functions for main.rs
pub use init::*;
pub use operators::*;
pub use serve::*;
pub use stats::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount as Brazilian reais, e.g. `R$ 1.234.567,89`
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, frac)
}
