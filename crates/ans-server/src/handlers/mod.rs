//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod operators;
pub mod statistics;
pub mod system;

// Re-export all handlers for use in router
pub use operators::*;
pub use statistics::*;
pub use system::*;
