//! Serializable tree reports.

pub mod schema;

// Re-export main types and functions
pub use schema::{build_report, validate_report, NodeKind, NodeReport, TreeReport};
