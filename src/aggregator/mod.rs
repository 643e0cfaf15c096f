//! Aggregation of parameter counts over the name hierarchy.
//!
//! This module derives:
//! - Per-node totals (sum of descendant tensor sizes)
//! - Whole-tree statistics for logs and summaries

pub mod metrics;
pub mod totals;

// Re-export main types and functions
pub use metrics::{calculate_tree_stats, TreeStats};
pub use totals::{aggregate, aggregate_group};
