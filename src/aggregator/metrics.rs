//! Summary statistics over a parameter tree.
//!
//! Used for log output and the terminal summary: how many tensors and
//! modules a checkpoint has, how deep the nesting goes and which single
//! tensor is the largest.

use super::totals::aggregate_group;
use crate::hierarchy::{Group, Node, Tree};
use log::debug;

/// Tree statistics
///
/// **Public** - returned from calculate_tree_stats
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total parameters across all tensors
    pub total_params: u64,

    /// Number of leaf tensors
    pub tensor_count: usize,

    /// Number of grouping nodes (root excluded)
    pub group_count: usize,

    /// Longest name measured in segments
    pub max_depth: usize,

    /// Dotted name and element count of the largest tensor
    pub largest_tensor: Option<(String, u64)>,
}

/// Calculate statistics for a tree
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `tree` - Tree built by the hierarchy builder
///
/// # Returns
/// Counts collected in a single walk
pub fn calculate_tree_stats(tree: &Tree) -> TreeStats {
    let mut stats = TreeStats {
        total_params: aggregate_group(tree.root()),
        ..Default::default()
    };

    let mut path = Vec::new();
    walk(tree.root(), &mut path, &mut stats);

    debug!("Tree stats: {}", stats.summary());
    stats
}

/// Depth-first walk collecting counts
///
/// **Private** - internal helper for calculate_tree_stats
fn walk<'a>(group: &'a Group, path: &mut Vec<&'a str>, stats: &mut TreeStats) {
    for (segment, child) in group.children() {
        path.push(segment.as_str());
        stats.max_depth = stats.max_depth.max(path.len());

        match child {
            Node::Leaf(leaf) => {
                stats.tensor_count += 1;
                let is_larger = stats
                    .largest_tensor
                    .as_ref()
                    .map_or(true, |(_, count)| leaf.element_count() > *count);
                if is_larger {
                    stats.largest_tensor = Some((path.join("."), leaf.element_count()));
                }
            }
            Node::Group(inner) => {
                stats.group_count += 1;
                walk(inner, path, stats);
            }
        }

        path.pop();
    }
}

impl TreeStats {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        let largest = match &self.largest_tensor {
            Some((name, count)) => format!("{} ({})", name, count),
            None => "-".to_string(),
        };
        format!(
            "Params: {} | Tensors: {} | Modules: {} | Depth: {} | Largest: {}",
            self.total_params, self.tensor_count, self.group_count, self.max_depth, largest
        )
    }
}
