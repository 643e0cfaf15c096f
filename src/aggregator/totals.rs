//! Bottom-up parameter totals.
//!
//! Group totals are always derived from the leaves so they can never go
//! stale; nothing here mutates the tree.

use crate::hierarchy::{Group, Node, Tree};

/// Total number of elements under a node
///
/// **Public** - used by every renderer
///
/// A leaf returns its own element count; a group returns the sum over its
/// children. Sums saturate at `u64::MAX`.
pub fn aggregate(node: &Node) -> u64 {
    match node {
        Node::Leaf(leaf) => leaf.element_count(),
        Node::Group(group) => aggregate_group(group),
    }
}

/// Total number of elements under a group
pub fn aggregate_group(group: &Group) -> u64 {
    group
        .children()
        .map(|(_, child)| aggregate(child))
        .fold(0u64, u64::saturating_add)
}

impl Tree {
    /// Total parameter count of the whole file
    pub fn total_params(&self) -> u64 {
        aggregate_group(self.root())
    }
}
