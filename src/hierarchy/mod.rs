//! Reconstruction of the module hierarchy implied by dotted tensor names.
//!
//! This module handles:
//! - The tagged node types (group or parameter)
//! - Building a tree from flat (name, shape) pairs

pub mod builder;
pub mod node;

// Re-export main types and functions
pub use builder::build_tree;
pub use node::{element_count, Group, Leaf, Node, Shape, Tree};
