//! Build the name hierarchy from flat (dotted name, shape) pairs.
//!
//! Example: "decoder.layers.0.bias" with shape [512] yields
//! decoder -> layers -> 0 -> bias (leaf, 512 params).

use super::node::{Group, Leaf, Node, Shape, Tree};
use crate::utils::error::HierarchyError;
use log::debug;

/// Build a tree from (name, shape) pairs
///
/// **Public** - main entry point for hierarchy building
///
/// # Arguments
/// * `pairs` - Tensor names with their shapes, in any order
///
/// # Returns
/// The reconstructed tree. Insertion order does not affect the result,
/// except that a repeated name keeps the shape seen last.
///
/// # Errors
/// * `HierarchyError::PathConflict` - a name is used both as a complete
///   tensor name and as the prefix of another name (`foo` and `foo.bar`)
pub fn build_tree<I, N>(pairs: I) -> Result<Tree, HierarchyError>
where
    I: IntoIterator<Item = (N, Shape)>,
    N: AsRef<str>,
{
    let mut tree = Tree::default();
    let mut inserted = 0usize;

    for (name, shape) in pairs {
        insert_leaf(&mut tree.root, name.as_ref(), shape)?;
        inserted += 1;
    }

    debug!(
        "Built hierarchy from {} names ({} top-level entries)",
        inserted,
        tree.root.len()
    );

    Ok(tree)
}

/// Insert one leaf, creating intermediate groups on the way
///
/// **Private** - internal helper for build_tree
fn insert_leaf(root: &mut Group, name: &str, shape: Shape) -> Result<(), HierarchyError> {
    // split always yields at least one segment ("" for an empty name)
    let mut segments: Vec<&str> = name.split('.').collect();
    let leaf_segment = segments.pop().unwrap_or_default();

    let mut current = root;
    for segment in segments {
        let entry = current
            .children
            .entry(segment.to_string())
            .or_insert_with(|| Node::Group(Group::new()));

        current = match entry {
            Node::Group(group) => group,
            Node::Leaf(_) => return Err(path_conflict(name, segment)),
        };
    }

    match current.children.get(leaf_segment).map(Node::is_leaf) {
        Some(false) => return Err(path_conflict(name, leaf_segment)),
        Some(true) => debug!("Duplicate tensor name '{}', keeping the last shape", name),
        None => {}
    }

    current
        .children
        .insert(leaf_segment.to_string(), Node::Leaf(Leaf::new(shape)));
    Ok(())
}

fn path_conflict(name: &str, segment: &str) -> HierarchyError {
    HierarchyError::PathConflict {
        name: name.to_string(),
        segment: segment.to_string(),
    }
}
