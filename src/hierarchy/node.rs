//! Tree node types for the reconstructed name hierarchy.
//!
//! A tensor name such as `encoder.layers.0.weight` becomes three nested
//! groups (`encoder`, `layers`, `0`) and one leaf (`weight`).
//! Children are kept in a `BTreeMap` so every walk visits siblings in
//! lexicographic (code point) order.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Tensor dimensions; an empty vector is a scalar
pub type Shape = Vec<usize>;

/// Number of elements stored by a tensor of the given shape
///
/// The product of an empty shape is 1 (a scalar holds one value).
/// Saturates at `u64::MAX` instead of overflowing.
pub fn element_count(shape: &[usize]) -> u64 {
    shape
        .iter()
        .fold(1u64, |acc, &dim| acc.saturating_mul(dim as u64))
}

/// A stored tensor (parameter)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    shape: Shape,
    element_count: u64,
}

impl Leaf {
    /// Create a leaf, deriving its element count from the shape
    pub fn new(shape: Shape) -> Self {
        let element_count = element_count(&shape);
        Self {
            shape,
            element_count,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn element_count(&self) -> u64 {
        self.element_count
    }
}

/// A path segment shared by one or more deeper names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub(crate) children: BTreeMap<String, Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Child by segment name
    pub fn get(&self, segment: &str) -> Option<&Node> {
        self.children.get(segment)
    }

    /// Children in lexicographic order of their segment names
    pub fn children(&self) -> btree_map::Iter<'_, String, Node> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Either a grouping node or a parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Group(Group),
    Leaf(Leaf),
}

impl Node {
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Group(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }
}

/// The whole hierarchy of one loaded file
///
/// Built once per load and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub(crate) root: Group,
}

impl Tree {
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Look up a node by its full dotted name
    pub fn find(&self, dotted_name: &str) -> Option<&Node> {
        let mut segments = dotted_name.split('.');
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            node = node.as_group()?.get(segment)?;
        }
        Some(node)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}
