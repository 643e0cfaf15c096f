//! Plain-text tree for terminal output.

use super::format::{format_count, format_shape};
use crate::aggregator::aggregate_group;
use crate::hierarchy::{Group, Node, Tree};
use std::borrow::Cow;

/// Render the tree with box-drawing connectors
///
/// **Public** - used by the `--summary` flag
///
/// # Arguments
/// * `tree` - Tree to print
/// * `max_depth` - Deepest level to expand (top level is 1); deeper groups
///   are listed with their total but without children
pub fn render_text_tree(tree: &Tree, max_depth: Option<usize>) -> String {
    let mut lines = vec![format!(
        "total: {} params",
        format_count(tree.total_params())
    )];
    write_group(tree.root(), "", 1, max_depth, &mut lines);
    lines.join("\n")
}

/// Name with control characters escaped (`\n`, `\u{1b}`), one line per node
fn printable_name(name: &str) -> Cow<'_, str> {
    if !name.chars().any(char::is_control) {
        return Cow::Borrowed(name);
    }
    let mut escaped = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

fn write_group(
    group: &Group,
    prefix: &str,
    level: usize,
    max_depth: Option<usize>,
    lines: &mut Vec<String>,
) {
    let count = group.len();
    for (i, (name, node)) in group.children().enumerate() {
        let last = i + 1 == count;
        let name = printable_name(name);
        let connector = if last { "└── " } else { "├── " };

        match node {
            Node::Leaf(leaf) => lines.push(format!(
                "{}{}{} {} ({} params)",
                prefix,
                connector,
                name,
                format_shape(leaf.shape()),
                format_count(leaf.element_count())
            )),
            Node::Group(inner) => {
                let expand = max_depth.map_or(true, |max| level < max);
                let marker = if expand || inner.is_empty() { "" } else { " ..." };
                lines.push(format!(
                    "{}{}{}/ ({} params){}",
                    prefix,
                    connector,
                    name,
                    format_count(aggregate_group(inner)),
                    marker
                ));
                if expand {
                    let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
                    write_group(inner, &child_prefix, level + 1, max_depth, lines);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_tree;
    use pretty_assertions::assert_eq;

    fn sample_tree() -> Tree {
        build_tree(vec![
            ("layer.weight", vec![4, 3]),
            ("layer.bias", vec![4]),
            ("other", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_full_tree() {
        let expected = [
            "total: 17 params",
            "├── layer/ (16 params)",
            "│   ├── bias [4] (4 params)",
            "│   └── weight [4, 3] (12 params)",
            "└── other [] (1 params)",
        ]
        .join("\n");

        assert_eq!(render_text_tree(&sample_tree(), None), expected);
    }

    #[test]
    fn test_render_depth_limited() {
        let tree = build_tree(vec![("enc.block.w", vec![1000, 2]), ("enc.norm", vec![8])]).unwrap();
        let expected = [
            "total: 2.01K params",
            "└── enc/ (2.01K params)",
            "    ├── block/ (2.00K params) ...",
            "    └── norm [8] (8 params)",
        ]
        .join("\n");

        assert_eq!(render_text_tree(&tree, Some(2)), expected);
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let tree = build_tree(vec![("bad\nname", vec![2]), ("\u{1b}[31mred.w", vec![1])]).unwrap();
        let expected = [
            "total: 3 params",
            "├── \\u{1b}[31mred/ (1 params)",
            "│   └── w [1] (1 params)",
            "└── bad\\nname [2] (2 params)",
        ]
        .join("\n");

        assert_eq!(render_text_tree(&tree, None), expected);
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(render_text_tree(&Tree::default(), None), "total: 0 params");
    }
}
