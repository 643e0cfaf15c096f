//! JSON report schema for parameter trees.
//!
//! The report is a serializable snapshot of the tree with every group's
//! total written out, so other tools can consume it without rebuilding the
//! hierarchy. Schema is versioned to allow future evolution.

use crate::aggregator::{aggregate, calculate_tree_stats};
use crate::hierarchy::{element_count, Group, Node, Tree};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::ReportError;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// File the tree was built from
    pub source: String,

    /// Total parameters across all tensors
    pub total_params: u64,

    /// Number of tensors
    pub tensor_count: usize,

    /// Top-level nodes in lexicographic order
    pub root: Vec<NodeReport>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Node type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Group,
    Parameter,
}

/// One node of the report tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeReport {
    pub name: String,
    pub kind: NodeKind,

    /// Element count for parameters, aggregate for groups
    pub params: u64,

    /// Only present on parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<usize>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeReport>,
}

/// Convert a tree to a report
///
/// **Public** - main entry point for JSON export
pub fn build_report(tree: &Tree, source: impl Into<String>) -> TreeReport {
    let stats = calculate_tree_stats(tree);

    TreeReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.into(),
        total_params: stats.total_params,
        tensor_count: stats.tensor_count,
        root: group_reports(tree.root()),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn group_reports(group: &Group) -> Vec<NodeReport> {
    group
        .children()
        .map(|(name, node)| node_report(name, node))
        .collect()
}

fn node_report(name: &str, node: &Node) -> NodeReport {
    match node {
        Node::Leaf(leaf) => NodeReport {
            name: name.to_string(),
            kind: NodeKind::Parameter,
            params: leaf.element_count(),
            shape: Some(leaf.shape().to_vec()),
            children: Vec::new(),
        },
        Node::Group(group) => NodeReport {
            name: name.to_string(),
            kind: NodeKind::Group,
            params: aggregate(node),
            shape: None,
            children: group_reports(group),
        },
    }
}

/// Check a report for internal consistency
///
/// **Public** - used by the `validate` command
///
/// # Errors
/// * `ReportError::UnsupportedVersion` - schema version differs
/// * `ReportError::MalformedNode` - parameter without shape, group with shape
///   or parameter with children
/// * `ReportError::CountMismatch` - a recorded count disagrees with the
///   counts below it
pub fn validate_report(report: &TreeReport) -> Result<(), ReportError> {
    if report.version != SCHEMA_VERSION {
        return Err(ReportError::UnsupportedVersion(report.version.clone()));
    }

    let mut total = 0u64;
    let mut tensors = 0usize;
    for node in &report.root {
        let (params, count) = validate_node(node, &node.name)?;
        total = total.saturating_add(params);
        tensors += count;
    }

    check_count("<total>", report.total_params, total)?;
    check_count("<tensors>", report.tensor_count as u64, tensors as u64)?;
    Ok(())
}

/// Returns (params, tensor count) for a verified node
fn validate_node(node: &NodeReport, path: &str) -> Result<(u64, usize), ReportError> {
    match node.kind {
        NodeKind::Parameter => {
            let shape = match (&node.shape, node.children.is_empty()) {
                (Some(shape), true) => shape,
                _ => return Err(ReportError::MalformedNode(path.to_string())),
            };
            check_count(path, node.params, element_count(shape))?;
            Ok((node.params, 1))
        }
        NodeKind::Group => {
            if node.shape.is_some() {
                return Err(ReportError::MalformedNode(path.to_string()));
            }
            let mut total = 0u64;
            let mut tensors = 0usize;
            for child in &node.children {
                let child_path = format!("{}.{}", path, child.name);
                let (params, count) = validate_node(child, &child_path)?;
                total = total.saturating_add(params);
                tensors += count;
            }
            check_count(path, node.params, total)?;
            Ok((node.params, tensors))
        }
    }
}

fn check_count(path: &str, recorded: u64, computed: u64) -> Result<(), ReportError> {
    if recorded == computed {
        Ok(())
    } else {
        Err(ReportError::CountMismatch {
            path: path.to_string(),
            recorded,
            computed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_tree;

    fn sample_report() -> TreeReport {
        let tree = build_tree(vec![
            ("layer.weight", vec![4, 3]),
            ("layer.bias", vec![4]),
            ("other", vec![]),
        ])
        .unwrap();
        build_report(&tree, "model.safetensors")
    }

    #[test]
    fn test_build_report() {
        let report = sample_report();

        assert_eq!(report.version, SCHEMA_VERSION);
        assert_eq!(report.total_params, 17);
        assert_eq!(report.tensor_count, 3);
        assert_eq!(report.root.len(), 2);

        let layer = &report.root[0];
        assert_eq!(layer.name, "layer");
        assert_eq!(layer.kind, NodeKind::Group);
        assert_eq!(layer.params, 16);
        assert_eq!(layer.children[0].name, "bias");
        assert_eq!(layer.children[1].shape, Some(vec![4, 3]));
    }

    #[test]
    fn test_validate_report_ok() {
        assert_eq!(validate_report(&sample_report()), Ok(()));
    }

    #[test]
    fn test_validate_report_detects_tampered_group() {
        let mut report = sample_report();
        report.root[0].params = 99;

        assert_eq!(
            validate_report(&report),
            Err(ReportError::CountMismatch {
                path: "layer".to_string(),
                recorded: 99,
                computed: 16,
            })
        );
    }

    #[test]
    fn test_validate_report_detects_tampered_leaf() {
        let mut report = sample_report();
        report.root[0].children[1].params = 13;

        assert!(matches!(
            validate_report(&report),
            Err(ReportError::CountMismatch { ref path, .. }) if path == "layer.weight"
        ));
    }

    #[test]
    fn test_validate_report_wrong_version() {
        let mut report = sample_report();
        report.version = "0.1.0".to_string();
        assert!(matches!(
            validate_report(&report),
            Err(ReportError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_validate_report_parameter_without_shape() {
        let mut report = sample_report();
        report.root[1].shape = None;
        assert_eq!(
            validate_report(&report),
            Err(ReportError::MalformedNode("other".to_string()))
        );
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["root"][0]["kind"], "group");
        assert_eq!(json["root"][1]["kind"], "parameter");
        assert!(json["root"][0].get("shape").is_none());
        assert_eq!(json["root"][1]["shape"], serde_json::json!([]));
    }
}
