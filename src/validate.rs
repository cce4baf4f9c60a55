//! Structural validation of behavior trees
//!
//! Detects:
//! - Nodes without an id
//! - Leaves (nodes with an action) that also have children
//! - Dead ends (no action, no children) other than the root
//! - Conditions that do not reduce to a usable subject
//!
//! Validation never fails and never stops early; every node is visited and
//! all findings are returned. Callers decide whether to synthesize anyway.

use crate::condition::parse_condition;
use crate::tree::BehaviorNode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of tree validation
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub nodes_checked: usize,
}

/// A structural finding on one node
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidationIssue {
    pub code: String,
    pub kind: IssueKind,
    pub node_id: String,
    pub message: String,
}

/// Type of structural finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum IssueKind {
    MissingId,
    AmbiguousLeaf,
    DeadEnd,
    UnusableCondition,
}

impl IssueKind {
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::MissingId => "T001",
            IssueKind::AmbiguousLeaf => "T002",
            IssueKind::DeadEnd => "T003",
            IssueKind::UnusableCondition => "T004",
        }
    }
}

impl ValidationReport {
    /// Plain diagnostic messages in traversal order
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }

    pub fn to_report(&self) -> String {
        if self.issues.is_empty() {
            return format!("✓ Tree is valid ({} nodes checked)\n", self.nodes_checked);
        }
        let mut out = format!(
            "✗ {} issue(s) in {} nodes\n",
            self.issues.len(),
            self.nodes_checked
        );
        for issue in &self.issues {
            out.push_str(&format!("  [{}] {}\n", issue.code, issue.message));
        }
        out
    }
}

/// Validate a tree, returning diagnostic messages (empty when clean)
pub fn validate(root: &BehaviorNode) -> Vec<String> {
    validate_report(root).messages()
}

/// Validate a tree, returning structured findings
pub fn validate_report(root: &BehaviorNode) -> ValidationReport {
    let mut issues = Vec::new();
    let mut nodes_checked = 0;
    visit(root, &mut issues, &mut nodes_checked);
    ValidationReport {
        is_valid: issues.is_empty(),
        issues,
        nodes_checked,
    }
}

fn visit(node: &BehaviorNode, issues: &mut Vec<ValidationIssue>, count: &mut usize) {
    *count += 1;

    if node.id.trim().is_empty() {
        push(issues, IssueKind::MissingId, node, "Node found without an ID.".into());
    }

    if node.is_leaf() && !node.children.is_empty() {
        push(
            issues,
            IssueKind::AmbiguousLeaf,
            node,
            format!(
                "Node '{}' is a Leaf (has Action) but also contains {} child(ren). This is ambiguous.",
                node.id,
                node.children.len()
            ),
        );
    }

    if !node.is_leaf() && node.children.is_empty() && !node.is_root() {
        push(
            issues,
            IssueKind::DeadEnd,
            node,
            format!(
                "Branch Node '{}' has no children and no action. It is a dead end.",
                node.id
            ),
        );
    }

    if let Some(condition) = node.condition_text() {
        if parse_condition(condition).subject.trim().is_empty() {
            push(
                issues,
                IssueKind::UnusableCondition,
                node,
                format!(
                    "Node '{}' has invalid condition syntax: '{}'",
                    node.id, condition
                ),
            );
        }
    }

    for child in &node.children {
        visit(child, issues, count);
    }
}

fn push(issues: &mut Vec<ValidationIssue>, kind: IssueKind, node: &BehaviorNode, message: String) {
    issues.push(ValidationIssue {
        code: kind.code().to_string(),
        kind,
        node_id: node.id.clone(),
        message,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(root: &BehaviorNode) -> Vec<IssueKind> {
        validate_report(root).issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_clean_tree_has_no_diagnostics() {
        let root = BehaviorNode::new("root")
            .with_condition("Health < 50%")
            .with_child(BehaviorNode::new("flee").with_action("Move(10, 20)"));
        assert!(validate(&root).is_empty());
        assert!(validate_report(&root).is_valid);
    }

    #[test]
    fn test_empty_root_is_allowed() {
        assert!(validate(&BehaviorNode::new("root")).is_empty());
    }

    #[test]
    fn test_leaf_with_children_is_ambiguous() {
        let root = BehaviorNode::new("root").with_child(
            BehaviorNode::new("attack")
                .with_action("Attack()")
                .with_child(BehaviorNode::new("after").with_action("Wait(5)")),
        );
        assert_eq!(kinds(&root), vec![IssueKind::AmbiguousLeaf]);
        assert!(validate(&root)[0].contains("'attack'"));
    }

    #[test]
    fn test_dead_end_and_missing_id_accumulate() {
        let root = BehaviorNode::new("root")
            .with_child(BehaviorNode::new("nothing").with_condition("EnemyVisible"))
            .with_child(BehaviorNode::new("").with_action("Attack()"));
        assert_eq!(kinds(&root), vec![IssueKind::DeadEnd, IssueKind::MissingId]);
        assert_eq!(validate_report(&root).nodes_checked, 3);
    }

    #[test]
    fn test_condition_without_subject() {
        let root = BehaviorNode::new("root")
            .with_child(BehaviorNode::new("odd").with_condition("!").with_action("Attack()"));
        assert_eq!(kinds(&root), vec![IssueKind::UnusableCondition]);
    }

    #[test]
    fn test_report_text_lists_codes() {
        let root = BehaviorNode::new("root").with_child(BehaviorNode::new("stub"));
        let text = validate_report(&root).to_report();
        assert!(text.contains("[T003]"));
        assert!(text.contains("'stub'"));
    }
}
