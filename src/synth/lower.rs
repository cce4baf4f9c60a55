//! Tree lowering into update-hook statements
//!
//! Negation pairs (`X` / `Not X`) become a single `if`/`else`, both when a
//! child negates its parent's condition and when two siblings negate each
//! other.

use crate::capability::{CapabilityLookup, CapabilityRecord};
use crate::condition::are_negations;
use crate::model::{ClassDescriptor, Statement};
use crate::tree::BehaviorNode;
use crate::util::single_line;
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};

/// Mutable state threaded through one synthesis
pub(crate) struct TraitBuilder<'a> {
    pub(super) lookup: &'a dyn CapabilityLookup,
    pub(super) config: ClassDescriptor,
    pub(super) dependencies: BTreeSet<String>,
    pub(super) resolved: HashMap<String, Option<CapabilityRecord>>,
    body: Vec<Statement>,
    node_comments: bool,
}

impl<'a> TraitBuilder<'a> {
    pub(crate) fn new(
        lookup: &'a dyn CapabilityLookup,
        config: ClassDescriptor,
        node_comments: bool,
    ) -> Self {
        Self {
            lookup,
            config,
            dependencies: BTreeSet::new(),
            resolved: HashMap::new(),
            body: Vec::new(),
            node_comments,
        }
    }

    /// Hand back the configuration class, update-hook body and dependencies
    pub(crate) fn finish(self) -> (ClassDescriptor, Vec<Statement>, BTreeSet<String>) {
        (self.config, self.body, self.dependencies)
    }

    fn emit(&mut self, depth: usize, text: impl Into<String>) {
        let text = single_line(&text.into());
        self.body.push(Statement::new(depth, text));
    }

    /// Lower one node at `depth`
    ///
    /// With `skip_wrapper` the node's own condition is not emitted; the
    /// caller already placed it in the `else` of its negation.
    pub(crate) fn lower_node(&mut self, node: &BehaviorNode, depth: usize, skip_wrapper: bool) {
        self.lower_with_else(node, depth, skip_wrapper, None);
    }

    fn lower_with_else(
        &mut self,
        node: &BehaviorNode,
        depth: usize,
        skip_wrapper: bool,
        partner: Option<&BehaviorNode>,
    ) {
        debug!("lowering node '{}' at depth {}", node.id, depth);
        if self.node_comments && !node.id.is_empty() {
            self.emit(depth, format!("// node: {}", node.id));
        }

        let condition = match node.condition_text() {
            Some(condition) if !skip_wrapper => condition,
            _ => {
                self.emit_action(node, depth);
                if !node.is_leaf() {
                    let children: Vec<&BehaviorNode> = node.children.iter().collect();
                    self.lower_siblings(&children, depth);
                }
                return;
            }
        };

        let (false_branch, true_branch): (Vec<&BehaviorNode>, Vec<&BehaviorNode>) =
            if node.is_leaf() {
                (Vec::new(), Vec::new())
            } else {
                node.children.iter().partition(|child| {
                    child
                        .condition_text()
                        .is_some_and(|c| are_negations(condition, c))
                })
            };

        let expr = self.map_condition(condition);
        self.emit(depth, format!("if ({})", expr));
        self.emit(depth, "{");
        self.emit_action(node, depth + 1);
        self.lower_siblings(&true_branch, depth + 1);
        self.emit(depth, "}");

        let else_nodes: Vec<&BehaviorNode> = false_branch.into_iter().chain(partner).collect();
        if else_nodes.is_empty() {
            return;
        }
        self.emit(depth, "else");
        self.emit(depth, "{");
        for other in else_nodes {
            self.lower_node(other, depth + 1, true);
        }
        self.emit(depth, "}");
    }

    /// Lower siblings, merging each with the first later sibling it negates
    fn lower_siblings(&mut self, nodes: &[&BehaviorNode], depth: usize) {
        let mut processed = vec![false; nodes.len()];
        for i in 0..nodes.len() {
            if processed[i] {
                continue;
            }
            processed[i] = true;

            let partner = nodes[i].condition_text().and_then(|ci| {
                (i + 1..nodes.len()).find(|&j| {
                    !processed[j]
                        && nodes[j]
                            .condition_text()
                            .is_some_and(|cj| are_negations(ci, cj))
                })
            });

            match partner {
                Some(j) => {
                    processed[j] = true;
                    debug!("pairing '{}' with negation '{}'", nodes[i].id, nodes[j].id);
                    self.lower_with_else(nodes[i], depth, false, Some(nodes[j]));
                }
                None => self.lower_node(nodes[i], depth, false),
            }
        }
    }

    fn emit_action(&mut self, node: &BehaviorNode, depth: usize) {
        let Some(action) = node.action_text() else {
            return;
        };
        for line in self.map_action(action) {
            self.emit(depth, line);
        }
        if !node.children.is_empty() {
            warn!(
                "leaf '{}' has {} child node(s); they are not lowered",
                node.id,
                node.children.len()
            );
            self.emit(
                depth,
                format!(
                    "// NOTE: {} child node(s) of leaf '{}' were not lowered",
                    node.children.len(),
                    node.id
                ),
            );
        }
    }
}
