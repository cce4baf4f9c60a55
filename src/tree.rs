//! Behavior tree types: the input data model
//!
//! A behavior tree is a nested set of nodes. Each node may carry a condition
//! guarding its subtree and an action to run when reached.
//!
//! ## Example Tree
//!
//! ```json
//! {
//!   "id": "root",
//!   "condition": "Health < 30%",
//!   "children": [
//!     { "id": "flee", "action": "Move(10, 20)" },
//!     { "id": "fight", "condition": "Not Health < 30%", "action": "Attack()" }
//!   ]
//! }
//! ```
//!
//! Field names are matched case-insensitively, so `"Id"` and `"CHILDREN"`
//! work as well.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single node of the behavior tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Behavior Node", description = "Behavior tree node")]
pub struct BehaviorNode {
    /// Node identifier (e.g. "low_health")
    #[serde(default)]
    pub id: String,

    /// Raw condition guarding this subtree (e.g. "Health < 30%", "!HasRocket")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Raw action run when this node is reached (e.g. "Move(10, 20)")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Ordered child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BehaviorNode>,
}

impl BehaviorNode {
    /// Create a bare node with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder: set the condition
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Builder: set the action
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Builder: append a child
    pub fn with_child(mut self, child: BehaviorNode) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a tree from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::TreeParse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build a tree from an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(Error::MissingRoot),
            Value::Object(_) => serde_json::from_value(lowercase_keys(value))
                .map_err(|e| Error::TreeParse(e.to_string())),
            other => Err(Error::TreeParse(format!(
                "expected an object at the tree root, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Trimmed condition, `None` when absent or blank
    pub fn condition_text(&self) -> Option<&str> {
        self.condition
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Trimmed action, `None` when absent or blank
    pub fn action_text(&self) -> Option<&str> {
        self.action.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }

    /// A leaf carries a non-blank action
    pub fn is_leaf(&self) -> bool {
        self.action_text().is_some()
    }

    /// The conventional entry node is named `root`
    pub fn is_root(&self) -> bool {
        self.id.eq_ignore_ascii_case("root")
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Content hash for provenance headers
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        // Explicit nulls count as absent fields.
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
