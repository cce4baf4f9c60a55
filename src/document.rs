//! Actor document model: MiniYaml as a tree of key/value nodes
//!
//! MiniYaml is the engine's tab-indented `Key: Value` format:
//!
//! ```text
//! RIFLEMAN:
//! 	Inherits: ^Soldier
//! 	Tooltip:
//! 		Name: Rifleman (AI Controlled)
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One `key: value # comment` entry with nested children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConfigDocumentNode {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConfigDocumentNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ConfigDocumentNode {
    /// A block header with no value
    pub fn block(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            children: Vec::new(),
            comment: None,
        }
    }

    /// A `key: value` entry
    pub fn entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::block(key)
        }
    }

    pub fn with_child(mut self, child: ConfigDocumentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// First direct child with the given key
    pub fn child(&self, key: &str) -> Option<&ConfigDocumentNode> {
        self.children.iter().find(|c| c.key == key)
    }
}
