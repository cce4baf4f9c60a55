//! MiniYaml emission
//!
//! One tab per nesting level, `Key: Value # comment`, children in order.

use crate::document::ConfigDocumentNode;
use crate::util::single_line;

/// Render a document tree as MiniYaml text
pub fn render(root: &ConfigDocumentNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &ConfigDocumentNode, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push_str(&single_line(&node.key));
    out.push(':');
    if let Some(value) = node.value.as_deref().filter(|v| !v.is_empty()) {
        out.push(' ');
        out.push_str(&single_line(value));
    }
    if let Some(comment) = node.comment.as_deref().filter(|c| !c.is_empty()) {
        out.push_str(" # ");
        out.push_str(&single_line(comment));
    }
    out.push('\n');

    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}
