use crate::NodeId;
use std::collections::HashMap;

/// Trait for providing node labels during tree construction
pub trait NodeLabels {
    /// Get the label of a node
    fn label(&self, node: NodeId) -> String;
}

/// Labels nodes with their one-based identity
#[derive(Debug, Clone, Copy, Default)]
pub struct OneBased;

impl NodeLabels for OneBased {
    fn label(&self, node: NodeId) -> String {
        (node.0 + 1).to_string()
    }
}

// Blanket implementation for closures
impl<F> NodeLabels for F
where
    F: Fn(NodeId) -> String,
{
    fn label(&self, node: NodeId) -> String {
        self(node)
    }
}

// Implementation for HashMap, unlisted nodes fall back to their one-based identity
impl NodeLabels for HashMap<NodeId, String> {
    fn label(&self, node: NodeId) -> String {
        self.get(&node)
            .cloned()
            .unwrap_or_else(|| OneBased.label(node))
    }
}
