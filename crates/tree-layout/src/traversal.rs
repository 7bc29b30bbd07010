use crate::{LayoutError, Node, NodeId, Tree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order in which a depth-first walk emits nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Node, left, right
    Preorder,
    /// Left, node, right
    Inorder,
    /// Left, right, node
    Postorder,
}

impl Order {
    pub const ALL: [Order; 3] = [Order::Preorder, Order::Inorder, Order::Postorder];

    pub fn as_str(self) -> &'static str {
        match self {
            Order::Preorder => "preorder",
            Order::Inorder => "inorder",
            Order::Postorder => "postorder",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Order::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LayoutError::InvalidConfiguration(format!("unknown traversal order {s:?}")))
    }
}

enum Step {
    /// Schedule the node and its subtrees
    Expand(NodeId),
    /// Yield the node
    Emit(NodeId),
}

/// Lazy depth-first walk over a tree or one of its subtrees
///
/// Uses an explicit stack, so the walk depth is not limited by the call stack.
pub struct Traversal<'a> {
    tree: &'a Tree,
    order: Order,
    stack: Vec<Step>,
}

impl<'a> Traversal<'a> {
    fn new(tree: &'a Tree, start: Option<NodeId>, order: Order) -> Self {
        let mut stack = Vec::new();
        if let Some(start) = start.filter(|&id| tree.node(id).is_some()) {
            stack.push(Step::Expand(start));
        }
        Self { tree, order, stack }
    }

    pub fn order(&self) -> Order {
        self.order
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            let id = match step {
                Step::Emit(id) => return self.tree.node(id),
                Step::Expand(id) => id,
            };
            let Some(node) = self.tree.node(id) else {
                continue;
            };

            // Push in reverse of the emission order
            let right = node.right().map(Step::Expand);
            let left = node.left().map(Step::Expand);
            match self.order {
                Order::Preorder => {
                    self.stack.extend(right);
                    self.stack.extend(left);
                    return Some(node);
                }
                Order::Inorder => {
                    self.stack.extend(right);
                    self.stack.push(Step::Emit(id));
                    self.stack.extend(left);
                }
                Order::Postorder => {
                    self.stack.push(Step::Emit(id));
                    self.stack.extend(right);
                    self.stack.extend(left);
                }
            }
        }
        None
    }
}

impl Tree {
    /// Walk the whole tree in the given order
    pub fn traverse(&self, order: Order) -> Traversal<'_> {
        Traversal::new(self, self.root(), order)
    }

    /// Walk the subtree rooted at `start`, empty if `start` is not in the tree
    pub fn traverse_from(&self, start: NodeId, order: Order) -> Traversal<'_> {
        Traversal::new(self, Some(start), order)
    }

    pub fn traverse_preorder(&self) -> Traversal<'_> {
        self.traverse(Order::Preorder)
    }

    pub fn traverse_inorder(&self) -> Traversal<'_> {
        self.traverse(Order::Inorder)
    }

    pub fn traverse_postorder(&self) -> Traversal<'_> {
        self.traverse(Order::Postorder)
    }
}
