use crate::Point;
use derive_more::{Display, From, Into};
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of a node, unique within its tree and assigned in construction order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    From,
    Into,
    Display,
)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Level of the node stored at the given heap index (root = 0)
pub fn heap_level(index: usize) -> u32 {
    (index + 1).ilog2()
}

/// Heap index of the parent of the given heap index, `None` for the root
pub fn heap_parent(index: usize) -> Option<usize> {
    (index > 0).then(|| (index - 1) / 2)
}

/// Heap indices of the two children of the given heap index
pub fn heap_children(index: usize) -> (usize, usize) {
    (2 * index + 1, 2 * index + 2)
}

/// A node of a binary tree
///
/// The shape of the tree is fixed at construction, only the position changes
/// during the lifetime of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) label: String,
    pub(crate) heap_index: usize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) position: Option<Point>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Position in the implicit heap addressing of a complete tree
    pub fn heap_index(&self) -> usize {
        self.heap_index
    }

    /// Distance from the root
    pub fn level(&self) -> u32 {
        heap_level(self.heap_index)
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Present children, left first
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Position assigned by the last layout pass, if any
    pub fn position(&self) -> Option<Point> {
        self.position
    }
}

/// A binary tree owning all of its nodes
///
/// Nodes are stored in construction order, so a [`NodeId`] is also the index
/// of the node in [`Tree::nodes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    depth: Option<u32>,
}

impl Tree {
    /// The tree without any node
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_nodes(nodes: Vec<Node>, depth: u32) -> Self {
        Self {
            nodes,
            depth: Some(depth),
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Configured depth, `None` for the empty tree
    pub fn depth(&self) -> Option<u32> {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// All nodes in construction order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes without children, in construction order
    pub fn leaves(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.is_leaf()).collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of parent to child links
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.children().count()).sum()
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.node(id).and_then(Node::position)
    }

    /// Whether every node has a position
    pub fn is_laid_out(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|node| node.position.is_some())
    }

    /// Mapping from each positioned node to its position
    pub fn positions(&self) -> HashMap<NodeId, Point> {
        self.nodes
            .iter()
            .filter_map(|node| node.position.map(|p| (node.id, p)))
            .collect()
    }

    /// Replace all positions at once, `positions` is indexed by [`NodeId`]
    pub(crate) fn set_positions(&mut self, positions: Vec<Point>) {
        debug_assert_eq!(positions.len(), self.nodes.len());
        for (node, position) in self.nodes.iter_mut().zip(positions) {
            node.position = Some(position);
        }
    }

    pub(crate) fn map_positions(&mut self, f: impl Fn(Point) -> Point) {
        for node in &mut self.nodes {
            node.position = node.position.map(&f);
        }
    }

    /// Topology of the tree as a directed graph from parents to children
    pub fn to_graph(&self) -> DiGraphMap<NodeId, ()> {
        let mut graph = DiGraphMap::with_capacity(self.len(), self.len().saturating_sub(1));
        for node in &self.nodes {
            graph.add_node(node.id);
        }
        for node in &self.nodes {
            for child in node.children() {
                graph.add_edge(node.id, child, ());
            }
        }
        graph
    }
}
