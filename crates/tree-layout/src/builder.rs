use crate::tree::heap_children;
use crate::{LayoutError, Node, NodeId, NodeLabels, OneBased, Tree};
use tracing::{debug, instrument};

/// Deepest tree built unless configured otherwise
pub const DEFAULT_MAX_DEPTH: u32 = 20;

/// Deepest tree built whatever the configured maximum
pub const DEPTH_LIMIT: u32 = 24;

/// Node count of a complete binary tree of the given depth
pub fn complete_node_count(depth: u32) -> usize {
    (1usize << (depth + 1)) - 1
}

/// Builds complete binary trees
///
/// Identities are assigned in preorder: a node gets its identity before
/// either of its subtrees is built. Every call to [`TreeBuilder::build`]
/// numbers its nodes from zero, so two builds with the same configuration
/// produce identical trees.
#[derive(Clone)]
pub struct TreeBuilder<L = OneBased> {
    max_depth: u32,
    labels: L,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            labels: OneBased,
        }
    }
}

impl<L: NodeLabels> TreeBuilder<L> {
    /// Set the deepest tree this builder accepts, [`DEPTH_LIMIT`] still applies
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the labelling rule
    pub fn with_labels<M: NodeLabels>(self, labels: M) -> TreeBuilder<M> {
        TreeBuilder {
            max_depth: self.max_depth,
            labels,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Build a complete binary tree of the given depth
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidConfiguration`] if the depth is negative
    /// or deeper than the configured maximum or [`DEPTH_LIMIT`], or if the
    /// nodes cannot be allocated.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, depth: i32) -> Result<Tree, LayoutError> {
        let depth = u32::try_from(depth).map_err(|_| {
            LayoutError::InvalidConfiguration(format!("depth must not be negative, got {depth}"))
        })?;
        if depth > self.max_depth {
            return Err(LayoutError::InvalidConfiguration(format!(
                "depth {depth} exceeds the maximum of {}",
                self.max_depth
            )));
        }
        if depth > DEPTH_LIMIT {
            return Err(LayoutError::InvalidConfiguration(format!(
                "depth {depth} exceeds the hard limit of {DEPTH_LIMIT}"
            )));
        }

        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(complete_node_count(depth))
            .map_err(|err| {
                LayoutError::InvalidConfiguration(format!(
                    "cannot allocate a tree of depth {depth}: {err}"
                ))
            })?;

        let mut context = BuildContext {
            labels: &self.labels,
            depth,
            nodes,
        };
        context.build(0, 0);

        debug!("Built tree of depth {depth} with {} nodes", context.nodes.len());
        Ok(Tree::from_nodes(context.nodes, depth))
    }
}

/// State of a single build, the identity counter is the node count so far
struct BuildContext<'a, L> {
    labels: &'a L,
    depth: u32,
    nodes: Vec<Node>,
}

impl<L: NodeLabels> BuildContext<'_, L> {
    // Recursion is bounded by the builder's maximum depth
    fn build(&mut self, heap_index: usize, level: u32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            label: self.labels.label(id),
            heap_index,
            left: None,
            right: None,
            position: None,
        });

        if level < self.depth {
            let (left_index, right_index) = heap_children(heap_index);
            let left = self.build(left_index, level + 1);
            let right = self.build(right_index, level + 1);
            let node = &mut self.nodes[id.0];
            node.left = Some(left);
            node.right = Some(right);
        }

        id
    }
}
