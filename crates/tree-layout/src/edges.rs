use crate::{LayoutError, NodeId, Point, Tree, ViewportTransform};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// A parent to child link with the endpoint positions at derivation time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
    pub from: Point,
    pub to: Point,
}

impl Edge {
    pub fn length(&self) -> f64 {
        self.to.delta(self.from).length()
    }

    /// Pull both endpoints towards each other by `radius`, so that the edge
    /// stops at the border of round nodes of that radius
    ///
    /// Edges shorter than two radii collapse onto their midpoint.
    pub fn trimmed(&self, radius: f64) -> Edge {
        let length = self.length();
        let direction = self.to.delta(self.from);
        let t = if length > 0.0 {
            (radius / length).clamp(0.0, 0.5)
        } else {
            0.0
        };
        Edge {
            from: self.from.translate(direction, t),
            to: self.to.translate(direction, -t),
            ..*self
        }
    }

    /// The same edge with both endpoints mapped through a viewport transform
    pub fn transformed(&self, transform: &ViewportTransform) -> Edge {
        Edge {
            from: transform.apply(self.from),
            to: transform.apply(self.to),
            ..*self
        }
    }
}

/// Derive the edges of a laid out tree
///
/// Edges are ordered by parent identity, left child first. The endpoints are
/// copied, later layout or fitting passes do not change derived edges.
///
/// # Errors
/// Returns [`LayoutError::NotLaidOut`] if a node has no position
#[instrument(level = "debug", skip(tree), fields(nodes = tree.len()))]
pub fn derive_edges(tree: &Tree) -> Result<Vec<Edge>, LayoutError> {
    let position = |id: NodeId| tree.position(id).ok_or(LayoutError::NotLaidOut(id));

    let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
    for node in tree.nodes() {
        let from = position(node.id())?;
        for child in node.children() {
            edges.push(Edge {
                parent: node.id(),
                child,
                from,
                to: position(child)?,
            });
        }
    }

    trace!("Derived {} edges", edges.len());
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayoutEngine, LayoutStrategy, TreeBuilder, Vec2};
    use test_log::test;

    fn laid_out(depth: i32) -> Tree {
        let mut tree = TreeBuilder::new().build(depth).unwrap();
        LayoutEngine::default().apply(&mut tree).unwrap();
        tree
    }

    #[test]
    fn one_edge_per_child() {
        for depth in 0..=6 {
            let tree = laid_out(depth);
            let edges = derive_edges(&tree).unwrap();
            assert_eq!(edges.len(), tree.len() - 1);
        }
    }

    #[test]
    fn edge_order_and_endpoints() {
        let tree = laid_out(2);
        let edges = derive_edges(&tree).unwrap();
        let pairs: Vec<_> = edges.iter().map(|e| (e.parent.0, e.child.0)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 4), (1, 2), (1, 3), (4, 5), (4, 6)]);

        for edge in &edges {
            assert_eq!(Some(edge.from), tree.position(edge.parent));
            assert_eq!(Some(edge.to), tree.position(edge.child));
        }
    }

    #[test]
    fn edges_are_snapshots() {
        let mut tree = laid_out(2);
        let edges = derive_edges(&tree).unwrap();

        LayoutEngine::new(LayoutStrategy::default(), Vec2::new(5.0, 5.0))
            .apply(&mut tree)
            .unwrap();
        assert_ne!(Some(edges[0].to), tree.position(edges[0].child));
        assert_ne!(edges, derive_edges(&tree).unwrap());
    }

    #[test]
    fn requires_positions() {
        let tree = TreeBuilder::new().build(1).unwrap();
        assert_eq!(derive_edges(&tree), Err(LayoutError::NotLaidOut(NodeId(0))));
        assert_eq!(derive_edges(&Tree::empty()), Ok(Vec::new()));
    }

    #[test]
    fn trimming() {
        let edge = Edge {
            parent: NodeId(0),
            child: NodeId(1),
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, -4.0),
        };
        let trimmed = edge.trimmed(1.0);
        assert_eq!(trimmed.from, Point::new(0.0, -1.0));
        assert_eq!(trimmed.to, Point::new(0.0, -3.0));
        assert_eq!(trimmed.parent, edge.parent);

        let collapsed = edge.trimmed(10.0);
        assert_eq!(collapsed.from, Point::new(0.0, -2.0));
        assert_eq!(collapsed.to, Point::new(0.0, -2.0));
    }
}
