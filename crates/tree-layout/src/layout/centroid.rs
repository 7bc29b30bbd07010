use super::level_y;
use crate::{LayoutPolicy, Point, Tree, Vec2};
use serde::{Deserialize, Serialize};

/// Places leaves on evenly bisected intervals and parents over their leaves
///
/// The root owns an interval `leaf_count * spacing.x` wide centered on zero,
/// and every child owns one half of its parent's interval. A leaf sits at the
/// midpoint of its interval, an internal node at the mean x of all the leaves
/// below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CentroidLayout;

impl LayoutPolicy for CentroidLayout {
    fn place(&self, tree: &Tree, spacing: Vec2) -> Vec<Point> {
        let mut xs = vec![0.0; tree.len()];
        let Some(root) = tree.root() else {
            return Vec::new();
        };

        // Top-down: hand out intervals and settle the leaves
        let half_width = spacing.x * tree.leaf_count() as f64 / 2.0;
        let mut stack = vec![(root, -half_width, half_width)];
        while let Some((id, lo, hi)) = stack.pop() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            let mid = (lo + hi) / 2.0;
            if node.is_leaf() {
                xs[id.index()] = mid;
            }
            stack.extend(node.left().map(|left| (left, lo, mid)));
            stack.extend(node.right().map(|right| (right, mid, hi)));
        }

        // Bottom-up: average the leaves below each internal node
        let mut leaf_sums = vec![(0.0, 0usize); tree.len()];
        for node in tree.traverse_postorder() {
            let index = node.id().index();
            leaf_sums[index] = if node.is_leaf() {
                (xs[index], 1)
            } else {
                node.children()
                    .map(|child| leaf_sums[child.index()])
                    .fold((0.0, 0), |(sum, count), (s, c)| (sum + s, count + c))
            };
            let (sum, count) = leaf_sums[index];
            xs[index] = sum / count as f64;
        }

        tree.nodes()
            .iter()
            .map(|node| Point::new(xs[node.id().index()], level_y(node.level(), spacing)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, NodeId, TreeBuilder};
    use test_log::test;

    fn leaves_below<'a>(tree: &'a Tree, node: &Node) -> Vec<&'a Node> {
        tree.traverse_from(node.id(), crate::Order::Preorder)
            .filter(|n| n.is_leaf())
            .collect()
    }

    #[test]
    fn depth_two_unit_spacing() {
        let tree = TreeBuilder::new().build(2).unwrap();
        let positions = CentroidLayout.place(&tree, Vec2::new(1.0, 1.0));

        let leaf_xs: Vec<_> = tree.leaves().iter().map(|n| positions[n.id().index()].x).collect();
        assert_eq!(leaf_xs, vec![-1.5, -0.5, 0.5, 1.5]);
        assert_eq!(positions[1], Point::new(-1.0, -1.0));
        assert_eq!(positions[4], Point::new(1.0, -1.0));
        assert_eq!(positions[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn leaves_are_evenly_spaced() {
        let tree = TreeBuilder::new().build(5).unwrap();
        let positions = CentroidLayout.place(&tree, Vec2::new(0.8, 1.0));
        let xs: Vec<_> = tree.leaves().iter().map(|n| positions[n.id().index()].x).collect();
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - 0.8).abs() < 1e-9, "{xs:?}");
        }
    }

    #[test]
    fn internal_nodes_sit_over_their_leaves() {
        for depth in 0..=6 {
            let tree = TreeBuilder::new().build(depth).unwrap();
            let positions = CentroidLayout.place(&tree, Vec2::new(1.0, 1.0));
            for node in tree.nodes().iter().filter(|n| !n.is_leaf()) {
                let leaf_xs: Vec<_> = leaves_below(&tree, node)
                    .iter()
                    .map(|leaf| positions[leaf.id().index()].x)
                    .collect();
                let min = leaf_xs.iter().copied().fold(f64::INFINITY, f64::min);
                let max = leaf_xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let x = positions[node.id().index()].x;
                assert!(min <= x && x <= max, "node {} at depth {depth}", node.id());

                let mean = leaf_xs.iter().sum::<f64>() / leaf_xs.len() as f64;
                assert!((x - mean).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn single_node() {
        let tree = TreeBuilder::new().build(0).unwrap();
        let positions = CentroidLayout.place(&tree, Vec2::new(2.0, 2.0));
        assert_eq!(positions, vec![Point::origin()]);
        assert_eq!(tree.node(NodeId(0)).map(|n| n.is_leaf()), Some(true));
    }
}
