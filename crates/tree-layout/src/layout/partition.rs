use super::level_y;
use crate::{LayoutPolicy, Point, Tree, Vec2};
use serde::{Deserialize, Serialize};

/// Recursive binary space partition
///
/// The root owns `[0, spacing.x * (leaf_count - 1)]`. Each node sits at the
/// midpoint of its interval, which is then split at that midpoint between
/// the left and the right child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionLayout;

impl LayoutPolicy for PartitionLayout {
    fn place(&self, tree: &Tree, spacing: Vec2) -> Vec<Point> {
        let mut positions = vec![Point::origin(); tree.len()];
        let Some(root) = tree.root() else {
            return positions;
        };

        let width = spacing.x * tree.leaf_count().saturating_sub(1) as f64;
        let mut stack = vec![(root, 0.0, width)];
        while let Some((id, lo, hi)) = stack.pop() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            let mid = (lo + hi) / 2.0;
            positions[id.index()] = Point::new(mid, level_y(node.level(), spacing));
            stack.extend(node.left().map(|left| (left, lo, mid)));
            stack.extend(node.right().map(|right| (right, mid, hi)));
        }

        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Order, TreeBuilder};
    use test_log::test;

    #[test]
    fn depth_two_unit_spacing() {
        let tree = TreeBuilder::new().build(2).unwrap();
        let positions = PartitionLayout.place(&tree, Vec2::new(1.0, 1.0));
        let inorder: Vec<_> = tree
            .traverse_inorder()
            .map(|n| positions[n.id().index()])
            .collect();
        assert_eq!(
            inorder,
            vec![
                Point::new(0.375, -2.0),
                Point::new(0.75, -1.0),
                Point::new(1.125, -2.0),
                Point::new(1.5, 0.0),
                Point::new(1.875, -2.0),
                Point::new(2.25, -1.0),
                Point::new(2.625, -2.0),
            ]
        );
    }

    #[test]
    fn parents_sit_between_their_subtrees() {
        let tree = TreeBuilder::new().build(5).unwrap();
        let positions = PartitionLayout.place(&tree, Vec2::new(1.0, 1.0));
        for node in tree.nodes().iter().filter(|n| !n.is_leaf()) {
            let x = positions[node.id().index()].x;
            let subtree_xs = |child| {
                tree.traverse_from(child, Order::Preorder)
                    .map(|n| positions[n.id().index()].x)
                    .collect::<Vec<_>>()
            };
            let left = subtree_xs(node.left().unwrap());
            let right = subtree_xs(node.right().unwrap());
            assert!(left.iter().all(|&lx| lx < x));
            assert!(right.iter().all(|&rx| rx > x));
        }
    }

    #[test]
    fn rows_are_ordered_left_to_right() {
        let tree = TreeBuilder::new().build(4).unwrap();
        let positions = PartitionLayout.place(&tree, Vec2::new(1.0, 1.0));
        for level in 0..=4 {
            // Preorder visits each level from left to right
            let xs: Vec<_> = tree
                .traverse_preorder()
                .filter(|n| n.level() == level)
                .map(|n| positions[n.id().index()].x)
                .collect();
            assert!(xs.windows(2).all(|w| w[0] <= w[1]), "level {level}: {xs:?}");
        }
    }
}
