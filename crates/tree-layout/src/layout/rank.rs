use super::level_y;
use crate::{LayoutPolicy, Order, Point, Tree, Vec2};
use serde::{Deserialize, Serialize};

/// Places nodes by their rank in the inorder walk
///
/// A node's x is its inorder rank, centered on the middle rank and scaled by
/// the horizontal spacing. Its level, derived from the heap index, gives y.
/// Every node gets its own column, so x strictly increases along the inorder
/// sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankLayout;

impl LayoutPolicy for RankLayout {
    fn place(&self, tree: &Tree, spacing: Vec2) -> Vec<Point> {
        let mut positions = vec![Point::origin(); tree.len()];
        let Some(root) = tree.root() else {
            return positions;
        };

        let visited = tree.traverse_from(root, Order::Inorder).count();
        let center = (visited as f64 - 1.0) / 2.0;

        for (rank, node) in tree.traverse_from(root, Order::Inorder).enumerate() {
            positions[node.id().index()] = Point::new(
                (rank as f64 - center) * spacing.x,
                level_y(node.level(), spacing),
            );
        }

        positions
    }
}
