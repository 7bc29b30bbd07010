use crate::{Point, Tree, Vec2};
use enum_dispatch::enum_dispatch;

/// A placement policy that computes positions for the nodes of a tree
///
/// Policies are pure: they read the shape of the tree and return one position
/// per node, indexed by [`crate::NodeId`]. Writing the positions back is left
/// to [`crate::LayoutEngine`], so a policy never observes positions from an
/// earlier pass.
#[enum_dispatch]
pub trait LayoutPolicy {
    /// Compute node positions for the given tree
    ///
    /// `spacing.x` is the horizontal unit and `spacing.y` the distance between
    /// two levels. Both are expected to be positive.
    fn place(&self, tree: &Tree, spacing: Vec2) -> Vec<Point>;
}
