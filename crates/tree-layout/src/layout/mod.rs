mod centroid;
mod partition;
mod rank;

use crate::{LayoutError, LayoutPolicy, NodeId, Point, Tree, Vec2};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

pub use centroid::CentroidLayout;
pub use partition::PartitionLayout;
pub use rank::RankLayout;

/// The closed set of layout strategies, selected by name
#[enum_dispatch(LayoutPolicy)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LayoutStrategy {
    Rank(RankLayout),
    Centroid(CentroidLayout),
    Partition(PartitionLayout),
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 3] = [
        LayoutStrategy::Rank(RankLayout),
        LayoutStrategy::Centroid(CentroidLayout),
        LayoutStrategy::Partition(PartitionLayout),
    ];

    /// Selector used in configuration
    pub fn name(self) -> &'static str {
        match self {
            LayoutStrategy::Rank(_) => "rank",
            LayoutStrategy::Centroid(_) => "centroid",
            LayoutStrategy::Partition(_) => "partition",
        }
    }
}

impl Default for LayoutStrategy {
    fn default() -> Self {
        LayoutStrategy::Rank(RankLayout)
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutStrategy {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LayoutError::InvalidStrategy(s.to_string()))
    }
}

impl TryFrom<String> for LayoutStrategy {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LayoutStrategy> for String {
    fn from(strategy: LayoutStrategy) -> Self {
        strategy.name().to_string()
    }
}

/// Vertical coordinate of a level, the root sits at zero and levels grow downwards
pub(crate) fn level_y(level: u32, spacing: Vec2) -> f64 {
    0.0 - f64::from(level) * spacing.y
}

/// Assigns positions to every node of a tree with the selected strategy
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    pub strategy: LayoutStrategy,

    /// Horizontal unit (`x`) and distance between levels (`y`)
    pub spacing: Vec2,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::default(),
            spacing: Vec2::new(1.0, 1.0),
        }
    }
}

impl LayoutEngine {
    pub fn new(strategy: LayoutStrategy, spacing: Vec2) -> Self {
        Self { strategy, spacing }
    }

    fn check_spacing(&self) -> Result<(), LayoutError> {
        if self.spacing.is_positive() {
            Ok(())
        } else {
            Err(LayoutError::InvalidConfiguration(format!(
                "spacing must be positive and finite, got ({}, {})",
                self.spacing.x, self.spacing.y
            )))
        }
    }

    /// Compute positions without touching the tree
    ///
    /// # Errors
    /// Returns an error if the spacing is not positive
    pub fn compute_positions(&self, tree: &Tree) -> Result<HashMap<NodeId, Point>, LayoutError> {
        self.check_spacing()?;
        Ok(self
            .strategy
            .place(tree, self.spacing)
            .into_iter()
            .enumerate()
            .map(|(index, p)| (NodeId(index), p))
            .collect())
    }

    /// Run a layout pass, overwriting every position of the tree
    ///
    /// All positions are computed before any is written, a failing pass
    /// leaves the tree as it was.
    ///
    /// # Errors
    /// Returns an error if the spacing is not positive
    #[instrument(level = "debug", skip(self, tree), fields(strategy = %self.strategy, nodes = tree.len()))]
    pub fn apply(&self, tree: &mut Tree) -> Result<(), LayoutError> {
        self.check_spacing()?;
        let positions = self.strategy.place(tree, self.spacing);
        debug!("Placed {} nodes", positions.len());
        tree.set_positions(positions);
        Ok(())
    }
}
