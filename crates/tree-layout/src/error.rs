use crate::NodeId;
use thiserror::Error;

/// Errors that can occur while building, laying out or fitting a tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A depth, spacing or viewport parameter is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The layout selector does not name a known strategy
    #[error("unknown layout strategy {0:?}, expected one of rank, centroid, partition")]
    InvalidStrategy(String),

    /// There is no geometry to fit
    #[error("cannot fit an empty layout")]
    DegenerateLayout,

    /// A node has not been assigned a position yet
    #[error("node {0} has no position, run a layout pass first")]
    NotLaidOut(NodeId),
}
