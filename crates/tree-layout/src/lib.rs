//! Layout engines for complete binary trees
//!
//! This crate builds complete binary trees, walks them in depth-first order
//! and assigns every node a 2D position under one of a closed set of layout
//! strategies. The resulting geometry can then be fitted to a viewport width
//! and handed, together with the parent to child edges, to a renderer.
//!
//! # Layout Strategies
//!
//! - [`RankLayout`]: one column per node, in inorder
//! - [`CentroidLayout`]: evenly spaced leaves, parents over the mean of their leaves
//! - [`PartitionLayout`]: recursive bisection of the horizontal extent
//!
//! # Example
//!
//! ```
//! use tree_layout::{
//!     derive_edges, LayoutEngine, LayoutStrategy, TreeBuilder, Vec2, ViewportFitter,
//! };
//!
//! // Build a tree with 7 nodes
//! let mut tree = TreeBuilder::new().build(2).unwrap();
//!
//! // Lay it out and derive the edges
//! let strategy: LayoutStrategy = "centroid".parse().unwrap();
//! LayoutEngine::new(strategy, Vec2::new(1.0, 1.0))
//!     .apply(&mut tree)
//!     .unwrap();
//! let edges = derive_edges(&tree).unwrap();
//! assert_eq!(edges.len(), 6);
//!
//! // Fit to a 10 units wide viewport, the transform maps the edges too
//! let transform = ViewportFitter::new(10.0, 1.0).fit(&mut tree).unwrap();
//! let edges: Vec<_> = edges.iter().map(|e| e.transformed(&transform)).collect();
//!
//! // Or do all of it at once
//! let scene = tree_layout::Scene::compose(&Default::default()).unwrap();
//! for node in scene.traverse_inorder() {
//!     println!("{} at {:?}", node.label(), node.position());
//! }
//! ```

mod builder;
mod edges;
mod engine;
mod error;
pub mod geometry;
mod labels;
mod scene;
mod traversal;
mod tree;
mod viewport;

pub mod layout;

// Re-export core types and traits
pub use builder::{complete_node_count, TreeBuilder, DEFAULT_MAX_DEPTH, DEPTH_LIMIT};
pub use edges::{derive_edges, Edge};
pub use engine::LayoutPolicy;
pub use error::LayoutError;
pub use geometry::{Point, Vec2};
pub use labels::{NodeLabels, OneBased};
pub use scene::{NodeDescription, Scene, SceneConfig, SceneDescription};
pub use traversal::{Order, Traversal};
pub use tree::{heap_children, heap_level, heap_parent, Node, NodeId, Tree};
pub use viewport::{ViewportFitter, ViewportTransform, DEFAULT_FILL};

// Re-export layout types
pub use layout::{CentroidLayout, LayoutEngine, LayoutStrategy, PartitionLayout, RankLayout};
