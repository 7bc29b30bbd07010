use crate::{
    derive_edges, Edge, LayoutEngine, LayoutError, LayoutStrategy, Node, NodeId, Point, Traversal,
    Tree, TreeBuilder, Vec2, ViewportFitter, ViewportTransform, DEFAULT_MAX_DEPTH,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Everything needed to compose a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub depth: i32,
    pub strategy: LayoutStrategy,
    pub h_spacing: f64,
    pub v_spacing: f64,
    pub target_width: f64,
    /// Width of the frame the layout is shown in, when set the layout fills
    /// [`DEFAULT_FILL`](crate::DEFAULT_FILL) of it instead of `target_width`
    pub frame_width: Option<f64>,
    pub max_depth: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            strategy: LayoutStrategy::default(),
            h_spacing: 1.5,
            v_spacing: 1.5,
            target_width: 12.0,
            frame_width: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SceneConfig {
    pub fn spacing(&self) -> Vec2 {
        Vec2::new(self.h_spacing, self.v_spacing)
    }

    pub fn engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.strategy, self.spacing())
    }

    /// The horizontal spacing doubles as the fitting margin
    pub fn fitter(&self) -> ViewportFitter {
        match self.frame_width {
            Some(frame_width) => ViewportFitter::for_frame(frame_width, self.h_spacing),
            None => ViewportFitter::new(self.target_width, self.h_spacing),
        }
    }

    /// Check the geometric parameters, the depth is checked when building
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidConfiguration`] for non positive or non
    /// finite spacing, target width or frame width
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.spacing().is_positive() {
            return Err(LayoutError::InvalidConfiguration(format!(
                "spacing must be positive and finite, got ({}, {})",
                self.h_spacing, self.v_spacing
            )));
        }
        if !(self.target_width.is_finite() && self.target_width > 0.0) {
            return Err(LayoutError::InvalidConfiguration(format!(
                "target width must be positive and finite, got {}",
                self.target_width
            )));
        }
        if let Some(frame_width) = self.frame_width {
            if !(frame_width.is_finite() && frame_width > 0.0) {
                return Err(LayoutError::InvalidConfiguration(format!(
                    "frame width must be positive and finite, got {frame_width}"
                )));
            }
        }
        Ok(())
    }
}

/// A laid out and fitted tree with its edges
///
/// This is the read-only surface handed to renderers: traversals, leaves,
/// positions and edges. Edges are expressed in the same fitted coordinates
/// as the positions.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    tree: Tree,
    edges: Vec<Edge>,
    transform: ViewportTransform,
}

impl Scene {
    /// Build, lay out, derive edges and fit, in that order
    ///
    /// # Errors
    /// Returns the first error of any stage, no partial scene is returned
    #[instrument(level = "debug")]
    pub fn compose(config: &SceneConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        let mut tree = TreeBuilder::new()
            .with_max_depth(config.max_depth)
            .build(config.depth)?;
        let (edges, transform) = Self::lay_out(config, &mut tree)?;

        debug!(
            "Composed {} layout with {} nodes and {} edges",
            config.strategy,
            tree.len(),
            edges.len()
        );

        Ok(Self {
            config: config.clone(),
            tree,
            edges,
            transform,
        })
    }

    fn lay_out(
        config: &SceneConfig,
        tree: &mut Tree,
    ) -> Result<(Vec<Edge>, ViewportTransform), LayoutError> {
        config.engine().apply(tree)?;
        let edges = derive_edges(tree)?;
        let transform = config.fitter().fit(tree)?;
        let edges = edges.iter().map(|edge| edge.transformed(&transform)).collect();
        Ok((edges, transform))
    }

    /// Lay the same tree out again with another strategy and spacing
    ///
    /// # Errors
    /// Returns an error if the spacing is invalid, the scene is unchanged then
    #[instrument(level = "debug", skip(self))]
    pub fn relayout(&mut self, strategy: LayoutStrategy, spacing: Vec2) -> Result<(), LayoutError> {
        let config = SceneConfig {
            strategy,
            h_spacing: spacing.x,
            v_spacing: spacing.y,
            ..self.config.clone()
        };
        config.validate()?;

        let (edges, transform) = Self::lay_out(&config, &mut self.tree)?;
        self.config = config;
        self.edges = edges;
        self.transform = transform;
        Ok(())
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Transform that mapped the raw layout into the viewport
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn positions(&self) -> HashMap<NodeId, Point> {
        self.tree.positions()
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.tree.position(id)
    }

    pub fn leaves(&self) -> Vec<&Node> {
        self.tree.leaves()
    }

    pub fn traverse_preorder(&self) -> Traversal<'_> {
        self.tree.traverse_preorder()
    }

    pub fn traverse_inorder(&self) -> Traversal<'_> {
        self.tree.traverse_inorder()
    }

    pub fn traverse_postorder(&self) -> Traversal<'_> {
        self.tree.traverse_postorder()
    }

    /// Serializable snapshot for an external renderer
    pub fn describe(&self) -> SceneDescription {
        SceneDescription {
            strategy: self.config.strategy,
            transform: self.transform,
            nodes: self
                .tree
                .nodes()
                .iter()
                .filter_map(|node| {
                    node.position().map(|position| NodeDescription {
                        id: node.id(),
                        label: node.label().to_string(),
                        level: node.level(),
                        leaf: node.is_leaf(),
                        position,
                    })
                })
                .collect(),
            edges: self.edges.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub id: NodeId,
    pub label: String,
    pub level: u32,
    pub leaf: bool,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub strategy: LayoutStrategy,
    pub transform: ViewportTransform,
    pub nodes: Vec<NodeDescription>,
    pub edges: Vec<Edge>,
}
