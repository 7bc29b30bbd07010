use crate::geometry::{centroid, Bounds};
use crate::{LayoutError, Point, Tree};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Share of a frame that a fitted layout fills
pub const DEFAULT_FILL: f64 = 0.9;

/// Uniform scale about a center, moving the center to the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub center: Point,
    pub scale: f64,
}

impl ViewportTransform {
    pub fn identity() -> Self {
        Self {
            center: Point::origin(),
            scale: 1.0,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        (p - self.center) * self.scale
    }
}

/// Scales and recenters a layout so that it fits a target width
///
/// The scale is `target_width / (layout_width + margin)`. The margin keeps a
/// single column layout from dividing by zero and is usually the horizontal
/// spacing of the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFitter {
    pub target_width: f64,
    pub margin: f64,
}

impl ViewportFitter {
    pub fn new(target_width: f64, margin: f64) -> Self {
        Self {
            target_width,
            margin,
        }
    }

    /// Fill [`DEFAULT_FILL`] of a frame of the given width
    pub fn for_frame(frame_width: f64, margin: f64) -> Self {
        Self::new(frame_width * DEFAULT_FILL, margin)
    }

    fn check(&self) -> Result<(), LayoutError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.target_width) {
            return Err(LayoutError::InvalidConfiguration(format!(
                "target width must be positive and finite, got {}",
                self.target_width
            )));
        }
        if !positive(self.margin) {
            return Err(LayoutError::InvalidConfiguration(format!(
                "margin must be positive and finite, got {}",
                self.margin
            )));
        }
        Ok(())
    }

    /// Compute the transform fitting the given points
    ///
    /// # Errors
    /// Returns [`LayoutError::DegenerateLayout`] when there are no points
    pub fn transform_for(&self, points: &[Point]) -> Result<ViewportTransform, LayoutError> {
        self.check()?;
        let bounds = Bounds::enclosing(points.iter().copied()).ok_or(LayoutError::DegenerateLayout)?;
        let center = centroid(points.iter().copied()).ok_or(LayoutError::DegenerateLayout)?;
        Ok(ViewportTransform {
            center,
            scale: self.target_width / (bounds.width() + self.margin),
        })
    }

    /// Fit every position of the tree and return the applied transform
    ///
    /// The transform can be used to map geometry derived before fitting,
    /// such as edges.
    ///
    /// # Errors
    /// Returns [`LayoutError::DegenerateLayout`] for an empty tree and
    /// [`LayoutError::NotLaidOut`] if a node has no position.
    #[instrument(level = "debug", skip(tree), fields(nodes = tree.len()))]
    pub fn fit(&self, tree: &mut Tree) -> Result<ViewportTransform, LayoutError> {
        if tree.is_empty() {
            return Err(LayoutError::DegenerateLayout);
        }
        let points = tree
            .nodes()
            .iter()
            .map(|node| node.position().ok_or(LayoutError::NotLaidOut(node.id())))
            .collect::<Result<Vec<_>, _>>()?;

        let transform = self.transform_for(&points)?;
        debug!("Fitting with scale {} around {:?}", transform.scale, transform.center);
        tree.map_positions(|p| transform.apply(p));
        Ok(transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayoutEngine, LayoutStrategy, NodeId, TreeBuilder, Vec2};
    use test_log::test;

    const EPS: f64 = 1e-6;

    fn laid_out(depth: i32, strategy: LayoutStrategy, spacing: Vec2) -> Tree {
        let mut tree = TreeBuilder::new().build(depth).unwrap();
        LayoutEngine::new(strategy, spacing).apply(&mut tree).unwrap();
        tree
    }

    #[test]
    fn fits_width_and_centers() {
        for strategy in LayoutStrategy::ALL {
            for depth in 0..=6 {
                let spacing = Vec2::new(1.3, 0.7);
                let mut tree = laid_out(depth, strategy, spacing);
                ViewportFitter::new(12.0, spacing.x).fit(&mut tree).unwrap();

                let points: Vec<_> = tree.positions().into_values().collect();
                let bounds = Bounds::enclosing(points.iter().copied()).unwrap();
                let center = centroid(points).unwrap();
                assert!(bounds.width() <= 12.0 + EPS, "{strategy} depth {depth}");
                assert!(center.x.abs() < EPS && center.y.abs() < EPS, "{strategy} depth {depth}");
            }
        }
    }

    #[test]
    fn scale_uses_margin() {
        let mut tree = laid_out(2, LayoutStrategy::default(), Vec2::new(1.0, 1.0));
        // Rank layout of depth 2 spans [-3, 3]
        let transform = ViewportFitter::new(14.0, 1.0).fit(&mut tree).unwrap();
        assert!((transform.scale - 2.0).abs() < EPS);
        assert_eq!(transform.center.x, 0.0);
        assert!((transform.center.y + 10.0 / 7.0).abs() < EPS);
    }

    #[test]
    fn single_node_stays_at_origin() {
        for strategy in LayoutStrategy::ALL {
            let mut tree = laid_out(0, strategy, Vec2::new(1.0, 1.0));
            ViewportFitter::new(10.0, 1.0).fit(&mut tree).unwrap();
            assert_eq!(tree.position(NodeId(0)), Some(Point::origin()));
        }
    }

    #[test]
    fn degenerate_inputs() {
        let fitter = ViewportFitter::new(10.0, 1.0);
        assert_eq!(fitter.fit(&mut Tree::empty()), Err(LayoutError::DegenerateLayout));
        assert_eq!(fitter.transform_for(&[]), Err(LayoutError::DegenerateLayout));

        let mut unplaced = TreeBuilder::new().build(1).unwrap();
        assert_eq!(fitter.fit(&mut unplaced), Err(LayoutError::NotLaidOut(NodeId(0))));
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut tree = laid_out(1, LayoutStrategy::default(), Vec2::new(1.0, 1.0));
        for fitter in [
            ViewportFitter::new(0.0, 1.0),
            ViewportFitter::new(-5.0, 1.0),
            ViewportFitter::new(10.0, 0.0),
            ViewportFitter::new(f64::NAN, 1.0),
        ] {
            assert!(matches!(
                fitter.fit(&mut tree),
                Err(LayoutError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn frame_fill() {
        let fitter = ViewportFitter::for_frame(10.0, 1.0);
        assert!((fitter.target_width - 9.0).abs() < EPS);
    }
}
