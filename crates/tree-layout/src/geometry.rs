use derive_more::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// 2D vector with f64 components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a zero vector
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Whether both components are finite and strictly positive
    pub fn is_positive(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x > 0.0 && self.y > 0.0
    }
}

/// 2D point with f64 coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Add, Sub, Mul)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Offset from `other` to `self`
    pub fn delta(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    /// Move the point by `t` times the given vector
    pub fn translate(self, v: Vec2, t: f64) -> Self {
        Self::new(self.x + v.x * t, self.y + v.y * t)
    }
}

/// Axis aligned bounds of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Smallest bounds enclosing all the points, `None` when there are none
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, p| {
            Some(match bounds {
                None => Bounds { min: p, max: p },
                Some(Bounds { min, max }) => Bounds {
                    min: Point::new(min.x.min(p.x), min.y.min(p.y)),
                    max: Point::new(max.x.max(p.x), max.y.max(p.y)),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Arithmetic mean of the points, `None` when there are none
pub fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
    let (sum, count) = points
        .into_iter()
        .fold((Point::origin(), 0usize), |(sum, count), p| (sum + p, count + 1));
    (count > 0).then(|| sum * (1.0 / count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn bounds_of_points() {
        let bounds = Bounds::enclosing([
            Point::new(1.0, -2.0),
            Point::new(-3.0, 0.5),
            Point::new(2.0, 1.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Point::new(-3.0, -2.0));
        assert_eq!(bounds.max, Point::new(2.0, 1.0));
        assert_eq!(bounds.width(), 5.0);
        assert_eq!(bounds.height(), 3.0);
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn centroid_of_points() {
        let c = centroid([Point::new(0.0, 0.0), Point::new(2.0, 4.0)]).unwrap();
        assert_eq!(c, Point::new(1.0, 2.0));
        assert!(centroid(std::iter::empty()).is_none());
    }
}
