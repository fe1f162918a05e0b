//! Geometric primitives for diagram layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Layout works in the diagram's logical space, whose center is the origin:
//!
//! ```text
//!              -Y
//!               ▲
//!               │
//!   -X ◄────(0,0)────► +X
//!               │
//!               ▼
//!              +Y
//! ```
//!
//! Angles are measured in radians from the +X axis towards +Y, matching
//! screen coordinates where Y grows downward.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use erd_layout_core::geometry::Point;
/// let a = Point::new(3.0, 0.0);
/// let b = Point::new(0.0, 4.0);
///
/// assert_eq!(a.distance(b), 5.0);
/// assert_eq!(a.sub_point(b), Point::new(3.0, -4.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point at `radius` from `center` in direction `angle` (radians).
    ///
    /// # Examples
    ///
    /// ```
    /// # use erd_layout_core::geometry::Point;
    /// let center = Point::new(10.0, 10.0);
    /// let p = Point::from_polar(center, 5.0, 0.0);
    /// assert_eq!(p, Point::new(15.0, 10.0));
    /// ```
    pub fn from_polar(center: Point, radius: f32, angle: f32) -> Self {
        Self {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Euclidean length of the vector from the origin to this point
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }
}

/// Axis-aligned bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a degenerate bounds containing exactly one point
    pub fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x,
            min_y: point.y,
            max_x: point.x,
            max_y: point.y,
        }
    }

    /// Returns the smallest bounds containing every point, or `None` for no points.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erd_layout_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(-10.0, 5.0),
    ///     Point::new(30.0, -5.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(bounds.width(), 40.0);
    /// assert_eq!(bounds.height(), 10.0);
    /// assert_eq!(bounds.center(), Point::new(10.0, 0.0));
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points
            .into_iter()
            .map(Self::from_point)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Merges two bounds into the smallest bounds containing both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `padding` on every side.
    pub fn expand(&self, padding: f32) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
        assert_eq!(p2.sub_point(p1), Point::new(-3.0, -5.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_point_from_polar_axes() {
        let center = Point::new(100.0, 50.0);

        let right = Point::from_polar(center, 10.0, 0.0);
        assert_approx_eq!(f32, right.x(), 110.0);
        assert_approx_eq!(f32, right.y(), 50.0);

        let down = Point::from_polar(center, 10.0, FRAC_PI_2);
        assert_approx_eq!(f32, down.x(), 100.0, epsilon = 0.0001);
        assert_approx_eq!(f32, down.y(), 60.0);

        let left = Point::from_polar(center, 10.0, PI);
        assert_approx_eq!(f32, left.x(), 90.0);
        assert_approx_eq!(f32, left.y(), 50.0, epsilon = 0.0001);
    }

    #[test]
    fn test_bounds_from_points_empty() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_bounds_from_single_point() {
        let bounds = Bounds::from_points([Point::new(7.0, -3.0)]).unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.0);
        assert_eq!(bounds.center(), Point::new(7.0, -3.0));
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points([
            Point::new(0.0, 0.0),
            Point::new(-50.0, 20.0),
            Point::new(30.0, -40.0),
        ])
        .unwrap();
        assert_eq!(bounds.min_x(), -50.0);
        assert_eq!(bounds.min_y(), -40.0);
        assert_eq!(bounds.max_x(), 30.0);
        assert_eq!(bounds.max_y(), 20.0);
        assert_eq!(bounds.width(), 80.0);
        assert_eq!(bounds.height(), 60.0);
    }

    #[test]
    fn test_bounds_expand() {
        let bounds = Bounds::from_point(Point::new(10.0, 10.0)).expand(5.0);
        assert_eq!(bounds.min_x(), 5.0);
        assert_eq!(bounds.max_y(), 15.0);
        assert_eq!(bounds.width(), 10.0);
        assert_eq!(bounds.center(), Point::new(10.0, 10.0));
    }
}
