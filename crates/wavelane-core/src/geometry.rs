//! Geometric primitives for timing diagram layout.
//!
//! Wavelane uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X  (time)
//!     │
//!     │
//!     ▼
//!    +Y  (lane rows)
//! ```
//!
//! Coordinates are `f64` so that computed positions print exactly like the
//! reference renderer, which works in double precision throughout.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use wavelane_core::geometry::Point;
/// let from = Point::new(10.0, 20.0);
/// let to = Point::new(30.0, 60.0);
///
/// let delta = to.sub_point(from);
/// assert_eq!(delta.x(), 20.0);
/// assert_eq!(delta.y(), 40.0);
///
/// let mid = from.midpoint(to);
/// assert_eq!(mid.x(), 20.0);
/// assert_eq!(mid.y(), 40.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Returns the x-coordinate a fraction `t` of the way towards `other`.
    ///
    /// ```
    /// # use wavelane_core::geometry::Point;
    /// let from = Point::new(0.0, 0.0);
    /// let to = Point::new(100.0, 0.0);
    /// assert_eq!(from.lerp_x(to, 0.25), 25.0);
    /// ```
    pub fn lerp_x(self, other: Point, t: f64) -> f64 {
        self.x + (other.x - self.x) * t
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::{approx_eq, assert_approx_eq};
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_with_x() {
        let p = Point::new(1.0, 2.0).with_x(7.0);
        assert_approx_eq!(f64, p.x(), 7.0);
        assert_approx_eq!(f64, p.y(), 2.0);
    }

    #[test]
    fn test_lerp_x_endpoints() {
        let a = Point::new(10.0, 5.0);
        let b = Point::new(50.0, 35.0);
        assert_approx_eq!(f64, a.lerp_x(b, 0.0), 10.0);
        assert_approx_eq!(f64, a.lerp_x(b, 1.0), 50.0);
        assert_approx_eq!(f64, a.lerp_x(b, 0.75), 40.0);
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn add_sub_inverse(p1 in point_strategy(), p2 in point_strategy()) {
            let back = p1.add_point(p2).sub_point(p2);
            prop_assert!(approx_eq!(f64, back.x(), p1.x(), epsilon = 1e-9));
            prop_assert!(approx_eq!(f64, back.y(), p1.y(), epsilon = 1e-9));
        }

        #[test]
        fn midpoint_matches_half_lerp(p1 in point_strategy(), p2 in point_strategy()) {
            let mid = p1.midpoint(p2);
            prop_assert!(approx_eq!(f64, mid.x(), p1.lerp_x(p2, 0.5), epsilon = 1e-9));
        }
    }
}
