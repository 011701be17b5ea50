use kurbo::Vec2;
use serde::{Deserialize, Serialize};

pub mod curve;

// Re-export public types
pub use curve::{sample_curve, Curve, Polynomial, MAX_SAMPLES};
pub use kurbo::{Circle, Point};

/// A straight line in slope/intercept form, `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Evaluate the line at `x`.
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// The line through `point` with the given slope.
    pub fn through(point: Point, slope: f64) -> Self {
        Self::new(slope, point.y - slope * point.x)
    }
}

impl Curve for Line {
    fn eval(&self, x: f64) -> f64 {
        self.y_at(x)
    }
}

/// Distance from `point` to the infinite line through `a` and `b`.
///
/// When `a` and `b` coincide there is no line; the distance to `a` is returned.
pub fn perpendicular_distance(point: Point, a: Point, b: Point) -> f64 {
    let chord: Vec2 = b - a;
    let length = chord.hypot();
    if length == 0.0 {
        return point.distance(a);
    }
    chord.cross(point - a).abs() / length
}

/// Upper-half y of `circle` at `x`, or `None` when `x` lies outside the circle.
pub fn circle_upper_y(circle: &Circle, x: f64) -> Option<f64> {
    let dx = x - circle.center.x;
    let radicand = circle.radius * circle.radius - dx * dx;
    if radicand >= 0.0 {
        Some(circle.center.y + radicand.sqrt())
    } else {
        // Also rejects NaN.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_eval() {
        let line = Line::new(2.0, -1.0);
        assert_eq!(line.y_at(0.0), -1.0);
        assert_eq!(line.y_at(3.0), 5.0);
        assert_eq!(line.eval(3.0), 5.0);
    }

    #[test]
    fn test_line_through_point() {
        let line = Line::through(Point::new(2.0, 3.0), 0.5);
        assert_eq!(line.intercept, 2.0);
        assert_eq!(line.y_at(2.0), 3.0);
    }

    #[test]
    fn test_perpendicular_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_relative_eq!(perpendicular_distance(Point::new(5.0, 3.0), a, b), 3.0);
        assert_relative_eq!(perpendicular_distance(Point::new(5.0, -4.0), a, b), 4.0);
        // Beyond the segment ends the line is still infinite.
        assert_relative_eq!(perpendicular_distance(Point::new(20.0, 2.0), a, b), 2.0);
    }

    #[test]
    fn test_perpendicular_distance_degenerate_chord() {
        let a = Point::new(1.0, 1.0);
        assert_relative_eq!(perpendicular_distance(Point::new(4.0, 5.0), a, a), 5.0);
    }

    #[test]
    fn test_circle_upper_y() {
        let circle = Circle::new(Point::new(0.0, 0.0), 1.0);
        assert_eq!(circle_upper_y(&circle, 0.0), Some(1.0));
        assert_eq!(circle_upper_y(&circle, 1.0), Some(0.0));
        assert_eq!(circle_upper_y(&circle, -1.0), Some(0.0));
        assert_eq!(circle_upper_y(&circle, 1.0 + 1e-12), None);
        assert_eq!(circle_upper_y(&circle, f64::NAN), None);

        let shifted = Circle::new(Point::new(2.0, 3.0), 2.0);
        assert_eq!(circle_upper_y(&shifted, 2.0), Some(5.0));
    }
}
