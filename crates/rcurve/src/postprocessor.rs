use crate::geometry::Point;
use crate::types::GCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One straight cutting move to `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearMove {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for LinearMove {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl fmt::Display for LinearMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G01 X{:.2} Y{:.2}", self.x, self.y)
    }
}

/// Consecutive `(from, to)` pairs of a polyline.
pub fn segments(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    points.windows(2).map(|pair| (pair[0], pair[1]))
}

/// One move per segment, each ending at the later point of the pair.
pub fn emit_linear_moves(points: &[Point]) -> Vec<LinearMove> {
    segments(points).map(|(_, to)| LinearMove::from(to)).collect()
}

/// Bare `G01` lines for a polyline, nothing else.
pub fn post_process_linear(points: &[Point]) -> GCode {
    GCode {
        lines: emit_linear_moves(points)
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Grbl program for a polyline: modal header, rapid to the start, then the cut.
pub fn post_process_grbl(points: &[Point]) -> GCode {
    let mut lines = vec![
        "G90".to_string(), // Absolute positioning
        "G21".to_string(), // Millimeters
        "G17".to_string(), // XY plane
    ];

    if let Some(start) = points.first() {
        lines.push(format!("G0 X{:.2} Y{:.2}", start.x, start.y));
        lines.extend(post_process_linear(points).lines);
    }

    GCode { lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_move_display() {
        let mv = LinearMove { x: 1.234, y: -5.0 };
        assert_eq!(mv.to_string(), "G01 X1.23 Y-5.00");
    }

    #[test]
    fn test_postprocessor_structure() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ];

        let gcode = post_process_grbl(&points);

        assert_eq!(gcode.lines[0], "G90", "First command should be G90");
        assert_eq!(gcode.lines[1], "G21", "Second command should be G21");
        assert_eq!(gcode.lines[2], "G17", "Third command should be G17");
        assert_eq!(gcode.lines[3], "G0 X0.00 Y0.00", "Should rapid to start");
        assert_eq!(gcode.lines[4], "G01 X100.00 Y0.00");
        assert_eq!(gcode.lines[5], "G01 X100.00 Y100.00");
        assert_eq!(gcode.lines.len(), 6);
    }

    #[test]
    fn test_segments_pairs() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)];
        let pairs: Vec<_> = segments(&points).collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], (Point::new(1.0, 1.0), Point::new(2.0, 0.0)));
    }
}
