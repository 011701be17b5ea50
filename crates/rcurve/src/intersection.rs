use crate::error::{ensure_interval, ensure_positive, ApproxResult};
use crate::geometry::{Curve, Line, Point};
use tracing::{debug, warn};

/// Find the point where `curve` meets `line` inside `[x_min, x_max]`.
///
/// Bisection on `curve(x) - line(x)`, which is assumed to fall from positive to
/// negative across the interval. Stops once the difference at the midpoint is
/// within `epsilon` or the interval is narrower than `epsilon`. The returned
/// point lies on the curve.
///
/// If the difference is not decreasing through zero the search still ends and
/// returns an x near one of the bounds; a warning is logged in that case.
pub fn find_intersection<C: Curve + ?Sized>(
    curve: &C,
    line: &Line,
    x_min: f64,
    x_max: f64,
    epsilon: f64,
) -> ApproxResult<Point> {
    let x = find_intersection_x(curve, line, x_min, x_max, epsilon)?;
    Ok(Point::new(x, curve.eval(x)))
}

/// The x coordinate of [`find_intersection`].
pub fn find_intersection_x<C: Curve + ?Sized>(
    curve: &C,
    line: &Line,
    x_min: f64,
    x_max: f64,
    epsilon: f64,
) -> ApproxResult<f64> {
    ensure_positive("epsilon", epsilon)?;
    ensure_interval("x_min", x_min, "x_max", x_max)?;

    let difference = |x: f64| curve.eval(x) - line.y_at(x);
    warn_if_not_bracketed(difference(x_min), difference(x_max), x_min, x_max, epsilon);

    let (mut lo, mut hi) = (x_min, x_max);
    let mut iterations = 0usize;
    loop {
        let mid = (lo + hi) / 2.0;
        let diff = difference(mid);
        if diff.abs() <= epsilon || hi - lo <= epsilon {
            debug!(x = mid, diff, iterations, "bisection converged");
            return Ok(mid);
        }
        if diff > 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
        iterations += 1;
    }
}

fn warn_if_not_bracketed(at_min: f64, at_max: f64, x_min: f64, x_max: f64, epsilon: f64) {
    if !(at_min >= -epsilon && at_max <= epsilon) {
        warn!(
            x_min,
            x_max,
            at_min,
            at_max,
            "curve - line does not fall through zero on the interval; intersection is unreliable"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApproxError;
    use approx::assert_abs_diff_eq;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Shared buffer that a fmt subscriber writes formatted events into.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Run `f` with warnings captured, returning its result and the log text.
    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    fn parabola(x: f64) -> f64 {
        x * x - 2.0 * x + 1.0
    }

    #[test]
    fn test_finds_decreasing_root() {
        let line = Line::new(2.0, -1.0);
        let point = find_intersection(&parabola, &line, 0.0, 2.0, 1e-6).unwrap();

        let expected = 2.0 - 2f64.sqrt();
        assert_abs_diff_eq!(point.x, expected, epsilon = 1e-6);
        assert!((parabola(point.x) - line.y_at(point.x)).abs() <= 1e-6);
        assert_eq!(point.y, parabola(point.x));
    }

    #[test]
    fn test_linear_curve_exact_midpoint() {
        // y = -x crosses y = 0 at the midpoint of a symmetric interval.
        let curve = |x: f64| -x;
        let x = find_intersection_x(&curve, &Line::new(0.0, 0.0), -4.0, 4.0, 1e-9).unwrap();
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_degenerate_interval_returns_bound() {
        let line = Line::new(2.0, -1.0);
        let x = find_intersection_x(&parabola, &line, 1.5, 1.5, 1e-6).unwrap();
        assert_eq!(x, 1.5);
    }

    #[test]
    fn test_rejects_invalid_epsilon() {
        let line = Line::new(2.0, -1.0);
        let err = find_intersection(&parabola, &line, 0.0, 2.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            ApproxError::InvalidTolerance {
                name: "epsilon",
                value: 0.0
            }
        );
        assert!(find_intersection(&parabola, &line, 0.0, 2.0, -1e-3).is_err());
        assert!(find_intersection(&parabola, &line, 0.0, 2.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_inverted_interval() {
        let line = Line::new(2.0, -1.0);
        let err = find_intersection(&parabola, &line, 10.0, -10.0, 1e-6).unwrap_err();
        assert_eq!(
            err,
            ApproxError::InvertedInterval {
                min: 10.0,
                max: -10.0
            }
        );
    }

    #[test]
    fn test_warns_when_not_bracketed() {
        // x^2 - 4x + 2 is positive at both ends of [-10, 10].
        let line = Line::new(2.0, -1.0);
        let (result, logs) =
            capture_warnings(|| find_intersection_x(&parabola, &line, -10.0, 10.0, 1e-6));

        let x = result.unwrap();
        assert_abs_diff_eq!(x, -10.0, epsilon = 1e-5);
        assert!(logs.contains("WARN"), "missing warning level: {logs}");
        assert!(
            logs.contains("does not fall through zero"),
            "missing warning: {logs}"
        );
        assert!(logs.contains("x_min=-10"), "missing bounds: {logs}");
    }

    #[test]
    fn test_no_warning_when_bracketed() {
        let line = Line::new(2.0, -1.0);
        let (result, logs) =
            capture_warnings(|| find_intersection_x(&parabola, &line, 0.0, 2.0, 1e-6));

        assert!(result.is_ok());
        assert!(logs.is_empty(), "unexpected log output: {logs}");
    }
}
