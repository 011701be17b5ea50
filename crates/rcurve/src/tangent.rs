use crate::error::{ensure_positive, ApproxError, ApproxResult};
use crate::geometry::curve::sample_count;
use crate::geometry::{circle_upper_y, Circle, Curve, Line, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Settings for the tangent sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TangentSearchOptions {
    /// Distance between sampled x positions across the circle's diameter.
    pub x_step: f64,
    /// Half-width `h` of the central difference used for the slope.
    /// Very small values lose precision to cancellation.
    pub derivative_step: f64,
    /// Maximum residual for a sample to be accepted.
    pub residual_tolerance: f64,
}

impl Default for TangentSearchOptions {
    fn default() -> Self {
        Self {
            x_step: 0.001,
            derivative_step: 1e-9,
            residual_tolerance: 1e-6,
        }
    }
}

/// A tangent line of the curve accepted by the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentLine {
    pub slope: f64,
    pub intercept: f64,
    /// The sampled x the tangent was taken at.
    pub x: f64,
}

impl TangentLine {
    pub fn line(&self) -> Line {
        Line::new(self.slope, self.intercept)
    }

    /// `y = {slope}*x + {intercept}` with four decimals.
    pub fn equation(&self) -> String {
        to_equation_string(self.slope, self.intercept)
    }
}

/// Format a line as `y = {slope:.4}*x + {intercept:.4}`.
///
/// Negative intercepts keep their sign after the plus: `y = 2.5000*x + -1.2500`.
pub fn to_equation_string(slope: f64, intercept: f64) -> String {
    format!("y = {:.4}*x + {:.4}", slope, intercept)
}

/// Slope of `curve` at `x` by central difference with half-width `h`.
pub fn central_difference<C: Curve + ?Sized>(curve: &C, x: f64, h: f64) -> f64 {
    (curve.eval(x + h) - curve.eval(x - h)) / (2.0 * h)
}

/// The curve's tangent line at `x`, with the slope estimated numerically.
pub fn tangent_line_at<C: Curve + ?Sized>(curve: &C, x: f64, h: f64) -> Line {
    let slope = central_difference(curve, x, h);
    Line::through(Point::new(x, curve.eval(x)), slope)
}

/// Sweep the circle's diameter with step `x_step` and return the accepted
/// tangent lines, ordered by increasing x.
pub fn find_common_tangents<C: Curve + ?Sized>(
    circle: &Circle,
    curve: &C,
    x_step: f64,
) -> ApproxResult<Vec<TangentLine>> {
    let options = TangentSearchOptions {
        x_step,
        ..TangentSearchOptions::default()
    };
    find_common_tangents_with(circle, curve, &options)
}

/// [`find_common_tangents`] with every sweep parameter configurable.
///
/// At each sample x the curve's tangent line is built from a central
/// difference and kept when `|slope*x - circle_y + intercept|` is below the
/// residual tolerance, where `circle_y` is the upper half of the circle at x.
/// This is a heuristic filter; it does not prove tangency to the circle.
pub fn find_common_tangents_with<C: Curve + ?Sized>(
    circle: &Circle,
    curve: &C,
    options: &TangentSearchOptions,
) -> ApproxResult<Vec<TangentLine>> {
    if !(circle.radius.is_finite() && circle.radius > 0.0) {
        return Err(ApproxError::InvalidRadius(circle.radius));
    }
    ensure_positive("x_step", options.x_step)?;
    ensure_positive("derivative_step", options.derivative_step)?;
    ensure_positive("residual_tolerance", options.residual_tolerance)?;

    let x_start = circle.center.x - circle.radius;
    let x_end = circle.center.x + circle.radius;
    let samples = sample_count("x_step", x_start, x_end, options.x_step)?;

    let mut tangents = Vec::new();
    let mut skipped = 0usize;
    for i in 0..samples {
        let x = x_start + i as f64 * options.x_step;
        let Some(circle_y) = circle_upper_y(circle, x) else {
            trace!(x, "sample outside circle, skipped");
            skipped += 1;
            continue;
        };

        let tangent = tangent_line_at(curve, x, options.derivative_step);
        let residual = (tangent.slope * x - circle_y + tangent.intercept).abs();
        if residual < options.residual_tolerance {
            trace!(x, slope = tangent.slope, residual, "tangent accepted");
            tangents.push(TangentLine {
                slope: tangent.slope,
                intercept: tangent.intercept,
                x,
            });
        }
    }

    debug!(
        samples,
        skipped,
        accepted = tangents.len(),
        "tangent sweep finished"
    );
    Ok(tangents)
}
