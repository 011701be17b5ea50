use crate::error::{ensure_interval, ensure_positive, ApproxError, ApproxResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A continuous function y = f(x) that the approximation routines can evaluate.
///
/// Any `Fn(f64) -> f64` is a curve, so closures can be passed directly.
pub trait Curve {
    /// Evaluate the curve at `x`.
    fn eval(&self, x: f64) -> f64;
}

impl<F> Curve for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A polynomial curve with coefficients in ascending powers of x.
///
/// `[1.0, -2.0, 1.0]` is `1 - 2x + x^2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    pub coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// `a*x^2 + b*x + c`.
    pub fn quadratic(a: f64, b: f64, c: f64) -> Self {
        Self::new(vec![c, b, a])
    }

    /// Highest power with a stored coefficient; an empty polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

impl Curve for Polynomial {
    fn eval(&self, x: f64) -> f64 {
        // Horner
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, coefficient| acc * x + coefficient)
    }
}

/// Sample `curve` at `x_start, x_start + step, ...` up to and including `x_end`.
///
/// Sample positions are computed from the index rather than by repeated
/// addition so the end of the domain is hit without drift.
pub fn sample_curve<C: Curve + ?Sized>(
    curve: &C,
    x_start: f64,
    x_end: f64,
    step: f64,
) -> ApproxResult<Vec<Point>> {
    ensure_positive("sampling step", step)?;
    ensure_interval("x_start", x_start, "x_end", x_end)?;

    let count = sample_count("sampling step", x_start, x_end, step)?;
    let points = (0..count)
        .map(|i| {
            let x = x_start + i as f64 * step;
            Point::new(x, curve.eval(x))
        })
        .collect();
    Ok(points)
}

/// Upper bound on the number of grid positions a single sweep may visit.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Number of grid positions `start + i*step` that fall within `[start, end]`.
///
/// Fails when the grid would hold more than [`MAX_SAMPLES`] positions.
pub(crate) fn sample_count(
    name: &'static str,
    start: f64,
    end: f64,
    step: f64,
) -> ApproxResult<usize> {
    let intervals = ((end - start) / step + 1e-9).floor();
    let too_many = || ApproxError::TooManySamples {
        name,
        step,
        max: MAX_SAMPLES,
    };
    // `as usize` saturates, so range check in f64 first.
    if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
        return Err(too_many());
    }
    (intervals as usize).checked_add(1).ok_or_else(too_many)
}
