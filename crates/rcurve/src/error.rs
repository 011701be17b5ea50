//! Error types for the approximation routines.
//!
//! Every variant is a violated precondition. Numerical accuracy problems are
//! reported through `tracing` instead, so callers always get an answer back.

use thiserror::Error;

/// Errors raised when an approximation routine is called with invalid input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApproxError {
    /// A tolerance or step size is zero, negative or not finite.
    #[error("{name} must be a finite value greater than zero (got {value})")]
    InvalidTolerance { name: &'static str, value: f64 },

    /// The search interval has its bounds swapped.
    #[error("search interval is inverted: min {min} is greater than max {max}")]
    InvertedInterval { min: f64, max: f64 },

    /// An interval bound is NaN or infinite.
    #[error("{name} must be finite (got {value})")]
    NonFiniteBound { name: &'static str, value: f64 },

    /// The simplifier was handed no points at all.
    #[error("cannot simplify an empty polyline")]
    EmptyPolyline,

    /// Circle radius is zero, negative or not finite.
    #[error("circle radius must be a finite value greater than zero (got {0})")]
    InvalidRadius(f64),

    /// A sampling step is so small relative to its domain that the grid
    /// would exceed the sample limit.
    #[error("{name} {step:e} is too fine: the sampling grid would exceed {max} points")]
    TooManySamples {
        name: &'static str,
        step: f64,
        max: usize,
    },
}

/// Result type alias for approximation routines.
pub type ApproxResult<T> = Result<T, ApproxError>;

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> ApproxResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ApproxError::InvalidTolerance { name, value })
    }
}

/// Fails unless both bounds are finite and `min <= max`.
pub(crate) fn ensure_interval(
    min_name: &'static str,
    min: f64,
    max_name: &'static str,
    max: f64,
) -> ApproxResult<()> {
    if !min.is_finite() {
        return Err(ApproxError::NonFiniteBound {
            name: min_name,
            value: min,
        });
    }
    if !max.is_finite() {
        return Err(ApproxError::NonFiniteBound {
            name: max_name,
            value: max,
        });
    }
    if min > max {
        return Err(ApproxError::InvertedInterval { min, max });
    }
    Ok(())
}
