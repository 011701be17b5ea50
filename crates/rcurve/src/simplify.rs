//! Douglas-Peucker polyline reduction.
//!
//! The input is split at the point that deviates most from the chord between
//! the current first and last points, until every remaining chord is within
//! tolerance. Output points are always taken from the input.

use crate::error::{ensure_positive, ApproxError, ApproxResult};
use crate::geometry::{perpendicular_distance, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the deviation of an interior point from the chord is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviationMetric {
    /// Perpendicular distance from the point to the line through the chord.
    #[default]
    Perpendicular,
    /// Length of the chord itself, for every interior point. The first
    /// interior point therefore always wins and a chord is only collapsed once
    /// it is shorter than epsilon. Kept to reproduce legacy output.
    ChordLength,
}

/// Settings for [`simplify_polyline_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplifyOptions {
    pub epsilon: f64,
    #[serde(default)]
    pub metric: DeviationMetric,
}

impl SimplifyOptions {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            metric: DeviationMetric::default(),
        }
    }

    pub fn with_metric(mut self, metric: DeviationMetric) -> Self {
        self.metric = metric;
        self
    }
}

/// Reduce `points` to a polyline within `epsilon`, keeping both endpoints.
pub fn simplify_polyline(points: &[Point], epsilon: f64) -> ApproxResult<Vec<Point>> {
    simplify_polyline_with(points, &SimplifyOptions::new(epsilon))
}

/// [`simplify_polyline`] with a selectable deviation metric.
pub fn simplify_polyline_with(
    points: &[Point],
    options: &SimplifyOptions,
) -> ApproxResult<Vec<Point>> {
    if points.is_empty() {
        return Err(ApproxError::EmptyPolyline);
    }
    ensure_positive("epsilon", options.epsilon)?;

    if points.len() < 3 {
        return Ok(points.to_vec());
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    // Explicit stack of (first, last) index ranges still to be examined.
    let mut pending = vec![(0, last)];
    while let Some((first, end)) = pending.pop() {
        if end - first < 2 {
            continue;
        }
        let (index, deviation) = max_deviation(points, first, end, options.metric);
        if deviation > options.epsilon {
            keep[index] = true;
            pending.push((index, end));
            pending.push((first, index));
        }
    }

    let simplified: Vec<Point> = points
        .iter()
        .zip(&keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect();

    debug!(
        input = points.len(),
        output = simplified.len(),
        epsilon = options.epsilon,
        metric = ?options.metric,
        "polyline simplified"
    );
    Ok(simplified)
}

/// Interior index of `points[first..=end]` with the largest deviation, and that deviation.
fn max_deviation(
    points: &[Point],
    first: usize,
    end: usize,
    metric: DeviationMetric,
) -> (usize, f64) {
    let (a, b) = (points[first], points[end]);
    let mut index = first;
    let mut dmax = 0.0;
    for (i, point) in points.iter().enumerate().take(end).skip(first + 1) {
        let d = match metric {
            DeviationMetric::Perpendicular => perpendicular_distance(*point, a, b),
            DeviationMetric::ChordLength => a.distance(b),
        };
        if d > dmax {
            dmax = d;
            index = i;
        }
    }
    (index, dmax)
}
