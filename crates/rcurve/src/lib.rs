mod config;
mod error;
mod geometry;
mod intersection;
mod job;
mod postprocessor;
mod simplify;
mod tangent;
mod types;

pub use config::*;
pub use error::{ApproxError, ApproxResult};
pub use geometry::*;
pub use intersection::{find_intersection, find_intersection_x};
pub use job::{run_job, JobReport};
pub use postprocessor::{
    emit_linear_moves, post_process_grbl, post_process_linear, segments, LinearMove,
};
pub use simplify::{simplify_polyline, simplify_polyline_with, DeviationMetric, SimplifyOptions};
pub use tangent::{
    central_difference, find_common_tangents, find_common_tangents_with, tangent_line_at,
    to_equation_string, TangentLine, TangentSearchOptions,
};
pub use types::*;

/// High-level function: curve samples → simplified polyline → G-code
///
/// Samples `curve` over `[x_start, x_end]`, reduces the samples to within
/// `epsilon` and renders one `G01` line per remaining segment.
pub fn approximate_to_gcode<C: Curve + ?Sized>(
    curve: &C,
    x_start: f64,
    x_end: f64,
    step: f64,
    epsilon: f64,
) -> ApproxResult<GCode> {
    let samples = sample_curve(curve, x_start, x_end, step)?;
    let polyline = simplify_polyline(&samples, epsilon)?;
    Ok(post_process_linear(&polyline))
}
