use crate::config::JobConfig;
use crate::error::ApproxResult;
use crate::geometry::{sample_curve, Point};
use crate::intersection::find_intersection;
use crate::postprocessor::{emit_linear_moves, post_process_linear, segments, LinearMove};
use crate::simplify::simplify_polyline_with;
use crate::tangent::{find_common_tangents_with, TangentLine};
use crate::types::GCode;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything computed by one [`run_job`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub intersection: Point,
    pub tangents: Vec<TangentLine>,
    /// Number of curve samples fed to the simplifier.
    pub sample_count: usize,
    pub polyline: Vec<Point>,
    pub moves: Vec<LinearMove>,
}

impl JobReport {
    pub fn segment_count(&self) -> usize {
        self.polyline.len().saturating_sub(1)
    }

    pub fn gcode(&self) -> GCode {
        post_process_linear(&self.polyline)
    }

    /// Human readable report: intersection, tangents, segments and G-code.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.render_intersection());
        out.push_str(&self.render_tangents());
        out.push_str(&self.render_segments());
        out.push_str("\nCNC program:\n");
        out.push_str(&self.gcode().to_program());
        out
    }

    pub fn render_intersection(&self) -> String {
        format!(
            "Intersection: ({:.4}, {:.4})\n",
            self.intersection.x, self.intersection.y
        )
    }

    pub fn render_tangents(&self) -> String {
        let mut out = String::from("Common tangent slopes:\n");
        for tangent in &self.tangents {
            out.push_str(&format!("{}\n", tangent.slope));
        }
        out.push_str("Common tangent equations:\n");
        for tangent in &self.tangents {
            out.push_str(&format!("{}\n", tangent.equation()));
        }
        out
    }

    pub fn render_segments(&self) -> String {
        let mut out = String::from("Approximation segments:\n");
        for (i, (from, to)) in segments(&self.polyline).enumerate() {
            out.push_str(&format!(
                "Segment {}: ({:.2}, {:.2}) -> ({:.2}, {:.2})\n",
                i + 1,
                from.x,
                from.y,
                to.x,
                to.y
            ));
        }
        out.push_str(&format!("Segment count: {}\n", self.segment_count()));
        out
    }
}

/// Run the full pipeline described by `config`.
///
/// The curve is sampled and simplified, the line intersection and the circle
/// tangents are computed, and the simplified polyline becomes linear moves.
pub fn run_job(config: &JobConfig) -> ApproxResult<JobReport> {
    config.validate()?;

    let samples = sample_curve(
        &config.curve,
        config.sampling.x_start,
        config.sampling.x_end,
        config.sampling.step,
    )?;
    let polyline = simplify_polyline_with(&samples, &config.simplify)?;

    let intersection = find_intersection(
        &config.curve,
        &config.line,
        config.intersection.x_min,
        config.intersection.x_max,
        config.intersection.epsilon,
    )?;

    let tangents = find_common_tangents_with(&config.circle, &config.curve, &config.tangent)?;
    let moves = emit_linear_moves(&polyline);

    info!(
        samples = samples.len(),
        polyline = polyline.len(),
        tangents = tangents.len(),
        moves = moves.len(),
        "job finished"
    );

    Ok(JobReport {
        intersection,
        tangents,
        sample_count: samples.len(),
        polyline,
        moves,
    })
}
