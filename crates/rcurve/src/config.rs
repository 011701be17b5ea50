use crate::error::{ensure_interval, ensure_positive, ApproxError, ApproxResult};
use crate::geometry::{Circle, Line, Point, Polynomial};
use crate::simplify::SimplifyOptions;
use crate::tangent::TangentSearchOptions;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bisection interval and tolerance for the curve/line intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub epsilon: f64,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            epsilon: 1e-6,
        }
    }
}

/// Domain and spacing used to turn the curve into a point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub x_start: f64,
    pub x_end: f64,
    pub step: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            x_start: 0.0,
            x_end: 5.0,
            step: 0.1,
        }
    }
}

/// Everything one approximation run needs. Missing fields take the defaults,
/// which reproduce the stock demo: unit circle at the origin, the curve
/// `x^2 - 2x + 1` and the line `y = 2x - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub circle: Circle,
    pub curve: Polynomial,
    pub line: Line,
    pub intersection: IntersectionConfig,
    pub sampling: SamplingConfig,
    pub simplify: SimplifyOptions,
    pub tangent: TangentSearchOptions,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            circle: Circle::new(Point::new(0.0, 0.0), 1.0),
            curve: Polynomial::quadratic(1.0, -2.0, 1.0),
            line: Line::new(2.0, -1.0),
            intersection: IntersectionConfig::default(),
            sampling: SamplingConfig::default(),
            simplify: SimplifyOptions::new(0.1),
            tangent: TangentSearchOptions::default(),
        }
    }
}

impl JobConfig {
    /// Load a job from the provided path. Missing files yield the default job.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read(path).with_context(|| format!("read job config {}", path.display()))?;
        let config: JobConfig = serde_json::from_slice(&data)
            .with_context(|| format!("deserialize job config {}", path.display()))?;
        Ok(config)
    }

    /// Write the job to the provided path, ensuring the directory exists.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }

        let data = serde_json::to_vec_pretty(self).context("serialize job config to JSON bytes")?;
        fs::write(path, data).with_context(|| format!("write job config {}", path.display()))
    }

    /// Resolve the default config path (`~/.rcurve/job.json`).
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
        Ok(home.join(".rcurve").join("job.json"))
    }

    /// Check every precondition of the run before any computation starts.
    pub fn validate(&self) -> ApproxResult<()> {
        if !(self.circle.radius.is_finite() && self.circle.radius > 0.0) {
            return Err(ApproxError::InvalidRadius(self.circle.radius));
        }
        ensure_interval(
            "x_min",
            self.intersection.x_min,
            "x_max",
            self.intersection.x_max,
        )?;
        ensure_positive("epsilon", self.intersection.epsilon)?;
        ensure_interval(
            "x_start",
            self.sampling.x_start,
            "x_end",
            self.sampling.x_end,
        )?;
        ensure_positive("sampling step", self.sampling.step)?;
        ensure_positive("simplify epsilon", self.simplify.epsilon)?;
        ensure_positive("x_step", self.tangent.x_step)?;
        ensure_positive("derivative_step", self.tangent.derivative_step)?;
        ensure_positive("residual_tolerance", self.tangent.residual_tolerance)?;
        Ok(())
    }
}
