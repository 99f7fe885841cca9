use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::ensure_finite;
use crate::core::{DomainValue, LinearScale, Scale};
use crate::error::{ChartError, ChartResult};
use crate::render::{PathPrimitive, Style, SvgNode};

pub const DEFAULT_BANDWIDTH: f64 = 0.5;
pub const DEFAULT_SAMPLE_COUNT: usize = 50;

/// One estimated density value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Epanechnikov kernel with bandwidth `bandwidth`, evaluated at offset `u`.
#[must_use]
pub fn epanechnikov(bandwidth: f64, u: f64) -> f64 {
    let scaled = u / bandwidth;
    if scaled.abs() <= 1.0 {
        0.75 * (1.0 - scaled * scaled) / bandwidth
    } else {
        0.0
    }
}

/// Kernel density estimate of a numeric sample, drawn as a line overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelDensityEstimation {
    pub data: Vec<f64>,
    #[serde(default = "default_bandwidth")]
    pub bandwidth: f64,
    /// Number of evenly spaced evaluation points across the data extent.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Explicit evaluation points; overrides `sample_count` when set.
    #[serde(default)]
    pub samples: Option<Vec<f64>>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub style: Style,
}

impl KernelDensityEstimation {
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data,
            bandwidth: default_bandwidth(),
            sample_count: default_sample_count(),
            samples: None,
            class_name: None,
            style: Style::new(),
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse density estimation: {e}"))
        })
    }

    #[must_use]
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    #[must_use]
    pub fn with_samples(mut self, samples: Vec<f64>) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Evaluates at `count` ticks of `x_scale`, matching the density to the
    /// positions an x axis labels.
    #[must_use]
    pub fn with_scale_ticks(self, x_scale: &LinearScale, count: usize) -> Self {
        self.with_samples(x_scale.ticks(count))
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        if self.data.is_empty() {
            return Err(ChartError::InvalidData(
                "density estimation needs at least one sample".to_owned(),
            ));
        }
        for value in &self.data {
            ensure_finite(*value, "density sample")?;
        }
        if !self.bandwidth.is_finite() || self.bandwidth <= 0.0 {
            return Err(ChartError::InvalidData(
                "bandwidth must be finite and > 0".to_owned(),
            ));
        }
        match &self.samples {
            Some(samples) => {
                if samples.len() < 2 {
                    return Err(ChartError::InvalidData(
                        "density estimation needs at least two evaluation points".to_owned(),
                    ));
                }
                for value in samples {
                    ensure_finite(*value, "evaluation point")?;
                }
            }
            None if self.sample_count < 2 => {
                return Err(ChartError::InvalidData(
                    "sample count must be >= 2".to_owned(),
                ));
            }
            None => {}
        }
        Ok(())
    }

    /// Evaluation points: explicit `samples`, or `sample_count` points spanning
    /// the data extent.
    fn evaluation_points(&self) -> Vec<f64> {
        if let Some(samples) = &self.samples {
            return samples.clone();
        }

        let min = self
            .data
            .iter()
            .copied()
            .map(OrderedFloat)
            .min()
            .map_or(0.0, |v| v.0);
        let max = self
            .data
            .iter()
            .copied()
            .map(OrderedFloat)
            .max()
            .map_or(0.0, |v| v.0);

        let last = (self.sample_count - 1) as f64;
        (0..self.sample_count)
            .map(|i| min + (max - min) * i as f64 / last)
            .collect()
    }

    /// Mean kernel density at each evaluation point.
    pub fn estimate(&self) -> ChartResult<Vec<DensityPoint>> {
        self.validate()?;

        let count = self.data.len() as f64;
        let points: Vec<DensityPoint> = self
            .evaluation_points()
            .into_iter()
            .map(|x| {
                let total: f64 = self
                    .data
                    .iter()
                    .map(|sample| epanechnikov(self.bandwidth, x - sample))
                    .sum();
                DensityPoint {
                    x,
                    density: total / count,
                }
            })
            .collect();

        debug!(
            samples = self.data.len(),
            points = points.len(),
            bandwidth = self.bandwidth,
            "estimated kernel density"
        );
        Ok(points)
    }

    /// Renders the estimate as a polyline through `(x_scale(x), y_scale(density))`.
    pub fn render(&self, x_scale: &dyn Scale, y_scale: &dyn Scale) -> ChartResult<SvgNode> {
        let mut projected = Vec::new();
        for point in self.estimate()? {
            let x = x_scale.map(&DomainValue::Number(point.x))?;
            let y = y_scale.map(&DomainValue::Number(point.density))?;
            projected.push((x, y));
        }

        let class_name = match &self.class_name {
            Some(extra) => format!("rct-chart-kde {extra}"),
            None => "rct-chart-kde".to_owned(),
        };
        Ok(SvgNode::Path(PathPrimitive {
            class_name: Some(class_name),
            style: self.style.clone(),
            ..PathPrimitive::new(projected)
        }))
    }
}

fn default_bandwidth() -> f64 {
    DEFAULT_BANDWIDTH
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}
