use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::ensure_finite;
use crate::core::{DomainValue, LinearScale, Scale};
use crate::error::{ChartError, ChartResult};
use crate::marks::bar::LabelFormatFn;
use crate::marks::y_axis_title::TitlePosition;
use crate::render::{Em, GroupPrimitive, Style, SvgNode, TextAnchor, TextPrimitive};

pub const DEFAULT_TICK_COUNT: usize = 10;

/// Shifts a label down so its baseline centers on the tick.
const LABEL_BASELINE_SHIFT: Em = Em(0.35);

/// One positioned tick label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub value: f64,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Numeric tick labels along a Y axis.
///
/// Tick values come from `ticks` when set, otherwise from the Y scale's own
/// `ticks(tick_count)`.
#[derive(Clone, Serialize, Deserialize)]
pub struct YAxisLabels {
    /// Plot width; right-side labels are laid out past it.
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default)]
    pub position: TitlePosition,
    /// Gap between the axis line and the labels, in pixels.
    #[serde(default = "default_distance")]
    pub distance: f64,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default)]
    pub ticks: Option<Vec<f64>>,
    #[serde(default)]
    pub label_class_name: Option<String>,
    #[serde(default = "default_label_style")]
    pub label_style: Style,
    #[serde(skip)]
    pub format: Option<LabelFormatFn>,
}

impl Default for YAxisLabels {
    fn default() -> Self {
        Self {
            width: default_width(),
            position: TitlePosition::default(),
            distance: default_distance(),
            tick_count: default_tick_count(),
            ticks: None,
            label_class_name: None,
            label_style: default_label_style(),
            format: None,
        }
    }
}

impl YAxisLabels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse y axis labels: {e}")))
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: TitlePosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn with_label_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.label_class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_label_style(mut self, label_style: Style) -> Self {
        self.label_style = label_style;
        self
    }

    #[must_use]
    pub fn with_format(
        mut self,
        format: impl Fn(&DomainValue) -> String + Send + Sync + 'static,
    ) -> Self {
        self.format = Some(Arc::new(format));
        self
    }

    #[must_use]
    pub fn tick_values(&self, y_scale: &LinearScale) -> Vec<f64> {
        match &self.ticks {
            Some(ticks) => ticks.clone(),
            None => y_scale.ticks(self.tick_count),
        }
    }

    #[must_use]
    pub fn label_text(&self, value: f64) -> String {
        let value = DomainValue::Number(value);
        match &self.format {
            Some(format) => format(&value),
            None => value.to_string(),
        }
    }

    #[must_use]
    pub fn text_anchor(&self) -> TextAnchor {
        match self.position {
            TitlePosition::Left => TextAnchor::End,
            TitlePosition::Right => TextAnchor::Start,
        }
    }

    fn label_x(&self) -> f64 {
        match self.position {
            TitlePosition::Left => -self.distance,
            TitlePosition::Right => self.width + self.distance,
        }
    }

    /// Positions every tick label against `y_scale`.
    pub fn labels(&self, y_scale: &LinearScale) -> ChartResult<Vec<AxisLabel>> {
        let x = self.label_x();
        let mut labels = Vec::new();
        for value in self.tick_values(y_scale) {
            ensure_finite(value, "tick value")?;
            labels.push(AxisLabel {
                value,
                text: self.label_text(value),
                x,
                y: y_scale.map(&DomainValue::Number(value))?,
            });
        }
        debug!(
            labels = labels.len(),
            position = ?self.position,
            "laid out y axis labels"
        );
        Ok(labels)
    }

    fn label_class(&self) -> String {
        format!(
            "rct-chart-y-axis-label {}",
            self.label_class_name.as_deref().unwrap_or_default()
        )
    }

    /// `g.rct-chart-y-axis-labels > text*`.
    pub fn render(&self, y_scale: &LinearScale) -> ChartResult<SvgNode> {
        let anchor = self.text_anchor();
        let children = self
            .labels(y_scale)?
            .into_iter()
            .map(|label| {
                SvgNode::Text(TextPrimitive {
                    anchor: Some(anchor),
                    dy: Some(LABEL_BASELINE_SHIFT),
                    class_name: Some(self.label_class()),
                    style: self.label_style.clone(),
                    ..TextPrimitive::new(label.text).at(label.x, label.y)
                })
            })
            .collect();

        Ok(SvgNode::Group(GroupPrimitive {
            class_name: Some("rct-chart-y-axis-labels".to_owned()),
            ..GroupPrimitive::new(children)
        }))
    }
}

impl fmt::Debug for YAxisLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YAxisLabels")
            .field("width", &self.width)
            .field("position", &self.position)
            .field("distance", &self.distance)
            .field("tick_count", &self.tick_count)
            .field("ticks", &self.ticks)
            .field("label_class_name", &self.label_class_name)
            .field("label_style", &self.label_style)
            .field("format", &self.format.is_some())
            .finish()
    }
}

fn default_width() -> f64 {
    400.0
}

fn default_distance() -> f64 {
    4.0
}

fn default_tick_count() -> usize {
    DEFAULT_TICK_COUNT
}

/// Helvetica 14px with a unit line height.
#[must_use]
pub fn default_label_style() -> Style {
    Style::new()
        .with("font-family", "Helvetica, sans-serif")
        .with("font-size", "14px")
        .with("line-height", "1")
}
