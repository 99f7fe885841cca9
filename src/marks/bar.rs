use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{DomainValue, Scale};
use crate::error::{BarOrientationError, ChartError, ChartResult};
use crate::interaction::MouseHandlers;
use crate::render::{GroupPrimitive, RectPrimitive, Style, SvgNode, TextAnchor, TextPrimitive};

pub type LabelFormatFn = Arc<dyn Fn(&DomainValue) -> String + Send + Sync + 'static>;

pub const DEFAULT_BAR_THICKNESS: f64 = 8.0;
pub const DEFAULT_LABEL_DISTANCE: f64 = 24.0;

/// Extra downward nudge applied to horizontal bar labels so they sit on the
/// bar's center line.
const HORIZONTAL_LABEL_NUDGE_PX: f64 = 5.0;

/// Which axis a bar spans, carrying the end of that range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarOrientation {
    /// Spans `x..x_end`, centered on `y`.
    Horizontal { x_end: DomainValue },
    /// Spans `y..y_end`, centered on `x`.
    Vertical { y_end: DomainValue },
}

impl BarOrientation {
    /// Resolves orientation from two mutually exclusive optional range ends.
    pub fn from_ends(
        x_end: Option<DomainValue>,
        y_end: Option<DomainValue>,
    ) -> Result<Self, BarOrientationError> {
        match (x_end, y_end) {
            (Some(x_end), None) => Ok(Self::Horizontal { x_end }),
            (None, Some(y_end)) => Ok(Self::Vertical { y_end }),
            (x_end, y_end) => {
                let err = BarOrientationError {
                    x_end_set: x_end.is_some(),
                    y_end_set: y_end.is_some(),
                };
                warn!(
                    x_end_set = err.x_end_set,
                    y_end_set = err.y_end_set,
                    "rejecting bar without exactly one range end"
                );
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Horizontal { .. } => "horizontal",
            Self::Vertical { .. } => "vertical",
        }
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Horizontal { .. })
    }

    /// The range end, which is also the value a label displays.
    #[must_use]
    pub fn end_value(&self) -> &DomainValue {
        match self {
            Self::Horizontal { x_end } => x_end,
            Self::Vertical { y_end } => y_end,
        }
    }
}

/// Pixel-space layout of a bar and its (optional) label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub rect_x: f64,
    pub rect_y: f64,
    pub width: f64,
    pub height: f64,
    pub label_x: f64,
    pub label_y: f64,
    pub label_anchor: Option<TextAnchor>,
    pub label_text: String,
}

/// A single bar spanning a data range on one axis, centered on a value of the
/// other axis.
///
/// Values are in the data domain; `geometry`/`render` project them through the
/// scales supplied by the surrounding chart.
#[derive(Clone)]
pub struct Bar {
    pub x: DomainValue,
    pub y: DomainValue,
    pub orientation: BarOrientation,
    /// Pixel width of a vertical bar, or height of a horizontal one.
    pub thickness: f64,
    pub class_name: String,
    pub style: Style,
    pub show_label: bool,
    pub label_format: Option<LabelFormatFn>,
    /// Pixel gap between the bar end and its label.
    pub label_distance: f64,
    pub label_class_name: Option<String>,
    pub handlers: MouseHandlers,
}

impl Bar {
    #[must_use]
    pub fn new(x: impl Into<DomainValue>, y: impl Into<DomainValue>, orientation: BarOrientation) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            orientation,
            thickness: DEFAULT_BAR_THICKNESS,
            class_name: String::new(),
            style: Style::new(),
            show_label: false,
            label_format: None,
            label_distance: DEFAULT_LABEL_DISTANCE,
            label_class_name: None,
            handlers: MouseHandlers::default(),
        }
    }

    /// Bar spanning `x..x_end`, centered on `y`.
    #[must_use]
    pub fn horizontal(
        x: impl Into<DomainValue>,
        x_end: impl Into<DomainValue>,
        y: impl Into<DomainValue>,
    ) -> Self {
        Self::new(x, y, BarOrientation::Horizontal { x_end: x_end.into() })
    }

    /// Bar spanning `y..y_end`, centered on `x`.
    #[must_use]
    pub fn vertical(
        x: impl Into<DomainValue>,
        y: impl Into<DomainValue>,
        y_end: impl Into<DomainValue>,
    ) -> Self {
        Self::new(x, y, BarOrientation::Vertical { y_end: y_end.into() })
    }

    /// Builds a bar from untyped input where both range ends are optional.
    ///
    /// Exactly one of `x_end`/`y_end` must be present.
    pub fn from_optional_ends(
        x: impl Into<DomainValue>,
        y: impl Into<DomainValue>,
        x_end: Option<DomainValue>,
        y_end: Option<DomainValue>,
    ) -> ChartResult<Self> {
        let orientation = BarOrientation::from_ends(x_end, y_end)?;
        Ok(Self::new(x, y, orientation))
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_label(mut self, show_label: bool) -> Self {
        self.show_label = show_label;
        self
    }

    #[must_use]
    pub fn with_label_format(
        mut self,
        format: impl Fn(&DomainValue) -> String + Send + Sync + 'static,
    ) -> Self {
        self.label_format = Some(Arc::new(format));
        self
    }

    #[must_use]
    pub fn with_label_distance(mut self, label_distance: f64) -> Self {
        self.label_distance = label_distance;
        self
    }

    #[must_use]
    pub fn with_label_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.label_class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: MouseHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// `rct-chart-bar rct-chart-bar-{orientation} {class_name}`.
    #[must_use]
    pub fn bar_class(&self) -> String {
        format!(
            "rct-chart-bar rct-chart-bar-{} {}",
            self.orientation.name(),
            self.class_name
        )
    }

    #[must_use]
    pub fn label_class(&self) -> String {
        format!(
            "rct-chart-bar-label {}",
            self.label_class_name.as_deref().unwrap_or_default()
        )
    }

    #[must_use]
    pub fn label_text(&self) -> String {
        let value = self.orientation.end_value();
        match &self.label_format {
            Some(format) => format(value),
            None => value.to_string(),
        }
    }

    /// Projects the bar into pixel space.
    ///
    /// The rectangle spans the min/max of the two projected range ends, so its
    /// size is never negative whichever end maps to the larger coordinate.
    pub fn geometry(&self, x_scale: &dyn Scale, y_scale: &dyn Scale) -> ChartResult<BarGeometry> {
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(ChartError::InvalidData(
                "bar thickness must be finite and >= 0".to_owned(),
            ));
        }

        let half = self.thickness / 2.0;
        let geometry = match &self.orientation {
            BarOrientation::Horizontal { x_end } => {
                let rect_y = y_scale.map(&self.y)? - half;
                let x0 = x_scale.map(&self.x)?;
                let x1 = x_scale.map(x_end)?;
                BarGeometry {
                    rect_x: x0.min(x1),
                    rect_y,
                    width: (x1 - x0).abs(),
                    height: self.thickness,
                    label_x: x0.max(x1) + self.label_distance,
                    label_y: rect_y + half + HORIZONTAL_LABEL_NUDGE_PX,
                    label_anchor: None,
                    label_text: self.label_text(),
                }
            }
            BarOrientation::Vertical { y_end } => {
                let rect_x = x_scale.map(&self.x)? - half;
                let y0 = y_scale.map(&self.y)?;
                let y1 = y_scale.map(y_end)?;
                let rect_y = y0.min(y1);
                BarGeometry {
                    rect_x,
                    rect_y,
                    width: self.thickness,
                    height: (y1 - y0).abs(),
                    label_x: rect_x + half,
                    label_y: rect_y - self.label_distance,
                    label_anchor: Some(TextAnchor::Middle),
                    label_text: self.label_text(),
                }
            }
        };

        trace!(
            orientation = self.orientation.name(),
            rect_x = geometry.rect_x,
            rect_y = geometry.rect_y,
            width = geometry.width,
            height = geometry.height,
            "projected bar"
        );
        Ok(geometry)
    }

    /// Renders the bar as a `rect`, or a `g` holding the `rect` and its label
    /// when `show_label` is set.
    pub fn render(&self, x_scale: &dyn Scale, y_scale: &dyn Scale) -> ChartResult<SvgNode> {
        let geometry = self.geometry(x_scale, y_scale)?;

        let rect = RectPrimitive {
            class_name: Some(self.bar_class()),
            style: self.style.clone(),
            handlers: self.handlers.clone(),
            ..RectPrimitive::new(geometry.rect_x, geometry.rect_y, geometry.width, geometry.height)
        };

        if !self.show_label {
            return Ok(SvgNode::Rect(rect));
        }

        let label = TextPrimitive {
            anchor: geometry.label_anchor,
            class_name: Some(self.label_class()),
            ..TextPrimitive::new(geometry.label_text).at(geometry.label_x, geometry.label_y)
        };
        Ok(SvgNode::Group(GroupPrimitive::new(vec![
            SvgNode::Rect(rect),
            SvgNode::Text(label),
        ])))
    }
}

impl fmt::Debug for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bar")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("orientation", &self.orientation)
            .field("thickness", &self.thickness)
            .field("class_name", &self.class_name)
            .field("style", &self.style)
            .field("show_label", &self.show_label)
            .field("label_format", &self.label_format.is_some())
            .field("label_distance", &self.label_distance)
            .field("label_class_name", &self.label_class_name)
            .field("handlers", &self.handlers)
            .finish()
    }
}

/// Serializable bar request, as it arrives from untyped configuration.
///
/// Both range ends are optional here; [`BarSpec::into_bar`] enforces that
/// exactly one is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    #[serde(default)]
    pub x: DomainValue,
    #[serde(default)]
    pub y: DomainValue,
    #[serde(default)]
    pub x_end: Option<DomainValue>,
    #[serde(default)]
    pub y_end: Option<DomainValue>,
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub show_label: bool,
    #[serde(default = "default_label_distance")]
    pub label_distance: f64,
    #[serde(default)]
    pub label_class_name: Option<String>,
}

impl Default for BarSpec {
    fn default() -> Self {
        Self {
            x: DomainValue::default(),
            y: DomainValue::default(),
            x_end: None,
            y_end: None,
            thickness: default_thickness(),
            class_name: String::new(),
            style: Style::new(),
            show_label: false,
            label_distance: default_label_distance(),
            label_class_name: None,
        }
    }
}

impl BarSpec {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse bar spec: {e}")))
    }

    pub fn into_bar(self) -> ChartResult<Bar> {
        let mut bar = Bar::from_optional_ends(self.x, self.y, self.x_end, self.y_end)?
            .with_thickness(self.thickness)
            .with_class_name(self.class_name)
            .with_style(self.style)
            .with_label(self.show_label)
            .with_label_distance(self.label_distance);
        bar.label_class_name = self.label_class_name;
        Ok(bar)
    }
}

fn default_thickness() -> f64 {
    DEFAULT_BAR_THICKNESS
}

fn default_label_distance() -> f64 {
    DEFAULT_LABEL_DISTANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_class_tolerates_missing_extra_class() {
        let bar = Bar::vertical(0.0, 0.0, 1.0);
        assert_eq!(bar.label_class(), "rct-chart-bar-label ");
        assert_eq!(bar.bar_class(), "rct-chart-bar rct-chart-bar-vertical ");
    }

    #[test]
    fn negative_thickness_is_rejected() {
        let scale = |v: &DomainValue| v.as_number().unwrap_or_default();
        let err = Bar::vertical(0.0, 0.0, 1.0)
            .with_thickness(-1.0)
            .geometry(&scale, &scale)
            .expect_err("negative thickness");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
}
