use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};
use crate::render::{Em, GroupPrimitive, Style, SvgNode, TextAnchor, TextPrimitive, Transform};

/// Side of the plot the axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitlePosition {
    #[default]
    Left,
    Right,
}

/// Vertical alignment of the title along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Whether the title sits before (outside, for a left axis) or after the
/// axis line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitlePlacement {
    Before,
    After,
}

impl TitlePlacement {
    /// `Before` for a left axis, `After` for a right one.
    #[must_use]
    pub fn default_for(position: TitlePosition) -> Self {
        match position {
            TitlePosition::Left => Self::Before,
            TitlePosition::Right => Self::After,
        }
    }
}

/// Resolved placement of a Y axis title.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitleLayout {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate_deg: f64,
    pub text_anchor: TextAnchor,
    pub dy: Option<Em>,
}

/// Title label for a Y axis, positioned from symbolic configuration.
///
/// `height`/`width` describe the plot area the title is laid out against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisTitle {
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    /// Gap between the axis line and the title, in pixels.
    #[serde(default = "default_distance")]
    pub distance: f64,
    #[serde(default)]
    pub position: TitlePosition,
    #[serde(default)]
    pub alignment: TitleAlignment,
    /// Derived from `position` when unset.
    #[serde(default)]
    pub placement: Option<TitlePlacement>,
    #[serde(default = "default_rotate")]
    pub rotate: bool,
    #[serde(default = "default_title_style")]
    pub title_style: Style,
    #[serde(default)]
    pub title: Option<String>,
    /// Text used when `title` is unset.
    #[serde(default)]
    pub content: Option<String>,
}

impl Default for YAxisTitle {
    fn default() -> Self {
        Self {
            height: default_height(),
            width: default_width(),
            distance: default_distance(),
            position: TitlePosition::default(),
            alignment: TitleAlignment::default(),
            placement: None,
            rotate: default_rotate(),
            title_style: default_title_style(),
            title: None,
            content: None,
        }
    }
}

impl YAxisTitle {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse y axis title: {e}")))
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: TitlePosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: TitleAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: TitlePlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    #[must_use]
    pub fn with_rotate(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    #[must_use]
    pub fn with_title_style(mut self, title_style: Style) -> Self {
        self.title_style = title_style;
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn resolved_placement(&self) -> TitlePlacement {
        self.placement
            .unwrap_or_else(|| TitlePlacement::default_for(self.position))
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.title
            .as_deref()
            .or(self.content.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn layout(&self) -> TitleLayout {
        let placement = self.resolved_placement();

        let base_x = match self.position {
            TitlePosition::Right => self.width,
            TitlePosition::Left => 0.0,
        };
        let translate_x = match placement {
            TitlePlacement::Before => base_x - self.distance,
            TitlePlacement::After => base_x + self.distance,
        };
        let translate_y = match self.alignment {
            TitleAlignment::Top => 0.0,
            TitleAlignment::Middle => self.height / 2.0,
            TitleAlignment::Bottom => self.height,
        };

        let (rotate_deg, text_anchor, dy) = if self.rotate {
            let anchor = match self.alignment {
                TitleAlignment::Top => TextAnchor::End,
                TitleAlignment::Middle => TextAnchor::Middle,
                TitleAlignment::Bottom => TextAnchor::Start,
            };
            let dy = match placement {
                TitlePlacement::Before => Em(-0.2),
                TitlePlacement::After => Em(0.8),
            };
            (-90.0, anchor, Some(dy))
        } else {
            let anchor = match placement {
                TitlePlacement::Before => TextAnchor::End,
                TitlePlacement::After => TextAnchor::Start,
            };
            let dy = match self.alignment {
                TitleAlignment::Top => Some(Em(0.8)),
                TitleAlignment::Middle => Some(Em(0.3)),
                TitleAlignment::Bottom => None,
            };
            (0.0, anchor, dy)
        };

        let layout = TitleLayout {
            translate_x,
            translate_y,
            rotate_deg,
            text_anchor,
            dy,
        };
        trace!(?layout, "laid out y axis title");
        layout
    }

    /// `g[translate] > text[style, rotate, dy]`.
    #[must_use]
    pub fn render(&self) -> SvgNode {
        let layout = self.layout();

        let mut style = self.title_style.clone();
        style.set("text-anchor", layout.text_anchor.as_str());

        let text = TextPrimitive {
            dy: layout.dy,
            transform: Some(Transform::Rotate {
                degrees: layout.rotate_deg,
            }),
            style,
            ..TextPrimitive::new(self.text())
        };

        SvgNode::Group(GroupPrimitive {
            transform: Some(Transform::Translate {
                x: layout.translate_x,
                y: layout.translate_y,
            }),
            ..GroupPrimitive::new(vec![SvgNode::Text(text)])
        })
    }
}

fn default_height() -> f64 {
    250.0
}

fn default_width() -> f64 {
    400.0
}

fn default_distance() -> f64 {
    5.0
}

fn default_rotate() -> bool {
    true
}

/// Helvetica 24px bold with a unit line height.
#[must_use]
pub fn default_title_style() -> Style {
    Style::new()
        .with("font-family", "Helvetica, sans-serif")
        .with("font-size", "24px")
        .with("font-weight", "bold")
        .with("line-height", "1")
}
