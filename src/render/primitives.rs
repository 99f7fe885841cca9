use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::interaction::MouseHandlers;

/// Horizontal text anchoring, matching the SVG `text-anchor` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length relative to the current font size (`0.8em`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Em(pub f64);

impl fmt::Display for Em {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}em", self.0)
    }
}

/// Single SVG transform function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Translate { x: f64, y: f64 },
    Rotate { degrees: f64 },
}

impl Transform {
    fn is_finite(self) -> bool {
        match self {
            Self::Translate { x, y } => x.is_finite() && y.is_finite(),
            Self::Rotate { degrees } => degrees.is_finite(),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate { x, y } => write!(f, "translate({x},{y})"),
            Self::Rotate { degrees } => write!(f, "rotate({degrees})"),
        }
    }
}

/// Ordered inline CSS declarations (`property -> value`).
///
/// Property names are stored in their CSS spelling (`font-family`), and
/// declaration order is preserved when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(IndexMap<String, String>);

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Sets a declaration, replacing an existing value in place.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Serializes to the body of an SVG `style` attribute.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub class_name: Option<String>,
    pub style: Style,
    pub handlers: MouseHandlers,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            class_name: None,
            style: Style::new(),
            handlers: MouseHandlers::default(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(ChartError::InvalidData(
                "rect size must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Text run in pixel space.
///
/// Unset coordinates and attributes are omitted from the output, leaving them
/// to the surrounding transform or the SVG defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub anchor: Option<TextAnchor>,
    pub dy: Option<Em>,
    pub transform: Option<Transform>,
    pub class_name: Option<String>,
    pub style: Style,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: None,
            y: None,
            anchor: None,
            dy: None,
            transform: None,
            class_name: None,
            style: Style::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.x.is_some_and(|x| !x.is_finite()) || self.y.is_some_and(|y| !y.is_finite()) {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if self.dy.is_some_and(|dy| !dy.0.is_finite()) {
            return Err(ChartError::InvalidData(
                "text dy must be finite".to_owned(),
            ));
        }
        if self.transform.is_some_and(|t| !t.is_finite()) {
            return Err(ChartError::InvalidData(
                "text transform must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Open polyline through `points`, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub points: Vec<(f64, f64)>,
    pub class_name: Option<String>,
    pub style: Style,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self {
            points,
            class_name: None,
            style: Style::new(),
        }
    }

    /// Path data in SVG `d` syntax (`M x,y L x,y ...`).
    #[must_use]
    pub fn path_data(&self) -> String {
        let mut d = String::new();
        for (index, (x, y)) in self.points.iter().enumerate() {
            if index > 0 {
                d.push(' ');
            }
            let command = if index == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{command}{x},{y}"));
        }
        d
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 2 {
            return Err(ChartError::InvalidData(
                "path needs at least two points".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// `<g>` container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupPrimitive {
    pub transform: Option<Transform>,
    pub class_name: Option<String>,
    pub children: Vec<SvgNode>,
}

impl GroupPrimitive {
    #[must_use]
    pub fn new(children: Vec<SvgNode>) -> Self {
        Self {
            transform: None,
            class_name: None,
            children,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.transform.is_some_and(|t| !t.is_finite()) {
            return Err(ChartError::InvalidData(
                "group transform must be finite".to_owned(),
            ));
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }
}

/// One node of rendered markup.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgNode {
    Rect(RectPrimitive),
    Text(TextPrimitive),
    Path(PathPrimitive),
    Group(GroupPrimitive),
}

impl SvgNode {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Rect(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
            Self::Path(path) => path.validate(),
            Self::Group(group) => group.validate(),
        }
    }

    /// Visits this node and all descendants, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SvgNode)) {
        visit(self);
        if let Self::Group(group) = self {
            for child in &group.children {
                child.walk(visit);
            }
        }
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if matches!(node, Self::Rect(_)) {
                count += 1;
            }
        });
        count
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if matches!(node, Self::Text(_)) {
                count += 1;
            }
        });
        count
    }
}

impl From<RectPrimitive> for SvgNode {
    fn from(value: RectPrimitive) -> Self {
        Self::Rect(value)
    }
}

impl From<TextPrimitive> for SvgNode {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}

impl From<PathPrimitive> for SvgNode {
    fn from(value: PathPrimitive) -> Self {
        Self::Path(value)
    }
}

impl From<GroupPrimitive> for SvgNode {
    fn from(value: GroupPrimitive) -> Self {
        Self::Group(value)
    }
}
