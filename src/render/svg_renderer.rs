use tracing::debug;

use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, Style, SvgNode};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serializes frames into standalone SVG documents.
///
/// Each call to [`Renderer::render`] replaces the previous document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered document, empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let width = frame.viewport.width;
        let height = frame.viewport.height;
        let mut out = String::new();
        out.push_str(&format!(
            r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        ));
        out.push('\n');
        for node in &frame.nodes {
            write_node(&mut out, node);
            out.push('\n');
        }
        out.push_str("</svg>\n");

        debug!(
            nodes = frame.nodes.len(),
            bytes = out.len(),
            "rendered svg document"
        );
        self.document = out;
        Ok(())
    }
}

/// Serializes one node (and its children) as an SVG fragment.
#[must_use]
pub fn node_to_svg(node: &SvgNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &SvgNode) {
    match node {
        SvgNode::Rect(rect) => {
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                rect.x, rect.y, rect.width, rect.height
            ));
            write_class_and_style(out, rect.class_name.as_deref(), &rect.style);
            out.push_str("/>");
        }
        SvgNode::Text(text) => {
            out.push_str("<text");
            if let Some(x) = text.x {
                out.push_str(&format!(r#" x="{x}""#));
            }
            if let Some(y) = text.y {
                out.push_str(&format!(r#" y="{y}""#));
            }
            if let Some(anchor) = text.anchor {
                out.push_str(&format!(r#" text-anchor="{anchor}""#));
            }
            if let Some(dy) = text.dy {
                out.push_str(&format!(r#" dy="{dy}""#));
            }
            if let Some(transform) = text.transform {
                out.push_str(&format!(r#" transform="{transform}""#));
            }
            write_class_and_style(out, text.class_name.as_deref(), &text.style);
            out.push('>');
            out.push_str(&escape_xml(&text.text));
            out.push_str("</text>");
        }
        SvgNode::Path(path) => {
            out.push_str(&format!(r#"<path d="{}""#, path.path_data()));
            write_class_and_style(out, path.class_name.as_deref(), &path.style);
            out.push_str("/>");
        }
        SvgNode::Group(group) => {
            out.push_str("<g");
            if let Some(transform) = group.transform {
                out.push_str(&format!(r#" transform="{transform}""#));
            }
            write_class_and_style(out, group.class_name.as_deref(), &Style::new());
            out.push('>');
            for child in &group.children {
                write_node(out, child);
            }
            out.push_str("</g>");
        }
    }
}

fn write_class_and_style(out: &mut String, class_name: Option<&str>, style: &Style) {
    if let Some(class_name) = class_name {
        out.push_str(&format!(r#" class="{}""#, escape_xml(class_name)));
    }
    if !style.is_empty() {
        out.push_str(&format!(r#" style="{}""#, escape_xml(&style.to_css())));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
