use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::SvgNode;

/// Backend-agnostic scene for one draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub nodes: Vec<SvgNode>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            nodes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_node(mut self, node: impl Into<SvgNode>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn push(&mut self, node: impl Into<SvgNode>) {
        self.nodes.push(node.into());
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for node in &self.nodes {
            node.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.nodes.iter().map(SvgNode::rect_count).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.nodes.iter().map(SvgNode::text_count).sum()
    }
}
