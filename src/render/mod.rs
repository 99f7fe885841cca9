mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Em, GroupPrimitive, PathPrimitive, RectPrimitive, Style, SvgNode, TextAnchor, TextPrimitive,
    Transform,
};
pub use svg_renderer::{SvgRenderer, node_to_svg};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// output code remains isolated from mark geometry.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
