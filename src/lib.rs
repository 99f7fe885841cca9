//! rct-chart: SVG chart building blocks.
//!
//! Marks are pure functions of their configuration: data-domain values go in,
//! are projected through caller-supplied scales, and come out as an
//! [`render::SvgNode`] tree that a [`render::Renderer`] serializes.

pub mod core;
pub mod error;
pub mod interaction;
pub mod marks;
pub mod render;
pub mod telemetry;

pub use error::{BarOrientationError, ChartError, ChartResult};
pub use marks::{Bar, BarOrientation, KernelDensityEstimation, YAxisLabels, YAxisTitle};
