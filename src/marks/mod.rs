mod bar;
mod density;
mod y_axis_labels;
mod y_axis_title;

pub use bar::{
    Bar, BarGeometry, BarOrientation, BarSpec, DEFAULT_BAR_THICKNESS, DEFAULT_LABEL_DISTANCE,
    LabelFormatFn,
};
pub use density::{
    DEFAULT_BANDWIDTH, DEFAULT_SAMPLE_COUNT, DensityPoint, KernelDensityEstimation, epanechnikov,
};
pub use y_axis_labels::{
    AxisLabel, DEFAULT_TICK_COUNT, YAxisLabels, default_label_style,
};
pub use y_axis_title::{
    TitleAlignment, TitleLayout, TitlePlacement, TitlePosition, YAxisTitle, default_title_style,
};
