use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    InvalidPropCombination(#[from] BarOrientationError),

    #[error("{scale} scale cannot map value `{value}`")]
    UnmappedValue { scale: &'static str, value: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Raised when a bar request does not carry exactly one range end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "Bar expects an x_end *or* y_end, but not both (x_end set: {x_end_set}, y_end set: {y_end_set})"
)]
pub struct BarOrientationError {
    pub x_end_set: bool,
    pub y_end_set: bool,
}
