use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid container size: width={width}, height={height}")]
    InvalidContainer { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A coordinator query was issued after the owning chart was unmounted.
    #[error("chart context is not active: `{operation}` called outside the chart lifetime")]
    ContextInactive { operation: &'static str },
}
