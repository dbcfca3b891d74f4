use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing surface `{surface_id}` was not found")]
    SurfaceNotFound { surface_id: String },

    #[error("unsupported chart type: `{0}`")]
    UnsupportedChartType(String),

    #[error(
        "dataset {dataset} has {actual} values but the chart has {expected} labels"
    )]
    DataShapeMismatch {
        dataset: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("surface backend failure: {0}")]
    Backend(String),
}
