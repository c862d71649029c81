use thiserror::Error;

pub type AxesResult<T> = Result<T, AxesError>;

#[derive(Debug, Error)]
pub enum AxesError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
