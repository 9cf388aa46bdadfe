use thiserror::Error;

pub type MinimapResult<T> = Result<T, MinimapError>;

#[derive(Debug, Error)]
pub enum MinimapError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid normalized range: from={from}, to={to}")]
    InvalidRange { from: f64, to: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("surface backend failure: {0}")]
    Backend(String),
}
