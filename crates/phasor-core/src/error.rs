use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhasorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),
}

pub type Result<T> = std::result::Result<T, PhasorError>;
