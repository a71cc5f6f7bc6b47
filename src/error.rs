use thiserror::Error;

/// Errors surfaced by the training engine and its data preparation
#[derive(Debug, Error)]
pub enum Error {
    /// A matrix has the wrong shape, or a batch is empty
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No labels or no output classes
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Not enough samples to build the requested partitions
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Hyperparameters or architecture that cannot be trained
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
