use thiserror::Error;

/// Errors raised while building a distribution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutcomeError {
    #[error("Standard deviation must be finite and non-negative, got {0}")]
    InvalidStdDev(f64),
}

pub type OutcomeResult<T> = std::result::Result<T, OutcomeError>;
