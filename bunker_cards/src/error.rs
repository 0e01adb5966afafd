use bunker_core::BackendError;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),

    #[error("every age in {min}..={max} has already been used")]
    AgeDomainExhausted { min: u32, max: u32 },

    #[error("invalid age range: {min}..={max}")]
    InvalidAgeRange { min: u32, max: u32 },

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}
