use bunker_cards::GenerateError;
use bunker_core::BackendError;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Card generation error: {0}")]
    Generate(#[from] GenerateError),

    #[error("AI provider error: {0}")]
    Backend(#[from] BackendError),

    #[error("AI provider did not answer within {0:?}")]
    Timeout(Duration),
}
