#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod error;
mod schema;

pub use error::{ConfigError, Result};
pub use schema::{
    Config, GEMINI_API_KEY_VAR, GEMINI_MODEL_VAR, GeminiConfig, PromptsConfig, TELEGRAM_TOKEN_VAR,
    TelegramConfig,
};
