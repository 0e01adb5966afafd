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

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod error;
pub mod prompt;

pub use error::BackendError;
pub use prompt::{DEFAULT_START_PROMPT, DEFAULT_SYSTEM_PROMPT};

/// Text returned by a backend for one prompt.
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

impl LLMResponse {
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Generation parameters fixed when a provider is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub model: String,
    pub system_instruction: String,
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            system_instruction: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.9,
        }
    }
}

/// A single-shot text completion backend.
///
/// Implementations carry their own [`CompletionConfig`]; callers only hand
/// over the prompt.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<LLMResponse, BackendError>;
    fn model(&self) -> &str;
}

#[async_trait]
impl<T> LLMProvider for Arc<T>
where
    T: LLMProvider + ?Sized,
{
    async fn complete(&self, prompt: &str) -> Result<LLMResponse, BackendError> {
        (**self).complete(prompt).await
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl LLMProvider for Echo {
        async fn complete(&self, prompt: &str) -> Result<LLMResponse, BackendError> {
            Ok(LLMResponse::text(prompt))
        }

        fn model(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test]
    async fn arc_provider_delegates() {
        let provider: Arc<dyn LLMProvider> = Arc::new(Echo);
        let response = provider.complete("ping").await;
        assert!(matches!(response, Ok(ref r) if r.content == "ping"));
        assert_eq!(provider.model(), "echo");
    }

    #[test]
    fn default_completion_config_uses_card_prompt() {
        let config = CompletionConfig::default();
        assert!((config.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.system_instruction, DEFAULT_SYSTEM_PROMPT);
    }
}
