use async_trait::async_trait;
use bunker_core::{BackendError, CompletionConfig, LLMProvider, LLMResponse, Usage};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;

use crate::retry::{backoff_schedule, retry_with_backoff};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini `generateContent` client.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    config: CompletionConfig,
    retry_delays: Vec<Duration>,
}

impl GeminiProvider {
    pub fn new(api_key: String, config: CompletionConfig) -> Self {
        info!(
            "Creating GeminiProvider: model={}, temperature={}",
            config.model, config.temperature
        );
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            config,
            retry_delays: backoff_schedule(3),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Number of retries for transient failures; zero disables retrying.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.retry_delays = backoff_schedule(max_retries);
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.config.model
        )
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": self.config.system_instruction }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature
            }
        })
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &Value) -> Result<LLMResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        parse_response(&body)
    }
}

fn token_count(usage: &Value, key: &str) -> u32 {
    u32::try_from(usage[key].as_u64().unwrap_or(0)).unwrap_or(0)
}

/// Pull the text of the first candidate out of a `generateContent` reply.
fn parse_response(body: &Value) -> Result<LLMResponse, BackendError> {
    if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
        return Err(BackendError::Blocked(reason.to_string()));
    }

    let candidate = &body["candidates"][0];
    let parts = candidate["content"]["parts"].as_array().ok_or_else(|| {
        candidate["finishReason"].as_str().map_or_else(
            || BackendError::InvalidResponse("missing candidate content".to_string()),
            |reason| BackendError::Blocked(reason.to_string()),
        )
    })?;

    let content: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if content.is_empty() {
        return Err(BackendError::InvalidResponse(
            "candidate has no text parts".to_string(),
        ));
    }

    let usage = body["usageMetadata"].as_object().map(|_| Usage {
        prompt_tokens: token_count(&body["usageMetadata"], "promptTokenCount"),
        completion_tokens: token_count(&body["usageMetadata"], "candidatesTokenCount"),
        total_tokens: token_count(&body["usageMetadata"], "totalTokenCount"),
    });

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<LLMResponse, BackendError> {
        let request = self.request_body(prompt);

        info!("Sending request to Gemini API: model={}", self.config.model);

        let response = retry_with_backoff(
            || self.try_send(&request),
            &self.retry_delays,
            BackendError::is_transient,
        )
        .await?;

        if let Some(usage) = response.usage {
            info!(
                "Received response from Gemini API: {} prompt + {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        } else {
            info!("Received response from Gemini API");
        }
        Ok(response)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(
            "test-key".to_string(),
            CompletionConfig {
                model: "gemini-test".to_string(),
                system_instruction: "SYSTEM".to_string(),
                temperature: 0.5,
            },
        )
    }

    #[test]
    fn endpoint_uses_model_and_trimmed_base_url() {
        let provider = provider().with_base_url("http://localhost:8080/v1/".to_string());
        assert_eq!(
            provider.endpoint(),
            "http://localhost:8080/v1/models/gemini-test:generateContent"
        );
        assert_eq!(provider.model(), "gemini-test");
    }

    #[test]
    fn request_body_carries_system_instruction_and_temperature() {
        let body = provider().request_body("Привет");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "SYSTEM");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Привет");
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn parse_joins_text_parts_and_usage() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Профессия: " }, { "text": "Врач" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 30,
                "totalTokenCount": 42
            }
        });

        let response = parse_response(&body).expect("valid response should parse");
        assert_eq!(response.content, "Профессия: Врач");
        assert_eq!(
            response.usage,
            Some(Usage {
                prompt_tokens: 12,
                completion_tokens: 30,
                total_tokens: 42
            })
        );
    }

    #[test]
    fn parse_reports_blocked_prompt() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(matches!(
            parse_response(&body),
            Err(BackendError::Blocked(ref reason)) if reason == "SAFETY"
        ));
    }

    #[test]
    fn parse_reports_blocked_candidate() {
        let body = json!({ "candidates": [{ "finishReason": "RECITATION" }] });
        assert!(matches!(
            parse_response(&body),
            Err(BackendError::Blocked(ref reason)) if reason == "RECITATION"
        ));
    }

    #[test]
    fn parse_rejects_empty_reply() {
        assert!(matches!(
            parse_response(&json!({})),
            Err(BackendError::InvalidResponse(_))
        ));
        let body = json!({ "candidates": [{ "content": { "parts": [] } }] });
        assert!(matches!(
            parse_response(&body),
            Err(BackendError::InvalidResponse(_))
        ));
    }
}
