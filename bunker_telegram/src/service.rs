//! Transport-free answering logic behind the bot.

use bunker_cards::CardGenerator;
use bunker_core::LLMProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::{Error, Result, Route};

pub type SharedProvider = Arc<dyn LLMProvider>;

/// Turns a [`Route`] into reply text.
///
/// Backend and generation failures are logged here and replaced by the
/// route's localized failure notice, so a reply always exists.
#[derive(Clone)]
pub struct CardService {
    provider: SharedProvider,
    generator: Arc<CardGenerator<SharedProvider>>,
    start_prompt: String,
    timeout: Option<Duration>,
}

impl CardService {
    pub fn new(
        provider: SharedProvider,
        generator: Arc<CardGenerator<SharedProvider>>,
        start_prompt: String,
    ) -> Self {
        Self {
            provider,
            generator,
            start_prompt,
            timeout: None,
        }
    }

    /// Limit for the scripted start prompt call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn generator(&self) -> &CardGenerator<SharedProvider> {
        &self.generator
    }

    pub async fn generate_card(&self) -> Result<String> {
        Ok(self.generator.generate().await?)
    }

    /// Pass the scripted prompt through unchanged.
    pub async fn start_game(&self) -> Result<String> {
        let call = self.provider.complete(&self.start_prompt);

        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| Error::Timeout(limit))??,
            None => call.await?,
        };

        Ok(response.content)
    }

    pub async fn answer(&self, route: Route) -> String {
        let result = match route {
            Route::GenerateCard => {
                info!("Card generation requested");
                self.generate_card().await
            }
            Route::StartGame => {
                info!("Game start requested");
                self.start_game().await
            }
            Route::Help => return Route::help_text().to_string(),
        };

        match result {
            Ok(text) => {
                info!("Received response from backend: {text}");
                text
            }
            Err(e) => {
                error!("Failed to answer {route:?}: {e}");
                route.failure_text().to_string()
            }
        }
    }
}
