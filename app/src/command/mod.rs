//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input, dispatched
//! statically from `main`.

use bunker_cards::{CardGenerator, ValueStore};
use bunker_config::Config;
use bunker_providers::GeminiProvider;
use bunker_telegram::{CardService, SharedProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

mod card;
mod init;
mod start;
mod telegram;
mod version;

pub use card::{CardInput, CardStrategy};
pub use init::InitStrategy;
pub use start::{StartInput, StartStrategy};
pub use telegram::{TelegramInput, TelegramStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

fn build_provider(config: &Config) -> SharedProvider {
    let mut provider =
        GeminiProvider::new(config.gemini.api_key.clone(), config.completion_config())
            .with_max_retries(config.gemini.max_retries);

    if let Some(base_url) = &config.gemini.base_url {
        provider = provider.with_base_url(base_url.clone());
    }

    Arc::new(provider)
}

/// Wire provider, value store and generator from a validated config.
fn build_service(config: &Config) -> anyhow::Result<CardService> {
    let provider = build_provider(config);
    let store = Arc::new(Mutex::new(ValueStore::new()));

    let generator = CardGenerator::new(Arc::clone(&provider), store, config.generator.clone())?
        .with_template(config.system_prompt());

    let age = &config.generator.age;
    info!(
        "Card generator ready: ages {}..={}, on exhausted: {:?}",
        age.min, age.max, age.on_exhausted
    );

    let timeout = config.generator.request_timeout_secs.map(Duration::from_secs);

    Ok(
        CardService::new(provider, Arc::new(generator), config.start_prompt().to_string())
            .with_timeout(timeout),
    )
}
