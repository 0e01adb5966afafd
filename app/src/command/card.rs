use bunker_config::Config;
use std::path::PathBuf;
use tracing::info;

use super::build_service;

/// Input parameters for the Card command strategy.
#[derive(Debug, Clone)]
pub struct CardInput {
    pub config_path: Option<PathBuf>,
    /// Number of cards to generate in a row
    pub count: usize,
}

/// Generate cards on stdout without Telegram.
///
/// All cards share one value store, so later cards avoid the values of
/// earlier ones exactly as they would in the bot.
#[derive(Debug, Clone, Copy)]
pub struct CardStrategy;

impl super::CommandStrategy for CardStrategy {
    type Input = CardInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load(input.config_path.as_deref())?;
        config.validate_backend()?;

        let service = build_service(&config)?;

        for index in 1..=input.count {
            info!("Generating card {index}/{}", input.count);
            let card = service.generate_card().await?;
            println!("{card}\n");
        }

        Ok(())
    }
}
