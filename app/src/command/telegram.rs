use crate::command::CommandStrategy;
use bunker_config::Config;
use bunker_telegram::TelegramBot;
use std::path::PathBuf;
use tracing::info;

use super::build_service;

/// Input for Telegram bot command.
pub struct TelegramInput {
    pub config_path: Option<PathBuf>,
    /// Optional bot token (overrides config and environment)
    pub token: Option<String>,
    /// Optional allowed chat IDs (overrides config)
    pub allow_from: Option<Vec<String>>,
}

/// Strategy for running Telegram bot.
pub struct TelegramStrategy;

impl CommandStrategy for TelegramStrategy {
    type Input = TelegramInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load(input.config_path.as_deref())?;

        if let Some(token) = input.token {
            config.telegram.token = token;
        }
        if let Some(allow_from) = input.allow_from {
            config.telegram.allow_from = allow_from;
        }

        config.validate()?;
        info!("Configuration loaded, starting Telegram bot...");

        let service = build_service(&config)?;
        let bot = TelegramBot::new(
            config.telegram.token.clone(),
            service,
            &config.telegram.allow_from,
        );

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await;

        Ok(())
    }
}
