use bunker_config::Config;
use std::path::PathBuf;

use super::build_service;

#[derive(Debug, Clone)]
pub struct StartInput {
    pub config_path: Option<PathBuf>,
}

/// Print the scripted game opening.
#[derive(Debug, Clone, Copy)]
pub struct StartStrategy;

impl super::CommandStrategy for StartStrategy {
    type Input = StartInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load(input.config_path.as_deref())?;
        config.validate_backend()?;

        let text = build_service(&config)?.start_game().await?;
        println!("{text}");

        Ok(())
    }
}
