use bunker_config::Config;

/// Strategy for initializing the configuration.
///
/// Creates the default configuration file at `~/bunker/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Put TELEGRAM_TOKEN and GEMINI_API_KEY into .env or the config file");
        println!("   2. Run 'bunker card' to check the Gemini connection");
        println!("   3. Run 'bunker telegram' to start the bot");
        println!();
        Ok(())
    }
}
