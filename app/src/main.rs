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

mod command;

use clap::{Parser, Subcommand};
use command::{
    CardInput, CardStrategy, CommandStrategy, InitStrategy, StartInput, StartStrategy,
    TelegramInput, TelegramStrategy, VersionStrategy,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bunker")]
#[command(about = "Character card bot for the Bunker party game", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/bunker/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot
    Telegram {
        /// Bot token (overrides TELEGRAM_TOKEN and config)
        #[arg(short, long)]
        token: Option<String>,

        /// Allowed chat IDs, comma separated
        #[arg(short, long, value_delimiter = ',')]
        allow_from: Option<Vec<String>>,
    },
    /// Generate character cards to stdout
    Card {
        /// Number of cards
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Print the opening of a new game
    Start,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to read .env: {e}"),
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Telegram { token, allow_from } => {
            TelegramStrategy
                .execute(TelegramInput {
                    config_path: cli.config,
                    token,
                    allow_from,
                })
                .await
        }
        Commands::Card { count } => {
            CardStrategy
                .execute(CardInput {
                    config_path: cli.config,
                    count,
                })
                .await
        }
        Commands::Start => {
            StartStrategy
                .execute(StartInput {
                    config_path: cli.config,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
