use crate::{CardService, Error, Route};
use std::time::Duration;
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Wait before the next `getMe` attempt: 2s more per failure, capped at 10s.
fn reconnect_delay(attempt: u64) -> Duration {
    Duration::from_secs(attempt.saturating_mul(2).min(10))
}

/// Telegram front end for [`CardService`].
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    pub(crate) service: CardService,
    /// Allowed chat IDs
    allowed_chats: Vec<i64>,
}

impl TelegramBot {
    /// Create a new Telegram bot
    #[must_use]
    pub fn new(token: String, service: CardService, allowed_chats: &[String]) -> Self {
        let allowed_chats = allowed_chats
            .iter()
            .filter_map(|s| match s.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Ignoring invalid chat id in allow list: {s}");
                    None
                }
            })
            .collect();

        Self {
            bot: Bot::new(token),
            service,
            allowed_chats,
        }
    }

    /// Check if a chat is allowed
    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }

    /// Block until `getMe` succeeds.
    async fn wait_for_telegram(&self) {
        for attempt in 1u64.. {
            match self.bot.get_me().await {
                Ok(me) => {
                    let name = me.user.username.as_deref().unwrap_or("unnamed");
                    info!("Bunker bot online as @{name}");
                    return;
                }
                Err(e) => {
                    let delay = reconnect_delay(attempt);
                    warn!(
                        "Telegram unreachable (attempt {attempt}): {e}. \
                         Check TELEGRAM_TOKEN and access to api.telegram.org; \
                         retrying in {delay:?}"
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    /// Run the bot until Ctrl+C.
    pub async fn run(self) {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        self.wait_for_telegram().await;

        if let Err(e) = self.bot.set_my_commands(Route::bot_commands()).await {
            warn!("Failed to register bot commands: {e}");
        }

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let bot_clone = self.clone();
            move |_bot: Bot, msg: Message| {
                let bot_clone = bot_clone.clone();
                async move {
                    let chat_id = msg.chat.id;
                    let handled = crate::handler::handle_message(bot_clone.clone(), msg).await;
                    if let Err(e) = handled {
                        error!("Error while handling message: {e}");
                        if let Err(e) = bot_clone
                            .bot
                            .send_message(chat_id, Route::generic_failure_text())
                            .await
                        {
                            warn!("Failed to send failure notice: {e}");
                        }
                    }
                    Ok::<(), Error>(())
                }
            }
        }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}
