use crate::{Result, Route, TelegramBot};
use teloxide::{
    requests::Requester,
    types::{ChatAction, Message},
};
use tracing::{info, warn};

/// Telegram's limit on the length of one text message.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Split `text` into chunks of at most `limit` characters, preferring line
/// boundaries. Blank input yields no chunks.
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks.retain(|chunk| !chunk.trim().is_empty());
    chunks
}

/// Handle one incoming message.
pub async fn handle_message(bot: TelegramBot, msg: Message) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    if !bot.is_allowed(chat_id.0) {
        warn!(
            "[@{username}] Ignoring message from chat {} (not in allow list)",
            chat_id.0
        );
        return Ok(());
    }

    let route = Route::from_text(text);
    info!("[@{username}] Message: {text} -> {route:?}");

    if route != Route::Help {
        if let Err(e) = bot.bot.send_chat_action(chat_id, ChatAction::Typing).await {
            warn!("Failed to send typing indicator: {e}");
        }
    }

    let reply = bot.service.answer(route).await;

    for chunk in split_message(&reply, MAX_MESSAGE_LEN) {
        bot.bot.send_message(chat_id, chunk).await?;
    }

    info!("[@{username}] Reply sent for {route:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_message("Профессия: Врач", 4096), ["Профессия: Врач"]);
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(split_message("", 10).is_empty());
        assert!(split_message("  \n ", 10).is_empty());
    }

    #[test]
    fn test_splits_on_line_boundaries() {
        let chunks = split_message("аааа\nбббб\nвввв", 10);
        assert_eq!(chunks, ["аааа\nбббб\n", "вввв"]);
    }

    #[test]
    fn test_long_line_is_hard_split() {
        let text = "я".repeat(25);
        let chunks = split_message(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks.concat(), text);
    }
}
