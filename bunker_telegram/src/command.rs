use teloxide::types::BotCommand;

/// What to do with an incoming text message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Generate a fresh character card.
    GenerateCard,
    /// Send the scripted game-start prompt.
    StartGame,
    Help,
}

impl Route {
    /// Route by keyword. Matching is done on the lowercased text, and
    /// `/start` wins over `начать` when both appear.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();

        if text.contains("/start") {
            Self::GenerateCard
        } else if text.contains("начать") {
            Self::StartGame
        } else {
            Self::Help
        }
    }

    #[must_use]
    pub fn bot_commands() -> Vec<BotCommand> {
        vec![BotCommand {
            command: "start".to_string(),
            description: "Получить карточку персонажа".to_string(),
        }]
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        "Доступные команды:
- /start - получить карточку персонажа
- 'начать' - получить описание начального состояния игры"
    }

    #[must_use]
    pub const fn failure_text(self) -> &'static str {
        match self {
            Self::GenerateCard => {
                "Произошла ошибка при генерации карточки. Пожалуйста, попробуйте снова."
            }
            Self::StartGame => {
                "Произошла ошибка при генерации начального состояния. Пожалуйста, попробуйте снова."
            }
            Self::Help => Self::generic_failure_text(),
        }
    }

    #[must_use]
    pub const fn generic_failure_text() -> &'static str {
        "Произошла ошибка при обработке вашего запроса. Пожалуйста, попробуйте снова."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_routes_to_card() {
        assert_eq!(Route::from_text("/start"), Route::GenerateCard);
        assert_eq!(Route::from_text("/START@bunker_bot"), Route::GenerateCard);
        assert_eq!(Route::from_text("дай /start пожалуйста"), Route::GenerateCard);
    }

    #[test]
    fn test_begin_keyword_routes_to_start_game() {
        assert_eq!(Route::from_text("начать"), Route::StartGame);
        assert_eq!(Route::from_text("Давай НАЧАТЬ игру"), Route::StartGame);
    }

    #[test]
    fn test_start_command_takes_priority() {
        assert_eq!(Route::from_text("/start начать"), Route::GenerateCard);
    }

    #[test]
    fn test_everything_else_gets_help() {
        assert_eq!(Route::from_text("привет"), Route::Help);
        assert_eq!(Route::from_text(""), Route::Help);
        assert_eq!(Route::from_text("start"), Route::Help);
    }

    #[test]
    fn test_help_names_both_triggers() {
        assert!(Route::help_text().contains("/start"));
        assert!(Route::help_text().contains("начать"));
    }

    #[test]
    fn test_failure_texts_are_route_specific() {
        assert!(Route::GenerateCard.failure_text().contains("карточки"));
        assert!(Route::StartGame.failure_text().contains("начального состояния"));
        assert_eq!(Route::Help.failure_text(), Route::generic_failure_text());
    }
}
