use bunker_cards::{AgeConfig, GeneratorConfig};
use bunker_core::{CompletionConfig, DEFAULT_START_PROMPT, DEFAULT_SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ConfigError, Result};

pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    /// Chat IDs allowed to use the bot; empty allows everyone.
    #[serde(default)]
    pub allow_from: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "GeminiConfig::default_model")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "GeminiConfig::default_temperature")]
    pub temperature: f32,
    #[serde(default = "GeminiConfig::default_max_retries")]
    pub max_retries: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: Self::default_model(),
            base_url: None,
            temperature: Self::default_temperature(),
            max_retries: Self::default_max_retries(),
        }
    }
}

impl GeminiConfig {
    fn default_model() -> String {
        "gemini-2.0-flash".to_string()
    }

    const fn default_temperature() -> f32 {
        0.9
    }

    const fn default_max_retries() -> usize {
        3
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PromptsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

impl Config {
    /// `~/bunker/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn config_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(ConfigError::HomeDir)?.join("bunker"))
    }

    /// Load the config file if it exists and apply environment overrides.
    ///
    /// The result is not validated; call [`Config::validate`] or
    /// [`Config::validate_backend`] depending on what will run.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            info!("Loading config from {}", path.display());
            Self::from_file(&path)?
        } else {
            info!(
                "No config file at {}, using defaults and environment",
                path.display()
            );
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Override file values with non-empty variables from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = lookup(TELEGRAM_TOKEN_VAR) {
            self.telegram.token = token;
        }
        if let Some(api_key) = lookup(GEMINI_API_KEY_VAR) {
            self.gemini.api_key = api_key;
        }
        if let Some(model) = lookup(GEMINI_MODEL_VAR) {
            self.gemini.model = model;
        }
    }

    /// Check secrets and ranges. Both secrets are required.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.token.trim().is_empty() {
            return Err(ConfigError::MissingSecret(TELEGRAM_TOKEN_VAR));
        }
        self.validate_backend()
    }

    /// Checks needed when running without Telegram.
    pub fn validate_backend(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(ConfigError::MissingSecret(GEMINI_API_KEY_VAR));
        }

        let age = &self.generator.age;
        if !age.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "generator.age must satisfy min <= max and span at most {} ages, got {}..={}",
                AgeConfig::MAX_SPAN,
                age.min,
                age.max
            )));
        }

        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(ConfigError::Invalid(format!(
                "gemini.temperature must be within 0.0..=2.0, got {}",
                self.gemini.temperature
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn system_prompt(&self) -> &str {
        self.prompts.system.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    #[must_use]
    pub fn start_prompt(&self) -> &str {
        self.prompts.start.as_deref().unwrap_or(DEFAULT_START_PROMPT)
    }

    #[must_use]
    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            model: self.gemini.model.clone(),
            system_instruction: self.system_prompt().to_string(),
            temperature: self.gemini.temperature,
        }
    }

    /// Write a config template to `~/bunker/config.json`.
    pub fn create_config() -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            return Err(ConfigError::Invalid(format!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            )));
        }

        let config_template = r#"{
  "telegram": {
    "token": "",
    "allow_from": []
  },
  "gemini": {
    "api_key": "",
    "model": "gemini-2.0-flash",
    "temperature": 0.9,
    "max_retries": 3
  },
  "generator": {
    "age": {
      "min": 9,
      "max": 70,
      "on_exhausted": "fail"
    },
    "request_timeout_secs": 120
  }
}"#;

        std::fs::write(&config_path, config_template)?;
        Ok(config_path)
    }
}
