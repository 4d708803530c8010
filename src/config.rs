//! # Configuration Module
//!
//! Reads the bot settings from environment variables (a `.env` file is
//! loaded by `main` before this runs).

use crate::selection::SelectionScope;

pub const TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const LEGACY_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const SCOPE_VAR: &str = "SELECTION_SCOPE";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No bot token in the environment
    MissingToken,
    /// `SELECTION_SCOPE` holds an unknown value
    InvalidScope(String),
    /// `LOG_FORMAT` holds an unknown value
    InvalidLogFormat(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingToken => write!(f, "{TOKEN_VAR} environment variable not set"),
            ConfigError::InvalidScope(value) => {
                write!(f, "Invalid {SCOPE_VAR} '{value}', expected 'global' or 'chat'")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "Invalid {LOG_FORMAT_VAR} '{value}', expected 'text' or 'json'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }

    /// Log format from the environment; unknown values fall back to text
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// Settings the bot needs to start
#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub telegram_token: String,
    pub selection_scope: SelectionScope,
    pub log_format: LogFormat,
}

// Keep the token out of logs
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &"<redacted>")
            .field("selection_scope", &self.selection_scope)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl BotConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through a key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let telegram_token = non_empty(TOKEN_VAR)
            .or_else(|| non_empty(LEGACY_TOKEN_VAR))
            .ok_or(ConfigError::MissingToken)?;

        let selection_scope = match non_empty(SCOPE_VAR) {
            Some(value) => {
                SelectionScope::parse(&value).ok_or(ConfigError::InvalidScope(value))?
            }
            None => SelectionScope::default(),
        };

        let log_format = match non_empty(LOG_FORMAT_VAR) {
            Some(value) => LogFormat::parse(&value).ok_or(ConfigError::InvalidLogFormat(value))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            telegram_token: telegram_token.trim().to_string(),
            selection_scope,
            log_format,
        })
    }
}
