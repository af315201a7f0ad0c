//! Environment-backed configuration.
//!
//! The bot credential is read once at startup and passed explicitly into
//! the Telegram client constructor; the data pipeline never sees it.

use std::path::PathBuf;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token (`BOT_TOKEN`). Only the `run` command needs it.
    pub token: Option<String>,
    /// Directory for generated reports (`REPORT_DIR`, default `.`).
    pub report_dir: PathBuf,
}

impl BotConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let token = std::env::var("BOT_TOKEN").ok().filter(|t| !t.is_empty());
        let report_dir = std::env::var("REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Self { token, report_dir }
    }

    /// The token, or a `Config` error when the environment never provided one.
    pub fn require_token(&self) -> Result<&str, AppError> {
        self.token
            .as_deref()
            .ok_or_else(|| AppError::Config("BOT_TOKEN is not set in the environment (.env)".into()))
    }
}
