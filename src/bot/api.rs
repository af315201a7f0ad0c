//! Minimal Telegram Bot API client.
//!
//! Only the four methods the bot needs: `deleteWebhook`, `getUpdates`,
//! `sendMessage`, and `sendDocument`. All calls are blocking; the polling
//! loop owns one client and worker threads clone it (the underlying
//! reqwest client is a shared handle, not a new connection pool).

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

const API_BASE: &str = "https://api.telegram.org";

/// Long-poll timeout passed to `getUpdates`, seconds.
pub const POLL_TIMEOUT_SECS: u64 = 50;

// HTTP timeout must outlive the long poll itself.
const HTTP_TIMEOUT_SECS: u64 = POLL_TIMEOUT_SECS + 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Telegram(format!("HTTP client init failed: {e}")))?;
        Ok(Self {
            client,
            base: format!("{API_BASE}/bot{token}"),
        })
    }

    /// Switch the bot to polling mode, discarding updates queued while it
    /// was offline.
    pub fn delete_webhook(&self) -> Result<(), AppError> {
        self.call::<bool>("deleteWebhook", &json!({ "drop_pending_updates": true }))?;
        Ok(())
    }

    /// Long-poll for incoming updates starting at `offset`.
    pub fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, AppError> {
        let mut body = json!({
            "timeout": POLL_TIMEOUT_SECS,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        self.call("getUpdates", &body)
    }

    pub fn send_message(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
        self.call::<Message>("sendMessage", &json!({ "chat_id": chat_id, "text": text }))?;
        Ok(())
    }

    /// Upload a local file as a document, with a caption.
    pub fn send_document(&self, chat_id: i64, path: &Path, caption: &str) -> Result<(), AppError> {
        let form = multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .file("document", path)
            .map_err(|e| {
                AppError::Telegram(format!("failed to attach '{}': {e}", path.display()))
            })?;

        let resp = self
            .client
            .post(format!("{}/sendDocument", self.base))
            .multipart(form)
            .send()
            .map_err(|e| AppError::Telegram(format!("sendDocument failed: {e}")))?;

        Self::decode::<Message>(resp, "sendDocument")?;
        Ok(())
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, AppError> {
        let resp = self
            .client
            .post(format!("{}/{method}", self.base))
            .json(body)
            .send()
            .map_err(|e| AppError::Telegram(format!("{method} failed: {e}")))?;
        Self::decode(resp, method)
    }

    fn decode<T: DeserializeOwned>(
        resp: reqwest::blocking::Response,
        method: &str,
    ) -> Result<T, AppError> {
        let status = resp.status();
        let body: ApiResponse<T> = resp.json().map_err(|e| {
            AppError::Telegram(format!("{method} returned an unreadable body ({status}): {e}"))
        })?;

        if !body.ok {
            return Err(AppError::Telegram(format!(
                "{method} rejected: {}",
                body.description.unwrap_or_else(|| status.to_string())
            )));
        }
        body.result
            .ok_or_else(|| AppError::Telegram(format!("{method} returned no result")))
    }
}
