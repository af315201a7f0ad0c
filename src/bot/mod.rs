//! Telegram delivery shell: long-poll loop and command dispatch.
//!
//! The polling thread only parses commands and sends acknowledgements;
//! each report request runs on its own worker thread so a slow fetch or
//! render never blocks other chats.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::app::pipeline;
use crate::config::BotConfig;
use crate::error::AppError;

pub mod api;

use api::TelegramClient;

const START_REPLY: &str = "Command: /xau_dxy";
const ACK_REPLY: &str = "Generating the report...";

/// Pause after a failed poll before retrying.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Start the bot and poll until the process is killed.
pub fn run(config: &BotConfig) -> Result<(), AppError> {
    let token = config.require_token()?;
    let client = TelegramClient::new(token)?;
    client.delete_webhook()?;
    info!("bot started, long-polling for commands");

    let mut offset = None;
    loop {
        let updates = match client.get_updates(offset) {
            Ok(updates) => updates,
            Err(err) => {
                warn!(%err, "getUpdates failed");
                thread::sleep(POLL_RETRY_DELAY);
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            let Some(message) = update.message else { continue };
            let Some(text) = message.text.as_deref() else { continue };
            let chat_id = message.chat.id;

            match parse_command(text) {
                Some("start") => {
                    if let Err(err) = client.send_message(chat_id, START_REPLY) {
                        warn!(%err, chat_id, "failed to send /start reply");
                    }
                }
                Some("xau_dxy") => {
                    handle_report_request(&client, chat_id, config.report_dir.clone());
                }
                _ => {}
            }
        }
    }
}

/// Acknowledge the request, then run the pipeline on a worker thread.
///
/// On success the worker replies with the document and a correlation
/// caption; on any pipeline error it replies with the error's message
/// text. A failure in one chat never affects another.
fn handle_report_request(client: &TelegramClient, chat_id: i64, report_dir: PathBuf) {
    if let Err(err) = client.send_message(chat_id, ACK_REPLY) {
        warn!(%err, chat_id, "failed to acknowledge report request");
    }

    let client = client.clone();
    thread::spawn(move || match pipeline::run_report(&report_dir) {
        Ok(run) => {
            let caption = format!("Correlation: {:.4}", run.correlation);
            if let Err(err) = client.send_document(chat_id, &run.path, &caption) {
                error!(%err, chat_id, "failed to deliver report");
                let _ = client.send_message(chat_id, &err.to_string());
            } else {
                info!(chat_id, path = %run.path.display(), "report delivered");
            }
        }
        Err(err) => {
            info!(%err, chat_id, "report pipeline failed");
            if let Err(send_err) = client.send_message(chat_id, &err.to_string()) {
                error!(%send_err, chat_id, "failed to deliver error reply");
            }
        }
    });
}

/// Extract the command name from a message, tolerating the `@botname`
/// suffix Telegram appends in group chats.
fn parse_command(text: &str) -> Option<&str> {
    let first = text.trim().split_whitespace().next()?;
    let cmd = first.strip_prefix('/')?;
    cmd.split('@').next().filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_suffixed_commands() {
        assert_eq!(parse_command("/xau_dxy"), Some("xau_dxy"));
        assert_eq!(parse_command("/xau_dxy@gold_corr_bot"), Some("xau_dxy"));
        assert_eq!(parse_command("  /start now"), Some("start"));
    }

    #[test]
    fn rejects_non_commands() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("/"), None);
    }
}
