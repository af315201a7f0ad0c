use thiserror::Error;

/// All errors surfaced by the bot.
///
/// Every variant carries a human-readable message because the delivery shell
/// replies to the requesting chat with the error's `Display` text verbatim.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// An upstream market-data series came back empty or could not be
    /// fetched. Terminal for the invocation; there is no retry.
    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    /// Writing the spreadsheet report failed. The failure is raised before
    /// any file path is handed downstream.
    #[error("report render failed: {0}")]
    Render(String),

    /// Missing or invalid environment configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Telegram Bot API transport or status failure. Only produced by the
    /// delivery shell, never by the data pipeline.
    #[error("telegram api error: {0}")]
    Telegram(String),
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Render(err.to_string())
    }
}
