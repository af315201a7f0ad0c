//! Yahoo Finance chart API integration for daily close series.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::AppError;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// Yahoo rejects requests carrying reqwest's default User-Agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::DataUnavailable(format!("HTTP client init failed: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch daily closing prices for `symbol` over `[start, end]`.
    ///
    /// Observations with a null close are skipped. The result is sorted by
    /// date ascending with one close per date. An empty result is not an
    /// error here; the loader decides whether emptiness is fatal.
    pub fn fetch_daily_closes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(NaiveDate, f64)>, AppError> {
        let url = format!("{BASE_URL}/{symbol}");
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("period1", start.timestamp().to_string()),
                ("period2", end.timestamp().to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .map_err(|e| AppError::DataUnavailable(format!("request for {symbol} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::DataUnavailable(format!(
                "request for {symbol} failed with status {}",
                resp.status()
            )));
        }

        let body: ChartResponse = resp.json().map_err(|e| {
            AppError::DataUnavailable(format!("failed to parse response for {symbol}: {e}"))
        })?;

        parse_chart(body, symbol)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    close: Option<Vec<Option<f64>>>,
}

/// Extract `(date, close)` observations from a chart payload.
fn parse_chart(body: ChartResponse, symbol: &str) -> Result<Vec<(NaiveDate, f64)>, AppError> {
    if let Some(err) = body.chart.error {
        return Err(AppError::DataUnavailable(format!(
            "{symbol}: {} ({})",
            err.description, err.code
        )));
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| {
            AppError::DataUnavailable(format!("no chart data returned for {symbol}"))
        })?;

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    let mut out = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.into_iter().zip(closes) {
        let Some(close) = close else { continue };
        if !close.is_finite() {
            continue;
        }
        let Some(dt) = DateTime::from_timestamp(ts, 0) else {
            continue;
        };
        out.push((dt.date_naive(), close));
    }

    // Yahoo sends observations in order, but the join depends on it, so
    // enforce ascending dates and one close per date ourselves.
    out.sort_by_key(|(d, _)| *d);
    out.dedup_by_key(|(d, _)| *d);

    Ok(out)
}
