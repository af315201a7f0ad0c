//! Shared report pipeline used by both the bot and the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! Yahoo fetch -> date join -> returns -> correlation -> xlsx render
//!
//! The bot and the CLI can then focus on delivery (chat replies vs stdout).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use crate::data::YahooClient;
use crate::domain::{DXY_TICKER, HISTORY_DAYS, JoinedRow, JoinedTable, XAU_TICKER};
use crate::error::AppError;
use crate::math::{pearson, simple_returns};

/// All outputs of a single report run.
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub path: PathBuf,
    pub correlation: f64,
    pub rows: usize,
}

/// Execute the full pipeline: fetch both series, join, correlate, render.
pub fn run_report(report_dir: &Path) -> Result<ReportRun, AppError> {
    let (table, correlation) = fetch_series_pair()?;
    let path = crate::report::render_report(report_dir, &table, correlation)?;
    Ok(ReportRun {
        path,
        correlation,
        rows: table.len(),
    })
}

/// Fetch both close series over the trailing window and reduce them to the
/// joined table plus the return-correlation scalar.
///
/// Fetches are sequential and not retried; an empty series from either
/// instrument is terminal for the invocation.
pub fn fetch_series_pair() -> Result<(JoinedTable, f64), AppError> {
    let client = YahooClient::new()?;
    let end = Utc::now();
    let start = end - Duration::days(HISTORY_DAYS);

    let xau = client.fetch_daily_closes(XAU_TICKER, start, end)?;
    let dxy = client.fetch_daily_closes(DXY_TICKER, start, end)?;
    info!(xau = xau.len(), dxy = dxy.len(), "fetched daily close series");

    correlate_series(&xau, &dxy)
}

/// Reduce two fetched series to the joined table and its return
/// correlation. An empty series on either side is terminal.
pub fn correlate_series(
    xau: &[(NaiveDate, f64)],
    dxy: &[(NaiveDate, f64)],
) -> Result<(JoinedTable, f64), AppError> {
    if xau.is_empty() || dxy.is_empty() {
        return Err(AppError::DataUnavailable(format!(
            "no daily closes for {} in the requested window",
            if xau.is_empty() { XAU_TICKER } else { DXY_TICKER }
        )));
    }

    let table = join_series(xau, dxy);
    if table.is_empty() {
        return Err(AppError::DataUnavailable(
            "the two series share no observation dates".into(),
        ));
    }

    let correlation = pearson(&table.return_pairs());
    Ok((table, correlation))
}

/// Inner-join two `(date, close)` series and derive the return columns.
///
/// Only dates present in both inputs survive. The first surviving row's
/// returns are `None`; it stays in the table (and on the data sheet) and
/// the pairwise-complete correlation skips it.
pub fn join_series(xau: &[(NaiveDate, f64)], dxy: &[(NaiveDate, f64)]) -> JoinedTable {
    let dxy_by_date: HashMap<NaiveDate, f64> = dxy.iter().copied().collect();

    let mut joined: Vec<(NaiveDate, f64, f64)> = xau
        .iter()
        .filter_map(|&(date, x)| dxy_by_date.get(&date).map(|&y| (date, x, y)))
        .collect();
    joined.sort_by_key(|&(date, _, _)| date);

    let xau_closes: Vec<f64> = joined.iter().map(|&(_, x, _)| x).collect();
    let dxy_closes: Vec<f64> = joined.iter().map(|&(_, _, y)| y).collect();
    let xau_returns = simple_returns(&xau_closes);
    let dxy_returns = simple_returns(&dxy_closes);

    let rows = joined
        .into_iter()
        .zip(xau_returns.into_iter().zip(dxy_returns))
        .map(|((date, xau_close, dxy_close), (xau_return, dxy_return))| JoinedRow {
            date,
            xau_close,
            dxy_close,
            xau_return,
            dxy_return,
        })
        .collect();

    JoinedTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn join_keeps_only_shared_dates_in_order() {
        // Deliberately unsorted input; day 3 is missing on the DXY side.
        let xau = vec![(d(2), 101.0), (d(1), 100.0), (d(3), 99.0), (d(4), 98.0)];
        let dxy = vec![(d(4), 91.0), (d(1), 90.0), (d(2), 90.0)];

        let table = join_series(&xau, &dxy);
        let dates: Vec<NaiveDate> = table.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(1), d(2), d(4)]);
        assert!(table.len() <= xau.len().min(dxy.len()));
    }

    #[test]
    fn first_row_returns_are_undefined() {
        let xau = vec![(d(1), 100.0), (d(2), 101.0)];
        let dxy = vec![(d(1), 90.0), (d(2), 91.0)];

        let table = join_series(&xau, &dxy);
        assert!(table.rows[0].xau_return.is_none());
        assert!(table.rows[0].dxy_return.is_none());
        assert!((table.rows[1].xau_return.unwrap() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn returns_are_computed_over_joined_rows_not_raw_series() {
        // Day 2 exists only on the XAU side, so the day-3 XAU return must be
        // taken against day 1, the previous joined row.
        let xau = vec![(d(1), 100.0), (d(2), 150.0), (d(3), 110.0)];
        let dxy = vec![(d(1), 90.0), (d(3), 91.0)];

        let table = join_series(&xau, &dxy);
        assert_eq!(table.len(), 2);
        assert!((table.rows[1].xau_return.unwrap() - 0.10).abs() < 1e-9);
    }

    #[test]
    fn reference_scenario_correlates_negatively() {
        let xau = vec![(d(1), 100.0), (d(2), 101.0), (d(3), 99.0)];
        let dxy = vec![(d(1), 90.0), (d(2), 90.0), (d(3), 91.0)];

        let table = join_series(&xau, &dxy);
        let pairs = table.return_pairs();
        assert_eq!(pairs.len(), 2);
        assert!((pearson(&pairs) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_series_join_to_empty_table() {
        let xau = vec![(d(1), 100.0)];
        let dxy = vec![(d(2), 90.0)];
        assert!(join_series(&xau, &dxy).is_empty());

        let err = correlate_series(&xau, &dxy).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[test]
    fn empty_series_is_data_unavailable() {
        let some = vec![(d(1), 100.0), (d(2), 101.0)];

        let err = correlate_series(&[], &some).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));

        let err = correlate_series(&some, &[]).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }
}
