//! Joined price table and instrument constants.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built from freshly fetched series without copies
//! - iterated by the renderer row by row
//! - constructed directly in tests

use chrono::NaiveDate;

/// Trailing fetch window in days.
pub const HISTORY_DAYS: i64 = 365;

/// Yahoo Finance ticker for the gold spot proxy.
pub const XAU_TICKER: &str = "XAUUSD=X";

/// Yahoo Finance ticker for the US dollar index.
pub const DXY_TICKER: &str = "^DXY";

/// Report column label for the gold close series.
pub const COL_XAU: &str = "XAUUSD";

/// Report column label for the dollar index close series.
pub const COL_DXY: &str = "DXY";

/// One dated observation with both closes present.
///
/// Returns are simple day-over-day percentage changes against the previous
/// row of the same table. The first row has no prior day, so its returns
/// are `None`; the renderer leaves those cells blank and the correlation
/// skips the row (pairwise-complete).
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub date: NaiveDate,
    pub xau_close: f64,
    pub dxy_close: f64,
    pub xau_return: Option<f64>,
    pub dxy_return: Option<f64>,
}

/// Inner join of the two price series on date, ascending.
///
/// Invariants:
/// - rows are strictly ordered by date ascending
/// - row count <= min of the input series lengths
/// - only dates present in both inputs appear
#[derive(Debug, Clone, Default)]
pub struct JoinedTable {
    pub rows: Vec<JoinedRow>,
}

impl JoinedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows where both return columns are defined, as `(xau, dxy)` pairs.
    pub fn return_pairs(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|r| match (r.xau_return, r.dxy_return) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .collect()
    }
}
