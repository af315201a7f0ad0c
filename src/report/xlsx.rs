//! Workbook layout: a `Data` sheet mirroring the joined table, a `Summary`
//! sheet with the labeled correlation cell, and a two-series line chart
//! embedded on the data sheet.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Chart, ChartLegendPosition, ChartType, Format, Workbook};
use tracing::info;

use crate::domain::{COL_DXY, COL_XAU, JoinedTable};
use crate::error::AppError;

/// Chart anchor on the data sheet (cell G2).
const CHART_ANCHOR_ROW: u32 = 1;
const CHART_ANCHOR_COL: u16 = 6;

/// Timestamped report filename, second precision.
///
/// Two renders within the same clock second produce the same name and the
/// later one overwrites the earlier. Accepted limitation; the bot serves
/// one report per command and does not rotate old files.
pub fn report_filename(now: DateTime<Local>) -> String {
    format!("xau_dxy_report_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// Render the joined table and correlation scalar into an `.xlsx` file
/// under `dir`, returning the full path of the written file.
///
/// The workbook is assembled in memory and saved once, so a failed save
/// surfaces as an error before any path is handed downstream. The table
/// must be non-empty.
pub fn render_report(
    dir: &Path,
    table: &JoinedTable,
    correlation: f64,
) -> Result<PathBuf, AppError> {
    if table.is_empty() {
        return Err(AppError::Render("nothing to render: joined table is empty".into()));
    }

    let path = dir.join(report_filename(Local::now()));
    let mut workbook = Workbook::new();

    // Data rows occupy sheet rows 1..=len, below one header row.
    let last_row = table.len() as u32;

    let mut chart = Chart::new(ChartType::Line);
    chart
        .add_series()
        .set_name(COL_XAU)
        .set_categories(("Data", 1, 0, last_row, 0))
        .set_values(("Data", 1, 1, last_row, 1));
    chart
        .add_series()
        .set_name(COL_DXY)
        .set_categories(("Data", 1, 0, last_row, 0))
        .set_values(("Data", 1, 2, last_row, 2));
    chart.title().set_name(&format!("{COL_XAU} vs {COL_DXY}"));
    chart.x_axis().set_name("Date");
    chart.y_axis().set_name("Price");
    chart.legend().set_position(ChartLegendPosition::Bottom);

    let data = workbook.add_worksheet().set_name("Data")?;
    data.write_string(0, 0, "Date")?;
    data.write_string(0, 1, COL_XAU)?;
    data.write_string(0, 2, COL_DXY)?;
    data.write_string(0, 3, format!("{COL_XAU}_Return"))?;
    data.write_string(0, 4, format!("{COL_DXY}_Return"))?;

    for (i, row) in table.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        data.write_string(r, 0, row.date.format("%Y-%m-%d").to_string())?;
        data.write_number(r, 1, row.xau_close)?;
        data.write_number(r, 2, row.dxy_close)?;
        // Undefined returns (the first row) stay blank.
        if let Some(v) = row.xau_return {
            data.write_number(r, 3, v)?;
        }
        if let Some(v) = row.dxy_return {
            data.write_number(r, 4, v)?;
        }
    }
    data.insert_chart(CHART_ANCHOR_ROW, CHART_ANCHOR_COL, &chart)?;

    let summary = workbook.add_worksheet().set_name("Summary")?;
    summary.write_string(0, 0, "Correlation")?;
    if correlation.is_nan() {
        // xlsx has no NaN number cell; zero-variance windows get a label.
        summary.write_string(0, 1, "NaN")?;
    } else {
        let corr_format = Format::new().set_num_format("0.0000");
        summary.write_number_with_format(0, 1, correlation, &corr_format)?;
    }
    summary.set_column_width(0, 40)?;
    summary.set_column_width(1, 12)?;

    workbook.save(&path)?;
    info!(path = %path.display(), rows = table.len(), "report written");

    Ok(path)
}
