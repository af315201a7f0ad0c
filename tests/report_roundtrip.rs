//! Render a small joined table and read the workbook back to check the
//! data sheet mirrors the input and the summary cell carries the
//! correlation.

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;

use xau_dxy_bot::app::pipeline::join_series;
use xau_dxy_bot::math::pearson;
use xau_dxy_bot::report::render_report;

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
}

fn temp_dir(suffix: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("xaubot-{}-{suffix}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn data_sheet_round_trips_rows_and_closes() {
    let xau = vec![(d(3), 100.0), (d(4), 101.0), (d(5), 99.0), (d(6), 102.5)];
    let dxy = vec![(d(3), 90.0), (d(4), 90.0), (d(5), 91.0), (d(6), 90.5)];
    let table = join_series(&xau, &dxy);
    let correlation = pearson(&table.return_pairs());

    let dir = temp_dir("roundtrip");
    let path = render_report(&dir, &table, correlation).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("xau_dxy_report_"), "unexpected name: {name}");
    assert!(name.ends_with(".xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();

    let data = workbook.worksheet_range("Data").unwrap();
    // One header row plus one row per joined entry.
    assert_eq!(data.height(), table.len() + 1);
    assert_eq!(data.get_value((0, 0)), Some(&Data::String("Date".into())));
    assert_eq!(data.get_value((0, 1)), Some(&Data::String("XAUUSD".into())));
    assert_eq!(data.get_value((0, 2)), Some(&Data::String("DXY".into())));

    for (i, row) in table.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        let date = match data.get_value((r, 0)) {
            Some(Data::String(s)) => s.clone(),
            other => panic!("expected date string at row {r}, got {other:?}"),
        };
        assert_eq!(date, row.date.format("%Y-%m-%d").to_string());

        let xau_close = match data.get_value((r, 1)) {
            Some(Data::Float(v)) => *v,
            other => panic!("expected close at row {r}, got {other:?}"),
        };
        assert!((xau_close - row.xau_close).abs() < 1e-9);

        let dxy_close = match data.get_value((r, 2)) {
            Some(Data::Float(v)) => *v,
            other => panic!("expected close at row {r}, got {other:?}"),
        };
        assert!((dxy_close - row.dxy_close).abs() < 1e-9);
    }

    // The first data row has no defined returns, so its return cells are blank.
    let first_return = data.get_value((1, 3));
    assert!(
        matches!(first_return, None | Some(Data::Empty)),
        "expected blank return cell, got {first_return:?}"
    );

    let summary = workbook.worksheet_range("Summary").unwrap();
    assert_eq!(summary.get_value((0, 0)), Some(&Data::String("Correlation".into())));
    match summary.get_value((0, 1)) {
        Some(Data::Float(v)) => assert!((v - correlation).abs() < 1e-9),
        other => panic!("expected correlation cell, got {other:?}"),
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn nan_correlation_renders_as_label() {
    // A single return pair is below the two-pair minimum, so the
    // correlation is NaN and the summary cell falls back to a label.
    let xau = vec![(d(3), 100.0), (d(4), 101.0)];
    let dxy = vec![(d(3), 90.0), (d(4), 91.0)];
    let table = join_series(&xau, &dxy);
    let correlation = pearson(&table.return_pairs());
    assert!(correlation.is_nan());

    let dir = temp_dir("nan");
    let path = render_report(&dir, &table, correlation).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let summary = workbook.worksheet_range("Summary").unwrap();
    assert_eq!(summary.get_value((0, 1)), Some(&Data::String("NaN".into())));

    std::fs::remove_dir_all(&dir).ok();
}
