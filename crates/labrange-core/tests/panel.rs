//! Panel history evaluation.

use chrono::NaiveDate;
use labrange_core::{
    PanelError, PanelRecord, RangeClassifier, read_panel_path, read_panel_reader,
};
use labrange_model::{Band, RawValue};
use labrange_standards::RangeTable;

const PANEL: &str = "\
Date,Biomarker,Value,Unit
2024-06-02,RBC (X10*12),4.9,x10^12/L
2024-01-15,RBC (X10*12),4.0,x10^12/L
2024-01-15,ALT (IU/L),#N/A,IU/L
2024-06-02,ALT (IU/L),20,IU/L
15/01/2024,eGFR (Ml/min/1.73m2,85,
2024-06-02,TSH,,mIU/L
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn evaluate(panel: &str) -> labrange_core::PanelReport {
    let records = read_panel_reader(panel.as_bytes()).expect("read panel");
    RangeClassifier::new(RangeTable::embedded().unwrap()).evaluate_panel(&records)
}

#[test]
fn reads_rows_and_blank_values() {
    let records = read_panel_reader(PANEL.as_bytes()).unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[4].drawn_on, date(2024, 1, 15));
    assert_eq!(records[5].value, None);
    assert_eq!(records[2].value.as_deref(), Some("#N/A"));
}

#[test]
fn draws_are_distinct_and_sorted() {
    let report = evaluate(PANEL);
    assert_eq!(report.draws, vec![date(2024, 1, 15), date(2024, 6, 2)]);
}

#[test]
fn series_keep_first_appearance_order() {
    let report = evaluate(PANEL);
    let labels: Vec<&str> = report.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["RBC (X10*12)", "ALT (IU/L)", "eGFR (Ml/min/1.73m2", "TSH"]
    );
    assert_eq!(report.series[0].biomarker.as_deref(), Some("RBC"));
    assert_eq!(report.series[2].biomarker, None);
}

#[test]
fn points_are_sorted_and_classified() {
    let report = evaluate(PANEL);
    let rbc = &report.series[0];
    assert_eq!(rbc.points[0].drawn_on, date(2024, 1, 15));
    assert_eq!(rbc.points[0].classification.band, Band::Low);
    assert_eq!(rbc.points[1].classification.band, Band::OutOfRange);
    assert_eq!(rbc.points[0].change_pct, None);
    let change = rbc.points[1].change_pct.expect("change from previous draw");
    assert!((change - 22.5).abs() < 1e-9);
}

#[test]
fn change_skips_non_numeric_draws() {
    let report = evaluate(PANEL);
    let alt = &report.series[1];
    assert_eq!(alt.points[0].value, RawValue::Missing);
    assert_eq!(alt.points[1].classification.band, Band::Normal);
    assert_eq!(alt.points[1].change_pct, None);
    assert!(alt.point_on(date(2024, 6, 2)).is_some());
    assert!(report.series[3].point_on(date(2024, 1, 15)).is_none());
}

#[test]
fn counts_cover_all_and_latest_points() {
    let report = evaluate(PANEL);
    assert_eq!(report.counts.total(), 6);
    assert_eq!(report.counts.low, 1);
    assert_eq!(report.counts.normal, 1);
    assert_eq!(report.counts.out_of_range, 1);
    assert_eq!(report.counts.unknown, 1);
    assert_eq!(report.counts.missing, 2);

    assert_eq!(report.latest.total(), 4);
    assert_eq!(report.latest.get(Band::Missing), 1);
    assert_eq!(report.out_of_range(), 1);
}

#[test]
fn invalid_date_reports_line() {
    let panel = "Date,Biomarker,Value\n2024-01-15,ALT,20\nyesterday,ALT,25\n";
    let err = read_panel_reader(panel.as_bytes()).unwrap_err();
    assert!(matches!(err, PanelError::InvalidDate { line: 3, value } if value == "yesterday"));
}

#[test]
fn empty_biomarker_is_rejected() {
    let panel = "Date,Biomarker,Value\n2024-01-15,,20\n";
    let err = read_panel_reader(panel.as_bytes()).unwrap_err();
    assert!(matches!(err, PanelError::EmptyBiomarker { line: 2 }));
}

#[test]
fn missing_column_is_csv_error() {
    let panel = "Date,Value\n2024-01-15,20\n";
    let err = read_panel_reader(panel.as_bytes()).unwrap_err();
    assert!(matches!(err, PanelError::Csv(_)));
}

#[test]
fn reads_panel_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panel.csv");
    std::fs::write(&path, PANEL).unwrap();
    assert_eq!(read_panel_path(&path).unwrap().len(), 6);

    let err = read_panel_path(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, PanelError::Io { .. }));
}

#[test]
fn report_serializes_to_json() {
    let report = evaluate(PANEL);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["draws"][0], "2024-01-15");
    assert_eq!(json["series"][0]["points"][1]["classification"]["band"], "out_of_range");
    assert_eq!(json["series"][1]["points"][0]["value"]["kind"], "missing");
    assert_eq!(json["latest"]["out_of_range"], 1);
}

#[test]
fn series_labels_are_matched_as_given() {
    let records = vec![PanelRecord {
        drawn_on: date(2024, 1, 15),
        biomarker: "MCH ".to_string(),
        value: Some("29".to_string()),
    }];
    let report = RangeClassifier::new(RangeTable::embedded().unwrap()).evaluate_panel(&records);
    let series = &report.series[0];
    assert_eq!(series.label, "MCH ");
    assert_eq!(series.biomarker.as_deref(), Some("MCH"));
    assert_eq!(series.points[0].classification.band, Band::Normal);
}
