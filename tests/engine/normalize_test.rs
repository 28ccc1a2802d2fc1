//! Tests for percent-of-whole normalization.

use mosaic::engine::normalize::{normalize, percent_of_whole};
use mosaic::visual::{ChartKind, ResultRow};

fn row(name: &str, a: f64, b: f64) -> ResultRow {
    ResultRow::new(name).with_value("a", a).with_value("b", b)
}

#[test]
fn test_row_already_summing_to_100_is_unchanged() {
    let out = percent_of_whole(&[row("x", 30.0, 70.0)]);
    assert_eq!(out[0].get("a"), Some(30.0));
    assert_eq!(out[0].get("b"), Some(70.0));
}

#[test]
fn test_zero_total_row_stays_zero() {
    let out = percent_of_whole(&[row("x", 0.0, 0.0)]);
    assert_eq!(out[0].get("a"), Some(0.0));
    assert_eq!(out[0].get("b"), Some(0.0));
}

#[test]
fn test_shares_are_relative_to_row_total() {
    let out = percent_of_whole(&[row("x", 1.0, 3.0)]);
    assert_eq!(out[0].get("a"), Some(25.0));
    assert_eq!(out[0].get("b"), Some(75.0));
}

#[test]
fn test_single_measure_becomes_100() {
    let out = percent_of_whole(&[ResultRow::new("x").with_value("a", 42.0)]);
    assert_eq!(out[0].get("a"), Some(100.0));
}

#[test]
fn test_input_rows_are_not_modified() {
    let input = vec![row("x", 1.0, 3.0)];
    let _ = percent_of_whole(&input);
    assert_eq!(input[0].get("a"), Some(1.0));
}

#[test]
fn test_only_percent_charts_normalize() {
    let rows = vec![row("x", 1.0, 3.0)];

    let untouched = normalize(rows.clone(), ChartKind::BarStacked);
    assert_eq!(untouched, rows);

    let normalized = normalize(rows, ChartKind::BarPercent);
    assert_eq!(normalized[0].get("a"), Some(25.0));
}
