// src/engine/rank.rs
use std::cmp::Ordering;

use crate::visual::ResultRow;

/// Fixed cap on the number of rows a compiled visual returns.
pub const MAX_RESULT_ROWS: usize = 15;

/// Stable sort, descending by `measure`. Rows lacking the measure, or
/// holding `NaN` for it, rank as `0`.
pub fn rank(mut rows: Vec<ResultRow>, measure: &str) -> Vec<ResultRow> {
    rows.sort_by(|a, b| {
        let a = sort_key(a, measure);
        let b = sort_key(b, measure);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
    rows
}

fn sort_key(row: &ResultRow, measure: &str) -> f64 {
    match row.get(measure) {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Keep the first [`MAX_RESULT_ROWS`] rows.
pub fn truncate(mut rows: Vec<ResultRow>) -> Vec<ResultRow> {
    rows.truncate(MAX_RESULT_ROWS);
    rows
}
