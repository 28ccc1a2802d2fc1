// src/engine/normalize.rs
use crate::visual::{ChartKind, ResultRow};

/// Rewrite each row's measures as percentages of the row total.
///
/// Produces new rows; rows whose total is `0` get `0` for every measure.
pub fn percent_of_whole(rows: &[ResultRow]) -> Vec<ResultRow> {
    rows.iter().map(normalize_row).collect()
}

/// Apply [`percent_of_whole`] only for percent chart kinds.
pub fn normalize(rows: Vec<ResultRow>, chart_kind: ChartKind) -> Vec<ResultRow> {
    if chart_kind.is_percent() {
        percent_of_whole(&rows)
    } else {
        rows
    }
}

fn normalize_row(row: &ResultRow) -> ResultRow {
    let total = row.total();
    ResultRow {
        name: row.name.clone(),
        values: row
            .values
            .iter()
            .map(|(m, v)| {
                let share = if total == 0.0 { 0.0 } else { v / total * 100.0 };
                (m.clone(), share)
            })
            .collect(),
    }
}
