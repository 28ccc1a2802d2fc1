// src/engine/filter.rs
//! Row admission against a visual's filter list.

use crate::dataset::Record;
use crate::visual::{Filter, FilterOperator};

/// Evaluate one filter against one row.
///
/// String operators compare case-insensitively on the string form of both
/// sides. `GT`, `LT` and `BETWEEN` coerce both sides to numbers; a `NaN` on
/// either side makes the comparison false.
pub fn evaluate(filter: &Filter, row: &Record) -> bool {
    let cell = row.value(&filter.column);

    match filter.operator {
        FilterOperator::Equals => lowercase(&cell.to_text()) == lowercase(&filter.value.to_text()),
        FilterOperator::Contains => {
            lowercase(&cell.to_text()).contains(&lowercase(&filter.value.to_text()))
        }
        FilterOperator::StartsWith => {
            lowercase(&cell.to_text()).starts_with(&lowercase(&filter.value.to_text()))
        }
        FilterOperator::IsEmpty => !cell.is_truthy(),
        FilterOperator::Gt => cell.to_number() > filter.value.to_number(),
        FilterOperator::Lt => cell.to_number() < filter.value.to_number(),
        FilterOperator::Between => {
            let n = cell.to_number();
            let high = filter.value_secondary.unwrap_or(f64::NAN);
            n >= filter.value.to_number() && n <= high
        }
        FilterOperator::IsTrue => cell.is_truthy(),
        FilterOperator::IsFalse => !cell.is_truthy(),
        FilterOperator::Unrecognized => true,
    }
}

/// A row is admitted only if it passes every filter. No filters admit all.
pub fn admits(filters: &[Filter], row: &Record) -> bool {
    filters.iter().all(|f| evaluate(f, row))
}

/// Rows that pass every filter, in original order.
pub fn apply<'a>(rows: &'a [Record], filters: &[Filter]) -> Vec<&'a Record> {
    rows.iter().filter(|row| admits(filters, row)).collect()
}

fn lowercase(s: &str) -> String {
    s.to_lowercase()
}
