// src/engine/aggregate.rs
//! Grouping by dimension value and per-measure reduction.

use std::collections::HashMap;

use tracing::trace;

use crate::dataset::Record;
use crate::visual::{Aggregation, ResultRow};

/// Group key used when the dimension field is missing, null or empty.
pub const UNKNOWN_KEY: &str = "Unknown";

/// Running statistics for one measure within one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    pub sum: f64,
    pub count: usize,
    pub min: f64,
    pub max: f64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Accumulator {
    /// Fold in a value. Non-finite values are skipped.
    pub fn push(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.sum += value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Final value for an aggregation mode. Modes with no valid input
    /// resolve to `0`.
    pub fn resolve(&self, aggregation: Aggregation) -> f64 {
        match aggregation {
            Aggregation::Sum => self.sum,
            Aggregation::Avg => {
                if self.count > 0 {
                    self.sum / self.count as f64
                } else {
                    0.0
                }
            }
            Aggregation::Count => self.count as f64,
            Aggregation::Min => {
                if self.min == f64::INFINITY {
                    0.0
                } else {
                    self.min
                }
            }
            Aggregation::Max => {
                if self.max == f64::NEG_INFINITY {
                    0.0
                } else {
                    self.max
                }
            }
        }
    }
}

/// The grouping key of a row: the string form of its dimension value, or
/// [`UNKNOWN_KEY`] when that value is blank.
pub fn dimension_key(row: &Record, dimension: &str) -> String {
    let value = row.value(dimension);
    if value.is_blank() {
        UNKNOWN_KEY.to_string()
    } else {
        value.to_text()
    }
}

struct Group {
    key: String,
    measures: Vec<Accumulator>,
}

/// Reduce rows into one result row per distinct dimension key.
///
/// Output order is the order in which keys were first seen. Each entry of
/// `measures` gets its own accumulator, so a measure listed twice appears
/// twice with equal values.
pub fn aggregate<'a>(
    rows: impl IntoIterator<Item = &'a Record>,
    dimension: &str,
    measures: &[String],
    aggregation: Aggregation,
) -> Vec<ResultRow> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let key = dimension_key(row, dimension);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    measures: vec![Accumulator::default(); measures.len()],
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[slot];
        for (acc, measure) in group.measures.iter_mut().zip(measures) {
            acc.push(row.value(measure).to_number());
        }
    }

    trace!(groups = groups.len(), %aggregation, "aggregated rows");

    groups
        .into_iter()
        .map(|group| ResultRow {
            name: group.key,
            values: measures
                .iter()
                .zip(&group.measures)
                .map(|(m, acc)| (m.clone(), acc.resolve(aggregation)))
                .collect(),
        })
        .collect()
}
