// src/visual/config.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ChartKind, Filter};
use crate::dataset::{ColumnType, Dataset};

/// Reduction applied per measure per group.
///
/// Unknown tags deserialize to [`Aggregation::Sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Aggregation {
    #[default]
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "SUM",
            Aggregation::Avg => "AVG",
            Aggregation::Count => "COUNT",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
        }
    }

    /// Parse a mode tag, falling back to `Sum` for anything unrecognised.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "AVG" => Aggregation::Avg,
            "COUNT" => Aggregation::Count,
            "MIN" => Aggregation::Min,
            "MAX" => Aggregation::Max,
            _ => Aggregation::Sum,
        }
    }
}

impl From<String> for Aggregation {
    fn from(tag: String) -> Self {
        Aggregation::parse(&tag)
    }
}

impl From<Aggregation> for String {
    fn from(agg: Aggregation) -> Self {
        agg.as_str().to_string()
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative description of one visual's query.
///
/// Treated as an immutable value: every edit produces a new config through
/// the `with_*` methods, which consume `self` and return the updated copy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualConfig {
    /// Column whose distinct values become group keys.
    #[serde(default)]
    pub dimension: String,
    /// Columns aggregated per group. The first one drives ranking.
    #[serde(default)]
    pub measures: Vec<String>,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default, rename = "type", alias = "chartKind")]
    pub chart_kind: ChartKind,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl VisualConfig {
    pub fn new(dimension: impl Into<String>, measures: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            dimension: dimension.into(),
            measures: measures.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Starting config for a new visual on `dataset`: the first string column
    /// as dimension and the first number column as the only measure.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let dimension = dataset
            .first_column_of(ColumnType::String)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let measure = dataset
            .first_column_of(ColumnType::Number)
            .map(|c| c.name.clone());
        Self::new(dimension, measure)
    }

    /// Whether the config can produce any rows at all.
    pub fn is_compilable(&self) -> bool {
        !self.dimension.is_empty() && !self.measures.is_empty()
    }

    /// The measure that drives ranking.
    pub fn primary_measure(&self) -> Option<&str> {
        self.measures.first().map(String::as_str)
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = dimension.into();
        self
    }

    pub fn with_measures(mut self, measures: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.measures = measures.into_iter().map(Into::into).collect();
        self
    }

    /// Append a measure unless it is already present.
    pub fn with_measure(mut self, measure: impl Into<String>) -> Self {
        let measure = measure.into();
        if !self.measures.contains(&measure) {
            self.measures.push(measure);
        }
        self
    }

    pub fn without_measure(mut self, measure: &str) -> Self {
        self.measures.retain(|m| m != measure);
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_chart_kind(mut self, chart_kind: ChartKind) -> Self {
        self.chart_kind = chart_kind;
        self
    }

    /// Append a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// Drop the filter with the given id.
    pub fn without_filter(mut self, id: &str) -> Self {
        self.filters.retain(|f| f.id != id);
        self
    }

    /// Replace the filter with the given id by `update(old)`.
    pub fn with_filter_updated(mut self, id: &str, update: impl FnOnce(Filter) -> Filter) -> Self {
        if let Some(index) = self.filters.iter().position(|f| f.id == id) {
            let old = self.filters.remove(index);
            self.filters.insert(index, update(old));
        }
        self
    }
}
