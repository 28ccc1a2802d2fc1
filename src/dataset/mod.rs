//! Immutable tabular datasets.
//!
//! A [`Dataset`] is created once from a list of [`Record`]s and never
//! changes afterwards. Column types are inferred from the first row at
//! creation time and are not revisited.

mod record;
mod store;
mod value;

pub use record::Record;
pub use store::DatasetStore;
pub use value::{format_number, parse_numeric_cell, strip_quotes, Value};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque dataset identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(String);

impl DatasetId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatasetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DatasetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Inferred column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
}

impl ColumnType {
    /// Infer a column type from a sample value.
    pub fn infer(sample: &Value) -> Self {
        if sample.is_numeric_like() {
            ColumnType::Number
        } else {
            ColumnType::String
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

/// A named table of rows with inferred column types.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    id: DatasetId,
    name: String,
    columns: Vec<Column>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Build a dataset with a fresh identifier, inferring column types from
    /// the first row.
    pub fn new(name: impl Into<String>, rows: Vec<Record>) -> Self {
        Self::with_id(DatasetId::generate(), name, rows)
    }

    /// Build a dataset with a caller-chosen identifier.
    pub fn with_id(id: DatasetId, name: impl Into<String>, rows: Vec<Record>) -> Self {
        let columns = infer_columns(&rows);
        Self {
            id,
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn id(&self) -> &DatasetId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// First column of the given type, in column order.
    pub fn first_column_of(&self, column_type: ColumnType) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_type == column_type)
    }
}

fn infer_columns(rows: &[Record]) -> Vec<Column> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    first
        .iter()
        .map(|(name, value)| Column {
            name: name.to_string(),
            column_type: ColumnType::infer(value),
        })
        .collect()
}
