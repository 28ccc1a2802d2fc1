// src/visual/filter.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dataset::{ColumnType, Value};

/// Filter predicate operators.
///
/// Serialized as the upper-case tag (`"STARTS_WITH"`). A tag that is not
/// recognised deserializes to [`FilterOperator::Unrecognized`], which admits
/// every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    Equals,
    Contains,
    StartsWith,
    IsEmpty,
    Gt,
    Lt,
    Between,
    IsTrue,
    IsFalse,
    Unrecognized,
}

const STRING_OPERATORS: [FilterOperator; 4] = [
    FilterOperator::Equals,
    FilterOperator::Contains,
    FilterOperator::StartsWith,
    FilterOperator::IsEmpty,
];

const NUMBER_OPERATORS: [FilterOperator; 4] = [
    FilterOperator::Gt,
    FilterOperator::Lt,
    FilterOperator::Equals,
    FilterOperator::Between,
];

const BOOLEAN_OPERATORS: [FilterOperator; 2] = [FilterOperator::IsTrue, FilterOperator::IsFalse];

impl FilterOperator {
    /// Operators offered for a column of the given type, default first.
    pub fn for_column_type(column_type: ColumnType) -> &'static [FilterOperator] {
        match column_type {
            ColumnType::String => &STRING_OPERATORS,
            ColumnType::Number => &NUMBER_OPERATORS,
        }
    }

    /// Operators offered for boolean-like fields.
    pub fn boolean() -> &'static [FilterOperator] {
        &BOOLEAN_OPERATORS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "EQUALS",
            FilterOperator::Contains => "CONTAINS",
            FilterOperator::StartsWith => "STARTS_WITH",
            FilterOperator::IsEmpty => "IS_EMPTY",
            FilterOperator::Gt => "GT",
            FilterOperator::Lt => "LT",
            FilterOperator::Between => "BETWEEN",
            FilterOperator::IsTrue => "IS_TRUE",
            FilterOperator::IsFalse => "IS_FALSE",
            FilterOperator::Unrecognized => "UNRECOGNIZED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "Equals",
            FilterOperator::Contains => "Contains",
            FilterOperator::StartsWith => "Starts With",
            FilterOperator::IsEmpty => "Is Empty",
            FilterOperator::Gt => "Greater Than",
            FilterOperator::Lt => "Less Than",
            FilterOperator::Between => "Between",
            FilterOperator::IsTrue => "Is True",
            FilterOperator::IsFalse => "Is False",
            FilterOperator::Unrecognized => "Unrecognized",
        }
    }

    /// Parse an operator tag; unknown tags become `Unrecognized`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "EQUALS" => FilterOperator::Equals,
            "CONTAINS" => FilterOperator::Contains,
            "STARTS_WITH" => FilterOperator::StartsWith,
            "IS_EMPTY" => FilterOperator::IsEmpty,
            "GT" => FilterOperator::Gt,
            "LT" => FilterOperator::Lt,
            "BETWEEN" => FilterOperator::Between,
            "IS_TRUE" => FilterOperator::IsTrue,
            "IS_FALSE" => FilterOperator::IsFalse,
            _ => FilterOperator::Unrecognized,
        }
    }
}

impl From<String> for FilterOperator {
    fn from(tag: String) -> Self {
        FilterOperator::parse(&tag)
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single predicate over one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default)]
    pub id: String,
    pub column: String,
    pub operator: FilterOperator,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_secondary: Option<f64>,
}

impl Filter {
    /// Create a filter with a generated id.
    pub fn new(column: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            column: column.into(),
            operator,
            value: value.into(),
            value_secondary: None,
        }
    }

    /// Inclusive range filter.
    pub fn between(column: impl Into<String>, low: f64, high: f64) -> Self {
        Self::new(column, FilterOperator::Between, low).with_secondary(high)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_secondary(mut self, value: f64) -> Self {
        self.value_secondary = Some(value);
        self
    }

    /// Default filter for a column: its type's first operator, with `0` or
    /// empty text as the operand.
    pub fn default_for(column: &crate::dataset::Column) -> Self {
        let operator = FilterOperator::for_column_type(column.column_type)[0];
        let value = match column.column_type {
            ColumnType::Number => Value::Number(0.0),
            ColumnType::String => Value::Text(String::new()),
        };
        Self::new(column.name.clone(), operator, value)
    }
}
