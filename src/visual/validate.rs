// src/visual/validate.rs
//! Advisory checks of a visual config against its dataset.
//!
//! Compilation never consults these; a config with warnings still compiles
//! to whatever the pipeline produces (often an "Unknown" group or zeros).

use super::{FilterOperator, VisualConfig};
use crate::dataset::{ColumnType, Dataset};

/// A problem a configuration surface may want to show the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The config has no dimension or no measures and compiles to nothing.
    Incomplete,
    /// A referenced column does not exist in the dataset.
    UnknownColumn { role: String, column: String },
    /// The dimension column is numeric.
    NumericDimension { column: String },
    /// A measure column is a string column.
    NonNumericMeasure { column: String },
    /// The operator is not among those offered for the column's type.
    OperatorMismatch {
        column: String,
        column_type: ColumnType,
        operator: FilterOperator,
    },
    /// A BETWEEN filter has no upper bound and therefore rejects every row.
    MissingUpperBound { column: String },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::Incomplete => {
                write!(f, "Visual needs a dimension and at least one measure")
            }
            ConfigWarning::UnknownColumn { role, column } => {
                write!(f, "{} references unknown column '{}'", role, column)
            }
            ConfigWarning::NumericDimension { column } => {
                write!(f, "Dimension '{}' is a number column", column)
            }
            ConfigWarning::NonNumericMeasure { column } => {
                write!(f, "Measure '{}' is not a number column", column)
            }
            ConfigWarning::OperatorMismatch {
                column,
                column_type,
                operator,
            } => {
                write!(
                    f,
                    "Filter on {} column '{}' uses operator {}",
                    column_type, column, operator
                )
            }
            ConfigWarning::MissingUpperBound { column } => {
                write!(f, "BETWEEN filter on '{}' has no upper bound", column)
            }
        }
    }
}

/// Check a config against a dataset's columns.
pub fn validate_config(config: &VisualConfig, dataset: &Dataset) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if !config.is_compilable() {
        warnings.push(ConfigWarning::Incomplete);
    }

    if !config.dimension.is_empty() {
        match dataset.column(&config.dimension) {
            None => warnings.push(ConfigWarning::UnknownColumn {
                role: "Dimension".to_string(),
                column: config.dimension.clone(),
            }),
            Some(col) if col.column_type == ColumnType::Number => {
                warnings.push(ConfigWarning::NumericDimension {
                    column: col.name.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for measure in &config.measures {
        match dataset.column(measure) {
            None => warnings.push(ConfigWarning::UnknownColumn {
                role: "Measure".to_string(),
                column: measure.clone(),
            }),
            Some(col) if col.column_type == ColumnType::String => {
                warnings.push(ConfigWarning::NonNumericMeasure {
                    column: col.name.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for filter in &config.filters {
        let Some(col) = dataset.column(&filter.column) else {
            warnings.push(ConfigWarning::UnknownColumn {
                role: "Filter".to_string(),
                column: filter.column.clone(),
            });
            continue;
        };
        let offered = FilterOperator::for_column_type(col.column_type)
            .iter()
            .chain(FilterOperator::boolean());
        if !offered.into_iter().any(|op| *op == filter.operator) {
            warnings.push(ConfigWarning::OperatorMismatch {
                column: col.name.clone(),
                column_type: col.column_type,
                operator: filter.operator,
            });
        }
        if filter.operator == FilterOperator::Between && filter.value_secondary.is_none() {
            warnings.push(ConfigWarning::MissingUpperBound {
                column: col.name.clone(),
            });
        }
    }

    warnings
}
