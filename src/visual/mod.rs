//! Visual configuration and compiled results.
//!
//! A [`VisualConfig`] says what to compute; a [`ResultTable`] is what the
//! engine hands to the rendering layer.

mod chart;
mod config;
mod filter;
mod result;
mod validate;

pub use chart::{ChartCategory, ChartKind, ParseChartKindError};
pub use config::{Aggregation, VisualConfig};
pub use filter::{Filter, FilterOperator};
pub use result::{ResultRow, ResultTable};
pub use validate::{validate_config, ConfigWarning};
