//! # Mosaic
//!
//! A report visual engine: declarative visual configs compiled against
//! in-memory datasets into small, chart-ready result tables.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │           CSV file (ingest) / caller-built rows         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [type inference]
//! ┌─────────────────────────────────────────────────────────┐
//! │                DatasetStore (immutable)                 │
//! └─────────────────────────────────────────────────────────┘
//!                          │            ◀── VisualConfig (report)
//!                          ▼ [engine::compile]
//! ┌─────────────────────────────────────────────────────────┐
//! │   filter → aggregate → normalize → rank → truncate      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │             ResultTable (≤ 15 rows, to render)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use mosaic::dataset::{DatasetStore, Record};
//! use mosaic::engine::compile;
//! use mosaic::visual::{Aggregation, VisualConfig};
//!
//! let mut store = DatasetStore::new();
//! let dataset = store.add_dataset(
//!     "staff",
//!     vec![
//!         Record::new().with("dept", "Eng").with("salary", 100),
//!         Record::new().with("dept", "Eng").with("salary", 200),
//!         Record::new().with("dept", "Sales").with("salary", 50),
//!     ],
//! );
//!
//! let config = VisualConfig::new("dept", ["salary"]).with_aggregation(Aggregation::Avg);
//! let table = compile(dataset, &config);
//! assert_eq!(table.names(), vec!["Eng", "Sales"]);
//! assert_eq!(table.rows()[0].get("salary"), Some(150.0));
//! ```

pub mod config;
pub mod dataset;
pub mod engine;
pub mod ingest;
pub mod report;
pub mod storage;
pub mod visual;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::dataset::{Column, ColumnType, Dataset, DatasetId, DatasetStore, Record, Value};
    pub use crate::engine::{compile, compile_page, compile_visual, MAX_RESULT_ROWS};
    pub use crate::report::{Page, PageId, Report, Visual, VisualId};
    pub use crate::visual::{
        Aggregation, ChartKind, Filter, FilterOperator, ResultRow, ResultTable, VisualConfig,
    };
}

pub use engine::compile;
pub use visual::{ResultTable, VisualConfig};
