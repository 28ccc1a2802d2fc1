//! The visual compilation pipeline.
//!
//! ```text
//! Dataset rows ─▶ filter ─▶ aggregate ─▶ normalize ─▶ rank ─▶ truncate ─▶ ResultTable
//! ```
//!
//! [`compile`] is a pure function of its inputs: it reads the dataset and the
//! config, allocates fresh accumulator state, and never fails. Bad input
//! resolves to fallbacks (`"Unknown"` keys, zeros, excluded rows, or an empty
//! table) instead of errors.

pub mod aggregate;
pub mod filter;
pub mod normalize;
pub mod rank;

pub use aggregate::{Accumulator, UNKNOWN_KEY};
pub use rank::MAX_RESULT_ROWS;

use tracing::debug;

use crate::dataset::{Dataset, DatasetStore};
use crate::report::{PageId, Report, Visual, VisualId};
use crate::visual::{ResultTable, VisualConfig};

/// Compile a visual config against a dataset.
///
/// Returns an empty table without touching any row when the config has no
/// dimension or no measures.
pub fn compile(dataset: &Dataset, config: &VisualConfig) -> ResultTable {
    let Some(primary) = config.primary_measure() else {
        return ResultTable::empty();
    };
    if config.dimension.is_empty() {
        return ResultTable::empty();
    }

    let admitted = filter::apply(dataset.rows(), &config.filters);
    let grouped = aggregate::aggregate(
        admitted.iter().copied(),
        &config.dimension,
        &config.measures,
        config.aggregation,
    );
    let normalized = normalize::normalize(grouped, config.chart_kind);
    let ranked = rank::rank(normalized, primary);
    let rows = rank::truncate(ranked);

    debug!(
        dataset = %dataset.id(),
        rows = dataset.row_count(),
        admitted = admitted.len(),
        output = rows.len(),
        "compiled visual"
    );

    ResultTable::new(rows)
}

/// Compile a visual against whichever dataset it references.
///
/// A visual whose dataset is no longer in the store compiles to an empty
/// table.
pub fn compile_visual(store: &DatasetStore, visual: &Visual) -> ResultTable {
    match store.get(&visual.dataset_id) {
        Some(dataset) => compile(dataset, &visual.config),
        None => {
            debug!(visual = %visual.id, dataset = %visual.dataset_id, "dataset missing");
            ResultTable::empty()
        }
    }
}

/// Compile every visual on a page, in report order.
pub fn compile_page(
    store: &DatasetStore,
    report: &Report,
    page: &PageId,
) -> Vec<(VisualId, ResultTable)> {
    report
        .visuals_on_page(page)
        .map(|visual| (visual.id.clone(), compile_visual(store, visual)))
        .collect()
}
