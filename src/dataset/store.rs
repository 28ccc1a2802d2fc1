// src/dataset/store.rs
use tracing::debug;

use super::{Dataset, DatasetId, Record};

/// The set of datasets available to a report.
///
/// Datasets are added, replaced whole, or removed; their rows are never
/// edited in place.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    datasets: Vec<Dataset>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from rows and add it to the store.
    ///
    /// Column types are inferred from `rows[0]`. The new dataset receives a
    /// freshly generated identifier.
    pub fn add_dataset(&mut self, name: impl Into<String>, rows: Vec<Record>) -> &Dataset {
        let dataset = Dataset::new(name, rows);
        debug!(
            id = %dataset.id(),
            name = dataset.name(),
            rows = dataset.row_count(),
            columns = dataset.columns().len(),
            "added dataset"
        );
        self.datasets.push(dataset);
        &self.datasets[self.datasets.len() - 1]
    }

    /// Insert a prebuilt dataset, replacing any dataset with the same id.
    pub fn insert(&mut self, dataset: Dataset) -> &Dataset {
        let index = match self.datasets.iter().position(|d| d.id() == dataset.id()) {
            Some(index) => {
                debug!(id = %dataset.id(), "replaced dataset");
                self.datasets[index] = dataset;
                index
            }
            None => {
                self.datasets.push(dataset);
                self.datasets.len() - 1
            }
        };
        &self.datasets[index]
    }

    /// Drop a dataset. Visuals that reference it are left alone.
    pub fn remove_dataset(&mut self, id: &DatasetId) -> Option<Dataset> {
        let index = self.datasets.iter().position(|d| d.id() == id)?;
        debug!(%id, "removed dataset");
        Some(self.datasets.remove(index))
    }

    pub fn get(&self, id: &DatasetId) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id() == id)
    }

    /// Datasets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
