//! Multi-page reports of visuals.
//!
//! A [`Report`] owns its pages and visuals. Visuals reference datasets by
//! id only; removing a dataset from the store does not touch the report, and
//! a visual whose dataset is gone compiles to an empty table.

use serde::{Deserialize, Serialize};
use std::fmt;

use tracing::debug;

use crate::dataset::{Dataset, DatasetId};
use crate::visual::VisualConfig;

/// Title given to newly added visuals.
pub const DEFAULT_VISUAL_TITLE: &str = "New Comparison Visual";

/// Errors from report edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("Cannot remove the last page of a report")]
    LastPage,

    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Visual not found: {0}")]
    VisualNotFound(VisualId),
}

pub type ReportResult<T> = Result<T, ReportError>;

macro_rules! string_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn generate() -> Self {
                Self(format!("{}{}", $prefix, uuid::Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(PageId, "page-");
string_id!(VisualId, "");

/// A named page of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
}

/// A visual placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    pub id: VisualId,
    pub page_id: PageId,
    pub dataset_id: DatasetId,
    pub title: String,
    #[serde(flatten)]
    pub config: VisualConfig,
}

/// Pages and the visuals placed on them, in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub pages: Vec<Page>,
    pub visuals: Vec<Visual>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// A report with a single empty page named `Page 1`.
    pub fn new() -> Self {
        Self {
            pages: vec![Page {
                id: PageId::generate(),
                name: "Page 1".to_string(),
            }],
            visuals: Vec::new(),
        }
    }

    /// Rebuild from persisted parts.
    pub fn from_parts(pages: Vec<Page>, visuals: Vec<Visual>) -> Self {
        Self { pages, visuals }
    }

    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub fn visual(&self, id: &VisualId) -> Option<&Visual> {
        self.visuals.iter().find(|v| &v.id == id)
    }

    /// Append a page named `Page {n}` and return its id.
    pub fn add_page(&mut self) -> PageId {
        let page = Page {
            id: PageId::generate(),
            name: format!("Page {}", self.pages.len() + 1),
        };
        let id = page.id.clone();
        self.pages.push(page);
        id
    }

    /// Remove a page and every visual on it. The only page cannot be removed.
    pub fn remove_page(&mut self, id: &PageId) -> ReportResult<Page> {
        let index = self
            .pages
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| ReportError::PageNotFound(id.clone()))?;
        if self.pages.len() <= 1 {
            return Err(ReportError::LastPage);
        }
        let page = self.pages.remove(index);
        let before = self.visuals.len();
        self.visuals.retain(|v| &v.page_id != id);
        debug!(page = %id, dropped = before - self.visuals.len(), "removed page");
        Ok(page)
    }

    /// Place a new visual for `dataset` on a page, with a starting config
    /// derived from the dataset's columns.
    pub fn add_visual(&mut self, page: &PageId, dataset: &Dataset) -> ReportResult<VisualId> {
        if self.page(page).is_none() {
            return Err(ReportError::PageNotFound(page.clone()));
        }
        let visual = Visual {
            id: VisualId::generate(),
            page_id: page.clone(),
            dataset_id: dataset.id().clone(),
            title: DEFAULT_VISUAL_TITLE.to_string(),
            config: VisualConfig::for_dataset(dataset),
        };
        let id = visual.id.clone();
        self.visuals.push(visual);
        Ok(id)
    }

    pub fn remove_visual(&mut self, id: &VisualId) -> ReportResult<Visual> {
        let index = self
            .visuals
            .iter()
            .position(|v| &v.id == id)
            .ok_or_else(|| ReportError::VisualNotFound(id.clone()))?;
        Ok(self.visuals.remove(index))
    }

    /// Replace a visual's config with `update(old)`.
    pub fn update_visual(
        &mut self,
        id: &VisualId,
        update: impl FnOnce(VisualConfig) -> VisualConfig,
    ) -> ReportResult<&Visual> {
        let visual = self
            .visuals
            .iter_mut()
            .find(|v| &v.id == id)
            .ok_or_else(|| ReportError::VisualNotFound(id.clone()))?;
        let old = std::mem::take(&mut visual.config);
        visual.config = update(old);
        Ok(visual)
    }

    pub fn rename_visual(&mut self, id: &VisualId, title: impl Into<String>) -> ReportResult<()> {
        let visual = self
            .visuals
            .iter_mut()
            .find(|v| &v.id == id)
            .ok_or_else(|| ReportError::VisualNotFound(id.clone()))?;
        visual.title = title.into();
        Ok(())
    }

    pub fn visuals_on_page<'a>(&'a self, page: &'a PageId) -> impl Iterator<Item = &'a Visual> + 'a {
        self.visuals.iter().filter(move |v| &v.page_id == page)
    }

    /// Drop every visual that reads from `dataset`; returns how many.
    pub fn remove_visuals_for_dataset(&mut self, dataset: &DatasetId) -> usize {
        let before = self.visuals.len();
        self.visuals.retain(|v| &v.dataset_id != dataset);
        before - self.visuals.len()
    }
}
