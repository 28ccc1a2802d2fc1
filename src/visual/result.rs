// src/visual/result.rs
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One aggregated group: its key and one value per measure, in measure order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub name: String,
    pub values: Vec<(String, f64)>,
}

impl ResultRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, measure: impl Into<String>, value: f64) -> Self {
        self.values.push((measure.into(), value));
        self
    }

    /// Value of the first entry for `measure`.
    pub fn get(&self, measure: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(m, _)| m == measure)
            .map(|(_, v)| *v)
    }

    /// Sum of all measure values in this row.
    pub fn total(&self) -> f64 {
        self.values.iter().map(|(_, v)| *v).sum()
    }
}

/// Rows serialize flat: `{"name": "Eng", "salary": 300.0}`.
impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("name", &self.name)?;
        for (measure, value) in &self.values {
            map.serialize_entry(measure, value)?;
        }
        map.end()
    }
}

/// Final, ordered and capped output of compiling a visual.
///
/// An empty table means "no results", never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    /// Group keys in order.
    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }

    /// Sum of `measure` across all rows; the single figure a KPI card shows.
    pub fn total(&self, measure: &str) -> f64 {
        self.rows.iter().filter_map(|r| r.get(measure)).sum()
    }

    /// Render as an aligned text table with `precision` decimal places.
    ///
    /// `dimension` labels the key column; measures appear in the given order.
    pub fn render_text(&self, dimension: &str, measures: &[String], precision: usize) -> String {
        if self.rows.is_empty() {
            return "No results match the current filters\n".to_string();
        }

        let mut header: Vec<String> = vec![dimension.to_string()];
        header.extend(measures.iter().cloned());

        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.name.clone()];
                cells.extend(measures.iter().map(|m| match row.get(m) {
                    Some(v) => format!("{:.*}", precision, v),
                    None => String::new(),
                }));
                cells
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for cells in &body {
            push_line(&mut out, cells, &widths);
        }
        out
    }
}

// Key column left-aligned, measure columns right-aligned.
fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let formatted: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect();
    out.push_str(formatted.join("  ").trim_end());
    out.push('\n');
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl From<Vec<ResultRow>> for ResultTable {
    fn from(rows: Vec<ResultRow>) -> Self {
        Self::new(rows)
    }
}
