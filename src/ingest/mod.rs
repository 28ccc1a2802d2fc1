//! CSV ingestion.
//!
//! Turns comma-separated text into [`Record`]s ready for
//! [`DatasetStore::add_dataset`]. The first non-blank line is the header.
//! Every cell is trimmed and has surrounding double quotes stripped; a
//! non-empty cell that parses as a finite number becomes a number, anything
//! else stays text. Cells missing from short rows are `Null`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dataset::{parse_numeric_cell, strip_quotes, DatasetId, DatasetStore, Record, Value};

/// Errors surfaced to the user when a file cannot become a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV input was empty")]
    EmptyInput,

    #[error("CSV input has a header but no data rows")]
    NoDataRows,

    #[error("CSV parse error at row {row}: {reason}")]
    Parse { row: u64, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// CSV reading options.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Trim whitespace around cells and header names.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

/// Parse CSV text into records.
pub fn parse_csv<R: Read>(reader: R, options: &CsvOptions) -> IngestResult<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut line: u64 = 0;

    loop {
        match csv_reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(e) => return Err(map_csv_error(e, line + 1)),
        }
        line += 1;

        if is_blank(&record) {
            continue;
        }

        match &header {
            None => {
                header = Some(record.iter().map(|h| clean_cell(h, options).to_string()).collect());
            }
            Some(names) => {
                if record.len() > names.len() {
                    warn!(row = line, extra = record.len() - names.len(), "ignoring extra cells");
                }
                let row: Record = names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), convert_cell(record.get(i), options)))
                    .collect();
                rows.push(row);
            }
        }
    }

    if header.is_none() {
        return Err(IngestError::EmptyInput);
    }
    if rows.is_empty() {
        return Err(IngestError::NoDataRows);
    }
    Ok(rows)
}

/// Read a CSV file, returning the dataset name (the file name) and its rows.
pub fn load_csv(path: &Path, options: &CsvOptions) -> IngestResult<(String, Vec<Record>)> {
    let file = File::open(path)?;
    let rows = parse_csv(BufReader::new(file), options)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!(path = %path.display(), rows = rows.len(), "loaded csv");
    Ok((name, rows))
}

/// Read a CSV file straight into a store.
pub fn import_csv(
    store: &mut DatasetStore,
    path: &Path,
    options: &CsvOptions,
) -> IngestResult<DatasetId> {
    let (name, rows) = load_csv(path, options)?;
    Ok(store.add_dataset(name, rows).id().clone())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn clean_cell<'a>(raw: &'a str, options: &CsvOptions) -> &'a str {
    let trimmed = if options.trim { raw.trim() } else { raw };
    strip_quotes(trimmed)
}

fn convert_cell(raw: Option<&str>, options: &CsvOptions) -> Value {
    let Some(raw) = raw else {
        return Value::Null;
    };
    let cell = clean_cell(raw, options);
    match parse_numeric_cell(cell) {
        Some(n) => Value::Number(n),
        None => Value::Text(cell.to_string()),
    }
}

fn map_csv_error(err: csv::Error, fallback_row: u64) -> IngestError {
    let reason = err.to_string();
    let row = err
        .position()
        .map(|p| p.record() + 1)
        .unwrap_or(fallback_row);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => IngestError::Io(e),
        _ => IngestError::Parse { row, reason },
    }
}
