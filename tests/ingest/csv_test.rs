//! Tests for CSV ingestion.

use std::io::Write;

use mosaic::dataset::{ColumnType, DatasetStore, Value};
use mosaic::ingest::{import_csv, load_csv, parse_csv, CsvOptions, IngestError};
use tempfile::NamedTempFile;

fn parse(text: &str) -> Vec<mosaic::dataset::Record> {
    parse_csv(text.as_bytes(), &CsvOptions::default()).unwrap()
}

#[test]
fn test_numbers_and_text() {
    let rows = parse("dept,salary,code\nEng, 100 ,007\nSales,1e3,abc\n");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].value("dept"), &Value::from("Eng"));
    assert_eq!(rows[0].value("salary"), &Value::Number(100.0));
    assert_eq!(rows[0].value("code"), &Value::Number(7.0));
    assert_eq!(rows[1].value("salary"), &Value::Number(1000.0));
    assert_eq!(rows[1].value("code"), &Value::from("abc"));
}

#[test]
fn test_header_order_is_kept() {
    let rows = parse("z,a,m\n1,2,3\n");
    let keys: Vec<_> = rows[0].keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_quotes_are_stripped() {
    let rows = parse("\"name\",\"city\"\n\"Ada\",\"London, UK\"\n");
    assert_eq!(rows[0].value("name"), &Value::from("Ada"));
    assert_eq!(rows[0].value("city"), &Value::from("London, UK"));
}

#[test]
fn test_empty_cells_stay_text() {
    let rows = parse("a,b\n,2\n");
    assert_eq!(rows[0].value("a"), &Value::from(""));
    assert_eq!(rows[0].value("b"), &Value::Number(2.0));
}

#[test]
fn test_non_finite_words_stay_text() {
    let rows = parse("a,b\nInfinity,NaN\n");
    assert_eq!(rows[0].value("a"), &Value::from("Infinity"));
    assert_eq!(rows[0].value("b"), &Value::from("NaN"));
}

#[test]
fn test_short_and_long_rows() {
    let rows = parse("a,b,c\n1\n1,2,3,4\n");
    assert_eq!(rows[0].value("b"), &Value::Null);
    assert_eq!(rows[0].value("c"), &Value::Null);
    assert_eq!(rows[1].len(), 3);
    assert_eq!(rows[1].value("c"), &Value::Number(3.0));
}

#[test]
fn test_blank_lines_are_skipped() {
    let rows = parse("\na,b\n\n1,2\n   \n3,4\n");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].value("a"), &Value::Number(3.0));
}

#[test]
fn test_empty_input() {
    let err = parse_csv("".as_bytes(), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyInput));
    let err = parse_csv("\n\n".as_bytes(), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyInput));
}

#[test]
fn test_custom_delimiter() {
    let options = CsvOptions {
        delimiter: b';',
        trim: true,
    };
    let rows = parse_csv("a;b\n1,5;x\n".as_bytes(), &options).unwrap();
    assert_eq!(rows[0].value("a"), &Value::from("1,5"));
    assert_eq!(rows[0].value("b"), &Value::from("x"));
}

#[test]
fn test_invalid_utf8_is_a_parse_error() {
    let bytes: &[u8] = b"a,b\n\xff\xfe,1\n";
    let err = parse_csv(bytes, &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Parse { .. }), "{err}");
}

#[test]
fn test_load_csv_names_dataset_after_file() {
    let mut file = tempfile::Builder::new()
        .prefix("staff")
        .suffix(".csv")
        .tempfile()
        .unwrap();
    writeln!(file, "dept,salary").unwrap();
    writeln!(file, "Eng,100").unwrap();

    let (name, rows) = load_csv(file.path(), &CsvOptions::default()).unwrap();
    assert!(name.starts_with("staff") && name.ends_with(".csv"));
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_csv(&dir.path().join("nope.csv"), &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
}

#[test]
fn test_import_csv_infers_columns_from_first_row() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "dept,salary,note\nEng,100,x\nSales,oops,7\n").unwrap();

    let mut store = DatasetStore::new();
    let id = import_csv(&mut store, file.path(), &CsvOptions::default()).unwrap();

    let dataset = store.get(&id).unwrap();
    let types: Vec<_> = dataset
        .columns()
        .iter()
        .map(|c| (c.name.as_str(), c.column_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("dept", ColumnType::String),
            ("salary", ColumnType::Number),
            ("note", ColumnType::String),
        ]
    );
    assert_eq!(dataset.row_count(), 2);
}
