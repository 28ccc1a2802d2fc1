//! End-to-end tests for visual compilation.

use mosaic::dataset::{Dataset, DatasetStore, Record};
use mosaic::engine::{compile, compile_page, compile_visual};
use mosaic::report::Report;
use mosaic::visual::{Aggregation, ChartKind, Filter, FilterOperator, ResultRow, VisualConfig};

fn staff() -> Dataset {
    Dataset::new(
        "staff",
        vec![
            Record::new().with("dept", "Eng").with("salary", 100),
            Record::new().with("dept", "Eng").with("salary", 200),
            Record::new().with("dept", "Sales").with("salary", 50),
        ],
    )
}

fn pairs(rows: &[ResultRow], measure: &str) -> Vec<(String, f64)> {
    rows.iter()
        .map(|r| (r.name.clone(), r.get(measure).unwrap()))
        .collect()
}

#[test]
fn test_sum_by_department() {
    let table = compile(&staff(), &VisualConfig::new("dept", ["salary"]));
    assert_eq!(
        pairs(table.rows(), "salary"),
        vec![("Eng".to_string(), 300.0), ("Sales".to_string(), 50.0)]
    );
}

#[test]
fn test_avg_by_department() {
    let config = VisualConfig::new("dept", ["salary"]).with_aggregation(Aggregation::Avg);
    let table = compile(&staff(), &config);
    assert_eq!(
        pairs(table.rows(), "salary"),
        vec![("Eng".to_string(), 150.0), ("Sales".to_string(), 50.0)]
    );
}

#[test]
fn test_filter_removes_group_entirely() {
    let config = VisualConfig::new("dept", ["salary"])
        .with_filter(Filter::new("salary", FilterOperator::Gt, 60.0));
    let table = compile(&staff(), &config);
    assert_eq!(
        pairs(table.rows(), "salary"),
        vec![("Eng".to_string(), 300.0)]
    );
}

#[test]
fn test_percent_chart_normalizes_per_row() {
    let dataset = Dataset::new(
        "split",
        vec![
            Record::new().with("k", "x").with("a", 30).with("b", 70),
            Record::new().with("k", "y").with("a", 0).with("b", 0),
        ],
    );
    let config = VisualConfig::new("k", ["a", "b"]).with_chart_kind(ChartKind::BarPercent);
    let table = compile(&dataset, &config);

    assert_eq!(table.names(), vec!["x", "y"]);
    assert_eq!(table.rows()[0].get("a"), Some(30.0));
    assert_eq!(table.rows()[0].get("b"), Some(70.0));
    assert_eq!(table.rows()[1].get("a"), Some(0.0));
    assert_eq!(table.rows()[1].get("b"), Some(0.0));
}

#[test]
fn test_twenty_groups_truncate_to_top_fifteen() {
    let rows: Vec<Record> = (1..=20)
        .map(|i| Record::new().with("g", format!("g{i}")).with("v", i))
        .collect();
    let dataset = Dataset::new("many", rows);
    let table = compile(&dataset, &VisualConfig::new("g", ["v"]));

    assert_eq!(table.len(), 15);
    let values: Vec<f64> = table.iter().map(|r| r.get("v").unwrap()).collect();
    let expected: Vec<f64> = (6..=20).rev().map(f64::from).collect();
    assert_eq!(values, expected);
}

#[test]
fn test_empty_dimension_or_measures_short_circuit() {
    let dataset = staff();
    assert!(compile(&dataset, &VisualConfig::new("", ["salary"])).is_empty());
    assert!(compile(&dataset, &VisualConfig::new("dept", Vec::<String>::new())).is_empty());
}

#[test]
fn test_filter_that_matches_nothing_yields_empty_table() {
    let config = VisualConfig::new("dept", ["salary"])
        .with_filter(Filter::new("dept", FilterOperator::Equals, "Legal"));
    assert!(compile(&staff(), &config).is_empty());
}

#[test]
fn test_string_measure_resolves_to_zero() {
    let config = VisualConfig::new("salary", ["dept"]);
    let table = compile(&staff(), &config);
    assert!(table.iter().all(|r| r.get("dept") == Some(0.0)));
    assert_eq!(table.names(), vec!["100", "200", "50"]);
}

#[test]
fn test_compile_is_idempotent() {
    let dataset = staff();
    let config = VisualConfig::new("dept", ["salary"]).with_aggregation(Aggregation::Max);
    assert_eq!(compile(&dataset, &config), compile(&dataset, &config));
}

#[test]
fn test_compile_visual_with_missing_dataset_is_empty() {
    let mut store = DatasetStore::new();
    let id = store.add_dataset("staff", staff().rows().to_vec()).id().clone();

    let mut report = Report::new();
    let page = report.first_page().unwrap().id.clone();
    let visual_id = report
        .add_visual(&page, store.get(&id).unwrap())
        .unwrap();

    let visual = report.visual(&visual_id).unwrap().clone();
    assert_eq!(compile_visual(&store, &visual).len(), 2);

    store.remove_dataset(&id);
    assert!(compile_visual(&store, &visual).is_empty());
}

#[test]
fn test_compile_page_covers_only_that_page() {
    let mut store = DatasetStore::new();
    let dataset = store.add_dataset("staff", staff().rows().to_vec());

    let mut report = Report::new();
    let first = report.first_page().unwrap().id.clone();
    let second = report.add_page();
    let a = report.add_visual(&first, dataset).unwrap();
    let b = report.add_visual(&first, dataset).unwrap();
    report.add_visual(&second, dataset).unwrap();

    let compiled = compile_page(&store, &report, &first);
    let ids: Vec<_> = compiled.iter().map(|(id, _)| id.clone()).collect();
    assert_eq!(ids, vec![a, b]);
    assert!(compiled.iter().all(|(_, table)| table.len() == 2));
}
