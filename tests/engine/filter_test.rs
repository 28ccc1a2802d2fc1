//! Tests for filter evaluation.

use mosaic::dataset::{Record, Value};
use mosaic::engine::filter::{admits, apply, evaluate};
use mosaic::visual::{Filter, FilterOperator};

fn row(name: &str, salary: f64) -> Record {
    Record::new().with("name", name).with("salary", salary)
}

#[test]
fn test_equals_is_case_insensitive() {
    let filter = Filter::new("name", FilterOperator::Equals, "ENG");
    assert!(evaluate(&filter, &row("eng", 1.0)));
    assert!(!evaluate(&filter, &row("engineering", 1.0)));
}

#[test]
fn test_contains_and_starts_with() {
    let contains = Filter::new("name", FilterOperator::Contains, "GIN");
    let starts = Filter::new("name", FilterOperator::StartsWith, "eN");

    assert!(evaluate(&contains, &row("Engineering", 1.0)));
    assert!(!evaluate(&contains, &row("Sales", 1.0)));
    assert!(evaluate(&starts, &row("Engineering", 1.0)));
    assert!(!evaluate(&starts, &row("Open", 1.0)));
}

#[test]
fn test_is_empty_matches_falsy_values() {
    let filter = Filter::new("name", FilterOperator::IsEmpty, "");
    assert!(evaluate(&filter, &Record::new().with("name", "")));
    assert!(evaluate(&filter, &Record::new()));
    assert!(evaluate(&filter, &Record::new().with("name", 0)));
    assert!(!evaluate(&filter, &row("x", 1.0)));
}

#[test]
fn test_gt_and_lt_coerce_numbers() {
    let gt = Filter::new("salary", FilterOperator::Gt, 60.0);
    let lt = Filter::new("salary", FilterOperator::Lt, "60");

    assert!(evaluate(&gt, &row("a", 100.0)));
    assert!(!evaluate(&gt, &row("a", 60.0)));
    assert!(evaluate(&lt, &row("a", 50.0)));
    assert!(evaluate(&gt, &Record::new().with("salary", " 61 ")));
}

#[test]
fn test_coercion_failure_excludes_row() {
    let gt = Filter::new("salary", FilterOperator::Gt, 0.0);
    let lt = Filter::new("salary", FilterOperator::Lt, 1e9);
    let bad = Record::new().with("salary", "n/a");

    assert!(!evaluate(&gt, &bad));
    assert!(!evaluate(&lt, &bad));
    assert!(!evaluate(&gt, &Record::new()));
}

#[test]
fn test_between_is_inclusive() {
    let filter = Filter::between("salary", 50.0, 100.0);
    assert!(evaluate(&filter, &row("a", 50.0)));
    assert!(evaluate(&filter, &row("a", 100.0)));
    assert!(evaluate(&filter, &row("a", 75.0)));
    assert!(!evaluate(&filter, &row("a", 100.5)));
    assert!(!evaluate(&filter, &row("a", 49.0)));
}

#[test]
fn test_numeric_equals_compares_text() {
    let filter = Filter::new("salary", FilterOperator::Equals, Value::Number(100.0));
    assert!(evaluate(&filter, &row("a", 100.0)));
    assert!(evaluate(&filter, &Record::new().with("salary", "100")));
    assert!(!evaluate(&filter, &Record::new().with("salary", "100.00")));
}

#[test]
fn test_is_true_and_is_false() {
    let is_true = Filter::new("active", FilterOperator::IsTrue, "");
    let is_false = Filter::new("active", FilterOperator::IsFalse, "");
    let yes = Record::new().with("active", true);
    let no = Record::new().with("active", false);

    assert!(evaluate(&is_true, &yes));
    assert!(!evaluate(&is_true, &no));
    assert!(evaluate(&is_false, &no));
    assert!(evaluate(&is_false, &Record::new()));
}

#[test]
fn test_filters_combine_with_and() {
    let filters = vec![
        Filter::new("salary", FilterOperator::Gt, 60.0),
        Filter::new("name", FilterOperator::StartsWith, "e"),
    ];

    assert!(admits(&filters, &row("Eng", 100.0)));
    assert!(!admits(&filters, &row("Sales", 100.0)));
    assert!(!admits(&filters, &row("Eng", 10.0)));
}

#[test]
fn test_no_filters_admit_everything() {
    let rows = vec![row("a", 1.0), row("b", 2.0)];
    assert_eq!(apply(&rows, &[]).len(), 2);
}

#[test]
fn test_apply_preserves_order() {
    let rows = vec![row("a", 70.0), row("b", 10.0), row("c", 90.0)];
    let kept = apply(&rows, &[Filter::new("salary", FilterOperator::Gt, 60.0)]);
    let names: Vec<_> = kept.iter().map(|r| r.value("name").to_text()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn test_unknown_operator_from_json_admits_rows() {
    let filter: Filter =
        serde_json::from_str(r#"{"id":"f1","column":"salary","operator":"REGEX","value":"^1"}"#)
            .unwrap();
    assert_eq!(filter.operator, FilterOperator::Unrecognized);
    assert!(evaluate(&filter, &row("a", 5.0)));
}
