//! Tests for report pages and visuals.

use mosaic::dataset::{Dataset, Record};
use mosaic::report::{PageId, Report, ReportError, VisualId, DEFAULT_VISUAL_TITLE};
use mosaic::visual::{Aggregation, ChartKind};

fn staff() -> Dataset {
    Dataset::new(
        "staff",
        vec![Record::new().with("dept", "Eng").with("salary", 100)],
    )
}

#[test]
fn test_new_report_has_one_page() {
    let report = Report::new();
    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].name, "Page 1");
    assert!(report.visuals.is_empty());
}

#[test]
fn test_add_page_numbers_by_count() {
    let mut report = Report::new();
    let second = report.add_page();
    report.add_page();

    let names: Vec<_> = report.pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Page 1", "Page 2", "Page 3"]);
    assert_eq!(report.page(&second).unwrap().name, "Page 2");
}

#[test]
fn test_last_page_cannot_be_removed() {
    let mut report = Report::new();
    let only = report.first_page().unwrap().id.clone();
    assert_eq!(report.remove_page(&only), Err(ReportError::LastPage));
    assert_eq!(report.pages.len(), 1);
}

#[test]
fn test_remove_unknown_page() {
    let mut report = Report::new();
    let ghost = PageId::from("page-ghost");
    assert_eq!(
        report.remove_page(&ghost),
        Err(ReportError::PageNotFound(ghost.clone()))
    );
}

#[test]
fn test_remove_page_drops_its_visuals() {
    let dataset = staff();
    let mut report = Report::new();
    let first = report.first_page().unwrap().id.clone();
    let second = report.add_page();
    let kept = report.add_visual(&first, &dataset).unwrap();
    report.add_visual(&second, &dataset).unwrap();
    report.add_visual(&second, &dataset).unwrap();

    let removed = report.remove_page(&second).unwrap();
    assert_eq!(removed.id, second);
    assert_eq!(report.visuals.len(), 1);
    assert_eq!(report.visuals[0].id, kept);
}

#[test]
fn test_add_visual_defaults() {
    let dataset = staff();
    let mut report = Report::new();
    let page = report.first_page().unwrap().id.clone();
    let id = report.add_visual(&page, &dataset).unwrap();

    let visual = report.visual(&id).unwrap();
    assert_eq!(visual.title, DEFAULT_VISUAL_TITLE);
    assert_eq!(&visual.dataset_id, dataset.id());
    assert_eq!(visual.page_id, page);
    assert_eq!(visual.config.dimension, "dept");
    assert_eq!(visual.config.measures, vec!["salary"]);
    assert_eq!(visual.config.aggregation, Aggregation::Sum);
    assert_eq!(visual.config.chart_kind, ChartKind::BarClustered);
}

#[test]
fn test_add_visual_to_unknown_page() {
    let mut report = Report::new();
    let ghost = PageId::from("page-ghost");
    assert!(matches!(
        report.add_visual(&ghost, &staff()),
        Err(ReportError::PageNotFound(_))
    ));
}

#[test]
fn test_update_and_rename_visual() {
    let dataset = staff();
    let mut report = Report::new();
    let page = report.first_page().unwrap().id.clone();
    let id = report.add_visual(&page, &dataset).unwrap();

    let updated = report
        .update_visual(&id, |c| c.with_chart_kind(ChartKind::Donut))
        .unwrap();
    assert_eq!(updated.config.chart_kind, ChartKind::Donut);
    assert_eq!(updated.config.dimension, "dept");

    report.rename_visual(&id, "Headcount").unwrap();
    assert_eq!(report.visual(&id).unwrap().title, "Headcount");

    let ghost = VisualId::from("ghost");
    assert_eq!(
        report.rename_visual(&ghost, "x"),
        Err(ReportError::VisualNotFound(ghost.clone()))
    );
}

#[test]
fn test_remove_visuals() {
    let a = staff();
    let b = staff();
    let mut report = Report::new();
    let page = report.first_page().unwrap().id.clone();
    let first = report.add_visual(&page, &a).unwrap();
    report.add_visual(&page, &b).unwrap();
    report.add_visual(&page, &b).unwrap();

    assert_eq!(report.remove_visuals_for_dataset(b.id()), 2);
    assert_eq!(report.visuals_on_page(&page).count(), 1);

    report.remove_visual(&first).unwrap();
    assert!(report.visuals.is_empty());
    assert!(report.remove_visual(&first).is_err());
}

#[test]
fn test_visual_json_flattens_config() {
    let dataset = staff();
    let mut report = Report::new();
    let page = report.first_page().unwrap().id.clone();
    let id = report.add_visual(&page, &dataset).unwrap();

    let json = serde_json::to_value(report.visual(&id).unwrap()).unwrap();
    assert_eq!(json["title"], DEFAULT_VISUAL_TITLE);
    assert_eq!(json["datasetId"], dataset.id().as_str());
    assert_eq!(json["dimension"], "dept");
    assert_eq!(json["type"], "BAR_CLUSTERED");

    let back: Report = serde_json::from_value(serde_json::to_value(&report).unwrap()).unwrap();
    assert_eq!(back, report);
}
