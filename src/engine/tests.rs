use super::AnalyticsEngine;

use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use tempfile::NamedTempFile;

use crate::catalog::{InMemoryCatalog, ProductInfo};
use crate::filters::{AmountRange, FilterOptions};
use crate::types::Money;

fn create_temporary_sales_file(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_products(vec![ProductInfo {
        id: 1,
        title: Some("Widget Pro".to_string()),
        category: Some("tools".to_string()),
        brand: Some("Acme".to_string()),
        rating: Some(4.5)
    }])
}

const SAMPLE_ROWS: [&str; 5] = [
    "T1|2024-01-01|P1|Widget|10|5.0|C1|North",
    "T2|2024-01-01|P2|Gadget|2|50.0|C2|South",
    "T3|2024-01-02|P1|Widget|3|5.0|C2",
    "T4|2024-01-02|P3|Gizmo|1|20.0|X1|North",
    "T5|2024-01-03|P1|Widget|1|5.0|C3|North",
];

#[test]
fn test_engine_processes_valid_file_successfully() -> Result<()> {
    let file = create_temporary_sales_file(&SAMPLE_ROWS)?;
    let engine = AnalyticsEngine::new(sample_catalog(), FilterOptions::default());

    let run = engine.run(file.path())?;

    assert_eq!(run.raw_lines, 5);
    assert_eq!(run.parsed, 4);
    assert_eq!(run.outcome.invalid, 1);
    assert_eq!(run.outcome.summary.final_count, 3);
    assert_eq!(run.report.summary.total_revenue, Money::from_str("155.00")?);
    assert_eq!(run.report.regions[0].region, "South");
    assert_eq!(run.report.peak_day.date.as_deref(), Some("2024-01-01"));
    assert_eq!(run.enriched.len(), 3);
    assert_eq!(run.report.enrichment.matched, 2);

    Ok(())
}

#[test]
fn test_engine_applies_filters_before_aggregation() -> Result<()> {
    let file = create_temporary_sales_file(&SAMPLE_ROWS)?;
    let filters = FilterOptions {
        region: Some("North".to_string()),
        amount: AmountRange::new(Some(Money::from(10)), None)
    };

    let run = AnalyticsEngine::new(InMemoryCatalog::new(), filters).run(file.path())?;

    assert_eq!(run.outcome.summary.final_count, 1);
    assert_eq!(run.outcome.summary.filtered, 2);
    assert_eq!(run.report.summary.total_revenue, Money::from(50));
    assert_eq!(run.report.enrichment.matched, 0);

    Ok(())
}

#[test]
fn test_engine_honours_top_n_and_low_threshold() -> Result<()> {
    let file = create_temporary_sales_file(&SAMPLE_ROWS)?;

    let run = AnalyticsEngine::new(InMemoryCatalog::new(), FilterOptions::default())
        .with_top_n(1)
        .with_low_threshold(3)
        .run(file.path())?;

    assert_eq!(run.report.top_products.len(), 1);
    assert_eq!(run.report.top_products[0].name, "Widget");
    assert_eq!(run.report.top_customers.len(), 1);
    assert_eq!(run.report.low_performers.len(), 1);
    assert_eq!(run.report.low_performers[0].name, "Gadget");

    Ok(())
}

#[test]
fn test_engine_fails_on_missing_file() {
    let engine = AnalyticsEngine::new(InMemoryCatalog::new(), FilterOptions::default());

    assert!(engine.run("missing_sales_data.txt").is_err());
}

#[test]
fn test_engine_fails_on_file_without_data() -> Result<()> {
    let file = create_temporary_sales_file(&[])?;
    let engine = AnalyticsEngine::new(InMemoryCatalog::new(), FilterOptions::default());

    assert!(engine.run(file.path()).is_err());

    Ok(())
}
