use super::errors::IngestError;
use super::{ensure_directories, parse_transactions, read_sales_data};

use std::io::Write;

use anyhow::Result;
use tempfile::{tempdir, NamedTempFile};

const HEADER: &str = "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region";

fn create_temporary_sales_file(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "{HEADER}")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

#[test]
fn test_read_skips_header_and_blank_rows() -> Result<()> {
    let file = create_temporary_sales_file(&[
        "T1|2024-01-01|P1|Widget|10|5.0|C1|North",
        "",
        "   ",
        "|||||||",
        "T2|2024-01-01|P2|Gadget|2|50.0|C2|South",
    ])?;

    let lines = read_sales_data(file.path())?;

    assert_eq!(lines, vec![
        "T1|2024-01-01|P1|Widget|10|5.0|C1|North".to_string(),
        "T2|2024-01-01|P2|Gadget|2|50.0|C2|South".to_string(),
    ]);

    Ok(())
}

#[test]
fn test_read_keeps_malformed_rows_for_the_parser() -> Result<()> {
    let file = create_temporary_sales_file(&[
        "T1|2024-01-01|P1|Widget|10|5.0|C1",
        "T2|2024-01-01|P2|\"Quoted\" Gadget|2|50.0|C2|South",
    ])?;

    let lines = read_sales_data(file.path())?;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "T1|2024-01-01|P1|Widget|10|5.0|C1");
    assert_eq!(lines[1], "T2|2024-01-01|P2|\"Quoted\" Gadget|2|50.0|C2|South");

    Ok(())
}

#[test]
fn test_read_reports_missing_file() {
    let result = read_sales_data("does/not/exist/sales_data.txt");

    assert!(matches!(result, Err(IngestError::NotFound { .. })));
}

#[test]
fn test_read_reports_non_utf8_content() -> Result<()> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "{HEADER}")?;
    file.write_all(b"T1|2024-01-01|P1|Caf\xe9|1|5.0|C1|North\n")?;

    let result = read_sales_data(file.path());

    assert!(matches!(result, Err(IngestError::Encoding { .. })));

    Ok(())
}

#[test]
fn test_parse_drops_unparsable_lines_and_preserves_order() {
    let lines = [
        "T1|2024-01-01|P1|Widget|10|5.0|C1|North",
        "T2|2024-01-01|P2|Gadget|2|50.0|C2",
        "T3|2024-01-02|P3|Gizmo|abc|1.0|C3|East",
        "T4|2024-01-02|P4|Doohickey|1|n/a|C4|West",
        "T5|2024-01-03|P5|Thing|3|1,250.00|C5|South",
    ];

    let transactions = parse_transactions(&lines);
    let ids: Vec<&str> = transactions.iter().map(|t| t.transaction_id.as_str()).collect();

    assert_eq!(ids, vec!["T1", "T5"]);
    assert_eq!(transactions.len(), lines.len() - 3);
}

#[test]
fn test_parse_of_empty_input_is_empty() {
    let lines: Vec<String> = Vec::new();

    assert!(parse_transactions(&lines).is_empty());
}

#[test]
fn test_ensure_directories_creates_missing_parents() -> Result<()> {
    let root = tempdir()?;
    let report = root.path().join("output").join("sales_report.txt");
    let enriched = root.path().join("data").join("nested").join("enriched.txt");

    ensure_directories(&[&report, &enriched])?;
    ensure_directories(&[&report])?;

    assert!(root.path().join("output").is_dir());
    assert!(root.path().join("data").join("nested").is_dir());
    assert!(ensure_directories(&["bare_file_name.txt"]).is_ok());

    Ok(())
}
