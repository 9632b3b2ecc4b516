use std::fs::{create_dir_all, File};
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use tracing::debug;

use crate::ingest::errors::IngestError;
use crate::models::{Transaction, FIELD_SEPARATOR};

/// Reads a header-prefixed, pipe-delimited sales file into raw lines.
///
/// The header row and rows made only of blank fields are dropped. Rows are
/// re-joined with `|` without checking their field count so the parser stays
/// the single place that decides whether a line is well formed.
pub fn read_sales_data<P: AsRef<Path>>(path: P) -> Result<Vec<String>, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|error| IngestError::io(path, error))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_SEPARATOR as u8)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(BufReader::new(file));

    let separator = FIELD_SEPARATOR.to_string();
    let mut lines = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|error| IngestError::csv(path, error))?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        lines.push(record.iter().collect::<Vec<_>>().join(&separator));
    }

    debug!("Read {} raw lines from {}", lines.len(), path.display());

    Ok(lines)
}

/// Turns raw lines into transactions, silently dropping lines that do not parse.
pub fn parse_transactions<S: AsRef<str>>(lines: &[S]) -> Vec<Transaction> {
    lines.iter()
        .enumerate()
        .filter_map(|(index, line)| match Transaction::from_str(line.as_ref()) {
            Ok(transaction) => Some(transaction),
            Err(error) => {
                debug!("Skipping line {}: {error}", index + 1);
                None
            }
        })
        .collect()
}

/// Creates the parent directory of every output file.
pub fn ensure_directories<P: AsRef<Path>>(files: &[P]) -> Result<(), IngestError> {
    for file in files {
        if let Some(parent) = file.as_ref().parent().filter(|parent| !parent.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(|error| IngestError::io(parent, error))?;
        }
    }

    Ok(())
}
