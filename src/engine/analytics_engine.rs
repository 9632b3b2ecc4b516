use std::path::Path;

use anyhow::bail;
use chrono::Local;
use tracing::{info, warn};

use crate::analytics::{DEFAULT_LOW_PERFORMER_THRESHOLD, DEFAULT_TOP_PRODUCTS};
use crate::catalog::{enrich_sales_data, enrichment_stats, EnrichedTransaction, ProductCatalog};
use crate::filters::{filter_choices, validate_and_filter, FilterOptions, FilterOutcome};
use crate::ingest::{parse_transactions, read_sales_data};
use crate::report::ReportData;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything produced by one pass over a sales file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsRun {
    /// Non-blank data lines read from the file.
    pub raw_lines: usize,
    /// Lines that parsed into transactions.
    pub parsed: usize,
    pub outcome: FilterOutcome,
    pub report: ReportData,
    pub enriched: Vec<EnrichedTransaction>
}

/// Runs the read, parse, filter, aggregate and enrich stages over a sales file.
pub struct AnalyticsEngine<C: ProductCatalog> {
    catalog: C,
    filters: FilterOptions,
    top_n: usize,
    low_threshold: i64
}

impl<C: ProductCatalog> AnalyticsEngine<C> {
    /// Creates a new engine that enriches against `catalog` and applies `filters`.
    pub fn new(catalog: C, filters: FilterOptions) -> Self {
        Self {
            catalog,
            filters,
            top_n: DEFAULT_TOP_PRODUCTS,
            low_threshold: DEFAULT_LOW_PERFORMER_THRESHOLD
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_low_threshold(mut self, low_threshold: i64) -> Self {
        self.low_threshold = low_threshold;
        self
    }

    /// Orchestrates the end-to-end analysis of one pipe-delimited sales file.
    pub fn run<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<AnalyticsRun> {
        let path = path.as_ref();

        let lines = read_sales_data(path)?;

        if lines.is_empty() {
            bail!("No data read from {}", path.display());
        }

        info!("Read {} transactions from {}", lines.len(), path.display());

        let transactions = parse_transactions(&lines);
        info!("Parsed {} records", transactions.len());

        let choices = filter_choices(&transactions);
        info!(
            "Filter options available: regions [{}], amounts {} to {}",
            choices.regions.join(", "),
            choices.min_amount.unwrap_or_default(),
            choices.max_amount.unwrap_or_default()
        );

        let outcome = validate_and_filter(&transactions, &self.filters);
        info!("Valid: {} | Invalid: {} | Filtered: {}", outcome.summary.final_count, outcome.invalid, outcome.summary.filtered);

        if self.catalog.is_empty() {
            warn!("Product catalog is empty, no transaction will be enriched");
        }

        let enriched = enrich_sales_data(&outcome.transactions, &self.catalog);
        let stats = enrichment_stats(&enriched);
        info!("Enriched {}/{} transactions ({}%)", stats.matched, stats.total, stats.success_rate);

        let report = ReportData::build(
            &outcome.transactions,
            stats,
            self.top_n,
            self.low_threshold,
            Local::now().format(TIMESTAMP_FORMAT).to_string()
        );

        Ok(AnalyticsRun {
            raw_lines: lines.len(),
            parsed: transactions.len(),
            outcome,
            report,
            enriched
        })
    }
}
