mod analytics;
mod catalog;
mod config;
mod engine;
mod filters;
mod ingest;
mod models;
mod report;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::catalog::{load_catalog, save_enriched_data, InMemoryCatalog};
use crate::config::Config;
use crate::engine::{AnalyticsEngine, AnalyticsRun};
use crate::ingest::ensure_directories;
use crate::report::{format_currency, write_sales_report};

fn main() -> Result<()> {
    //NOTE: The filters that used to be asked for interactively are plain options now, so a run can be scripted.
    let config = Config::parse();

    setup_logging(config.log_level);

    ensure_directories(&[&config.report_path, &config.enriched_path])?;

    let catalog = match &config.catalog {
        Some(path) => load_catalog(path)?,
        None => InMemoryCatalog::new()
    };

    let engine = AnalyticsEngine::new(catalog, config.filters())
        .with_top_n(config.top_n)
        .with_low_threshold(config.low_threshold);

    let timer = Instant::now();
    let run = engine.run(&config.input)?;
    let duration = timer.elapsed();

    info!("Processed transactions in: {duration:?}");

    save_enriched_data(&config.enriched_path, &run.enriched)?;
    write_sales_report(&config.report_path, &run.report)?;

    write_summary_to_stdout(&config, &run)?;

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout only carries the run summary, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_summary_to_stdout(config: &Config, run: &AnalyticsRun) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());
    let summary = &run.outcome.summary;

    writeln!(output, "Records read: {}", run.raw_lines)?;
    writeln!(output, "Records parsed: {}", run.parsed)?;
    writeln!(output, "Valid: {} | Invalid: {} | Filtered: {}", summary.final_count, summary.invalid, summary.filtered)?;
    writeln!(output, "Total revenue: {}", format_currency(run.report.summary.total_revenue))?;
    writeln!(output, "Enriched: {}/{}", run.report.enrichment.matched, run.report.enrichment.total)?;
    writeln!(output, "Enriched data: {}", config.enriched_path.display())?;
    writeln!(output, "Report: {}", config.report_path.display())?;

    output.flush()?;

    Ok(())
}
