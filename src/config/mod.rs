
use std::convert::Infallible;
use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::analytics::{DEFAULT_LOW_PERFORMER_THRESHOLD, DEFAULT_TOP_PRODUCTS};
use crate::filters::{AmountRange, FilterOptions};
use crate::types::{Money, MoneyError};

/// Sales analytics over a pipe-delimited transaction file.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "sales-analytics", version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Config {
    /// Pipe-delimited sales file with a header row
    pub input: PathBuf,

    /// Pipe-delimited product catalog (id|title|category|brand|rating)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Keep only transactions from this region
    #[arg(long)]
    pub region: Option<String>,

    /// Keep only transactions worth at least this amount
    #[arg(long, value_parser = parse_amount)]
    pub min_amount: Option<Money>,

    /// Keep only transactions worth at most this amount
    #[arg(long, value_parser = parse_amount)]
    pub max_amount: Option<Money>,

    /// Number of top products and customers in the report
    #[arg(long = "top", default_value_t = DEFAULT_TOP_PRODUCTS)]
    pub top_n: usize,

    /// Units sold below which a product counts as low performing
    #[arg(long, default_value_t = DEFAULT_LOW_PERFORMER_THRESHOLD)]
    pub low_threshold: i64,

    #[arg(long = "report", default_value = "output/sales_report.txt")]
    pub report_path: PathBuf,

    #[arg(long = "enriched", default_value = "data/enriched_sales_data.txt")]
    pub enriched_path: PathBuf,

    /// One of error, warn, info, debug, trace
    #[arg(long, default_value = "error", value_parser = parse_log_level)]
    pub log_level: LevelFilter
}

impl Config {
    /// Region and amount filters for the run. A blank region filters nothing.
    pub fn filters(&self) -> FilterOptions {
        let region = self.region.as_deref()
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .map(str::to_string);

        FilterOptions {
            region,
            amount: AmountRange::new(self.min_amount, self.max_amount)
        }
    }
}

fn parse_amount(value: &str) -> Result<Money, MoneyError> {
    value.parse()
}

pub fn parse_log_level(level: &str) -> Result<LevelFilter, Infallible> {
    let level_filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    };

    Ok(level_filter)
}
