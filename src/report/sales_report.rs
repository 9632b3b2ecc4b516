use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::analytics::{
    customer_analysis, daily_sales_trend, find_peak_sales_day, low_performing_products,
    region_average_order_value, region_wise_sales, sales_summary, top_selling_products,
    CustomerStats, DailyStats, PeakDay, ProductSales, RegionAverage, RegionStats, SalesSummary,
};
use crate::catalog::EnrichmentStats;
use crate::models::Transaction;
use crate::types::Money;

const WIDTH: usize = 44;
const CURRENCY: &str = "₹";

/// Every figure the text report shows, computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub generated_at: String,
    pub summary: SalesSummary,
    pub regions: Vec<RegionStats>,
    pub top_products: Vec<ProductSales>,
    pub top_customers: Vec<CustomerStats>,
    pub daily_trend: Vec<DailyStats>,
    pub peak_day: PeakDay,
    pub low_performers: Vec<ProductSales>,
    pub region_averages: Vec<RegionAverage>,
    pub enrichment: EnrichmentStats
}

impl ReportData {
    pub fn build(
        transactions: &[Transaction],
        enrichment: EnrichmentStats,
        top_n: usize,
        low_threshold: i64,
        generated_at: String
    ) -> Self {
        let mut top_customers = customer_analysis(transactions);
        top_customers.truncate(top_n);

        Self {
            generated_at,
            summary: sales_summary(transactions),
            regions: region_wise_sales(transactions),
            top_products: top_selling_products(transactions, top_n),
            top_customers,
            daily_trend: daily_sales_trend(transactions),
            peak_day: find_peak_sales_day(transactions),
            low_performers: low_performing_products(transactions, low_threshold),
            region_averages: region_average_order_value(transactions),
            enrichment
        }
    }
}

/// `₹1,234,567.89` style amount.
pub fn format_currency(amount: Money) -> String {
    let plain = amount.to_string();
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str())
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);

    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{CURRENCY}{grouped}.{fraction}")
}

fn write_section_title<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", "-".repeat(WIDTH))
}

pub fn render_sales_report<W: Write>(writer: &mut W, data: &ReportData) -> io::Result<()> {
    writeln!(writer, "{}", "=".repeat(WIDTH))?;
    writeln!(writer, "       SALES ANALYTICS REPORT")?;
    writeln!(writer, "     Generated: {}", data.generated_at)?;
    writeln!(writer, "     Records Processed: {}", data.summary.record_count)?;
    writeln!(writer, "{}", "=".repeat(WIDTH))?;
    writeln!(writer)?;

    write_section_title(writer, "OVERALL SUMMARY")?;
    writeln!(writer, "Total Revenue:        {}", format_currency(data.summary.total_revenue))?;
    writeln!(writer, "Total Transactions:   {}", data.summary.record_count)?;
    writeln!(writer, "Average Order Value:  {}", format_currency(data.summary.avg_order_value))?;
    match &data.summary.date_range {
        Some(range) => writeln!(writer, "Date Range:           {} to {}", range.first, range.last)?,
        None => writeln!(writer, "Date Range:           N/A")?
    }
    writeln!(writer)?;

    write_section_title(writer, "REGION-WISE PERFORMANCE")?;
    writeln!(writer, "{:<10}{:<15}{:<12}Transactions", "Region", "Sales", "% of Total")?;
    for region in &data.regions {
        writeln!(
            writer,
            "{:<10}{:<15}{:>8.2}%    {}",
            region.region,
            format_currency(region.total_sales),
            region.percentage,
            region.transaction_count
        )?;
    }
    writeln!(writer)?;

    write_section_title(writer, &format!("TOP {} PRODUCTS", data.top_products.len()))?;
    writeln!(writer, "{:<5}{:<25}{:<10}Revenue", "Rank", "Product", "Qty Sold")?;
    for (rank, product) in data.top_products.iter().enumerate() {
        writeln!(writer, "{:<5}{:<25}{:<10}{}", rank + 1, product.name, product.quantity, format_currency(product.revenue))?;
    }
    writeln!(writer)?;

    write_section_title(writer, &format!("TOP {} CUSTOMERS", data.top_customers.len()))?;
    writeln!(writer, "{:<5}{:<15}{:<15}Orders", "Rank", "Customer ID", "Total Spent")?;
    for (rank, customer) in data.top_customers.iter().enumerate() {
        writeln!(
            writer,
            "{:<5}{:<15}{:<15}{}",
            rank + 1,
            customer.customer_id,
            format_currency(customer.total_spent),
            customer.purchase_count
        )?;
    }
    writeln!(writer)?;

    write_section_title(writer, "DAILY SALES TREND")?;
    writeln!(writer, "{:<12}{:<15}{:<8}Customers", "Date", "Revenue", "Txns")?;
    for day in &data.daily_trend {
        writeln!(writer, "{:<12}{:<15}{:<8}{}", day.date, format_currency(day.revenue), day.transaction_count, day.unique_customers)?;
    }
    writeln!(writer)?;

    write_section_title(writer, "PRODUCT PERFORMANCE ANALYSIS")?;
    match &data.peak_day.date {
        Some(date) => writeln!(
            writer,
            "Best Selling Day: {date} ({}, {} transactions)",
            format_currency(data.peak_day.revenue),
            data.peak_day.transaction_count
        )?,
        None => writeln!(writer, "Best Selling Day: N/A")?
    }
    writeln!(writer, "Low Performing Products:")?;
    for product in &data.low_performers {
        writeln!(writer, " - {} ({} units, {})", product.name, product.quantity, format_currency(product.revenue))?;
    }
    writeln!(writer)?;
    writeln!(writer, "Average Transaction Value per Region:")?;
    for average in &data.region_averages {
        writeln!(writer, " - {}: {}", average.region, format_currency(average.avg_transaction_value))?;
    }
    writeln!(writer)?;

    write_section_title(writer, "API ENRICHMENT SUMMARY")?;
    writeln!(writer, "Total Products Enriched: {}", data.enrichment.total)?;
    writeln!(writer, "Success Rate: {:.2}%", data.enrichment.success_rate)?;
    writeln!(writer, "Failed Products:")?;
    for product in &data.enrichment.unmatched_products {
        writeln!(writer, " - {product}")?;
    }

    Ok(())
}

pub fn write_sales_report<P: AsRef<Path>>(path: P, data: &ReportData) -> io::Result<()> {
    let mut output = BufWriter::new(File::create(path)?);

    render_sales_report(&mut output, data)?;

    output.flush()
}
