mod sales_report;

pub use sales_report::{format_currency, write_sales_report, ReportData};
