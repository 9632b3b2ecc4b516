mod aggregator;
mod grouping;

pub use aggregator::{
    customer_analysis, daily_sales_trend, find_peak_sales_day, low_performing_products,
    region_average_order_value, region_wise_sales, sales_summary, top_selling_products,
    CustomerStats, DailyStats, PeakDay, ProductSales, RegionAverage, RegionStats, SalesSummary,
    DEFAULT_LOW_PERFORMER_THRESHOLD, DEFAULT_TOP_PRODUCTS,
};
