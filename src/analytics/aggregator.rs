use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::analytics::grouping::Groups;
use crate::models::Transaction;
use crate::types::Money;

pub const DEFAULT_TOP_PRODUCTS: usize = 5;
pub const DEFAULT_LOW_PERFORMER_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    pub region: String,
    pub total_sales: Money,
    pub transaction_count: usize,
    /// Share of the grand total in percent, rounded to 2 places.
    pub percentage: Decimal
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
    pub revenue: Money
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerStats {
    pub customer_id: String,
    pub total_spent: Money,
    pub purchase_count: usize,
    pub avg_order_value: Money,
    /// Distinct product names, sorted.
    pub products_bought: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub date: String,
    pub revenue: Money,
    pub transaction_count: usize,
    pub unique_customers: usize
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeakDay {
    pub date: Option<String>,
    pub revenue: Money,
    pub transaction_count: usize
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub first: String,
    pub last: String
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesSummary {
    pub record_count: usize,
    pub total_revenue: Money,
    pub avg_order_value: Money,
    pub date_range: Option<DateRange>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAverage {
    pub region: String,
    pub avg_transaction_value: Money
}

#[derive(Debug, Default)]
struct SalesTotals {
    revenue: Money,
    count: usize
}

#[derive(Debug, Default)]
struct ProductTotals {
    quantity: i64,
    revenue: Money
}

#[derive(Debug, Default)]
struct CustomerTotals {
    spent: Money,
    count: usize,
    products: BTreeSet<String>
}

#[derive(Debug, Default)]
struct DailyTotals {
    revenue: Money,
    count: usize,
    customers: HashSet<String>
}

fn sale_amount(transaction: &Transaction) -> Money {
    transaction.amount().unwrap_or_else(|error| {
        warn!("Transaction [{}] contributes nothing to aggregates: {error}", transaction.transaction_id);
        Money::ZERO
    })
}

fn sum_amounts(transactions: &[Transaction]) -> Money {
    let mut total = Money::ZERO;

    for transaction in transactions {
        total += sale_amount(transaction);
    }

    total
}

fn totals_by_region(transactions: &[Transaction]) -> Vec<(String, SalesTotals)> {
    let mut groups = Groups::<SalesTotals>::new();

    for transaction in transactions {
        let totals = groups.entry(&transaction.region);
        totals.revenue += sale_amount(transaction);
        totals.count += 1;
    }

    let mut entries = groups.into_entries();
    entries.sort_by(|(_, a), (_, b)| b.revenue.cmp(&a.revenue));
    entries
}

fn totals_by_product(transactions: &[Transaction]) -> Vec<(String, ProductTotals)> {
    let mut groups = Groups::<ProductTotals>::new();

    for transaction in transactions {
        let totals = groups.entry(&transaction.product_name);
        totals.quantity = totals.quantity.saturating_add(transaction.quantity);
        totals.revenue += sale_amount(transaction);
    }

    groups.into_entries()
}

fn to_product_sales((name, totals): (String, ProductTotals)) -> ProductSales {
    ProductSales {
        name,
        quantity: totals.quantity,
        revenue: totals.revenue.rounded()
    }
}

/// Sum of all sale amounts, rounded to cents.
pub fn calculate_total_revenue(transactions: &[Transaction]) -> Money {
    sum_amounts(transactions).rounded()
}

/// Sales per region, largest first. Ties keep first-seen order.
pub fn region_wise_sales(transactions: &[Transaction]) -> Vec<RegionStats> {
    let grand_total = sum_amounts(transactions);

    totals_by_region(transactions)
        .into_iter()
        .map(|(region, totals)| RegionStats {
            region,
            total_sales: totals.revenue.rounded(),
            transaction_count: totals.count,
            percentage: totals.revenue.percentage_of(grand_total)
        })
        .collect()
}

/// The `n` products with the most units sold. Ties keep first-seen order.
pub fn top_selling_products(transactions: &[Transaction], n: usize) -> Vec<ProductSales> {
    let mut products = totals_by_product(transactions);
    products.sort_by(|(_, a), (_, b)| b.quantity.cmp(&a.quantity));

    products.into_iter()
        .take(n)
        .map(to_product_sales)
        .collect()
}

/// Spending per customer, biggest spender first. Ties keep first-seen order.
pub fn customer_analysis(transactions: &[Transaction]) -> Vec<CustomerStats> {
    let mut groups = Groups::<CustomerTotals>::new();

    for transaction in transactions {
        let totals = groups.entry(&transaction.customer_id);
        totals.spent += sale_amount(transaction);
        totals.count += 1;
        totals.products.insert(transaction.product_name.clone());
    }

    let mut customers = groups.into_entries();
    customers.sort_by(|(_, a), (_, b)| b.spent.cmp(&a.spent));

    customers.into_iter()
        .map(|(customer_id, totals)| CustomerStats {
            customer_id,
            total_spent: totals.spent.rounded(),
            purchase_count: totals.count,
            avg_order_value: totals.spent.average_over(totals.count).rounded(),
            products_bought: totals.products.into_iter().collect()
        })
        .collect()
}

/// Revenue, volume and distinct customers per date, in date order.
pub fn daily_sales_trend(transactions: &[Transaction]) -> Vec<DailyStats> {
    let mut groups = Groups::<DailyTotals>::new();

    for transaction in transactions {
        let totals = groups.entry(&transaction.date);
        totals.revenue += sale_amount(transaction);
        totals.count += 1;
        totals.customers.insert(transaction.customer_id.clone());
    }

    let mut days = groups.into_entries();
    days.sort_by(|(a, _), (b, _)| a.cmp(b));

    days.into_iter()
        .map(|(date, totals)| DailyStats {
            date,
            revenue: totals.revenue.rounded(),
            transaction_count: totals.count,
            unique_customers: totals.customers.len()
        })
        .collect()
}

/// The day with the highest revenue. The earliest date wins a tie.
pub fn find_peak_sales_day(transactions: &[Transaction]) -> PeakDay {
    let mut peak = PeakDay::default();

    for day in daily_sales_trend(transactions) {
        if day.revenue > peak.revenue {
            peak = PeakDay {
                date: Some(day.date),
                revenue: day.revenue,
                transaction_count: day.transaction_count
            };
        }
    }

    peak
}

/// Products that sold fewer than `threshold` units, fewest first.
pub fn low_performing_products(transactions: &[Transaction], threshold: i64) -> Vec<ProductSales> {
    let mut products: Vec<_> = totals_by_product(transactions)
        .into_iter()
        .filter(|(_, totals)| totals.quantity < threshold)
        .collect();

    products.sort_by_key(|(_, totals)| totals.quantity);

    products.into_iter()
        .map(to_product_sales)
        .collect()
}

pub fn sales_summary(transactions: &[Transaction]) -> SalesSummary {
    let total = sum_amounts(transactions);

    let first = transactions.iter().map(|t| &t.date).min();
    let last = transactions.iter().map(|t| &t.date).max();

    let date_range = first.zip(last).map(|(first, last)| DateRange {
        first: first.clone(),
        last: last.clone()
    });

    SalesSummary {
        record_count: transactions.len(),
        total_revenue: calculate_total_revenue(transactions),
        avg_order_value: total.average_over(transactions.len()).rounded(),
        date_range
    }
}

/// Mean sale amount per region, in the same order as [`region_wise_sales`].
pub fn region_average_order_value(transactions: &[Transaction]) -> Vec<RegionAverage> {
    totals_by_region(transactions)
        .into_iter()
        .map(|(region, totals)| RegionAverage {
            region,
            avg_transaction_value: totals.revenue.average_over(totals.count).rounded()
        })
        .collect()
}
