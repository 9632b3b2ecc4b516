use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::catalog::errors::CatalogError;
use crate::catalog::ProductCatalog;
use crate::models::{Transaction, FIELD_SEPARATOR};
use crate::types::{round_to_cents, Money};

const ENRICHED_HEADER: [&str; 12] = [
    "TransactionID", "Date", "ProductID", "ProductName", "Quantity", "UnitPrice",
    "CustomerID", "Region", "API_Category", "API_Brand", "API_Rating", "API_Match"
];

/// A transaction with the catalog attributes found for its product, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    pub transaction: Transaction,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<f64>,
    pub matched: bool
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichmentStats {
    pub total: usize,
    pub matched: usize,
    /// Matched share in percent, rounded to 2 places.
    pub success_rate: Decimal,
    /// Product names of unmatched transactions, in input order.
    pub unmatched_products: Vec<String>
}

#[derive(Serialize)]
struct EnrichedRow<'a> {
    transaction_id: &'a str,
    date: &'a str,
    product_id: &'a str,
    product_name: &'a str,
    quantity: i64,
    unit_price: Money,
    customer_id: &'a str,
    region: &'a str,
    category: Option<&'a str>,
    brand: Option<&'a str>,
    rating: Option<f64>,
    matched: &'static str
}

impl<'a> From<&'a EnrichedTransaction> for EnrichedRow<'a> {
    fn from(enriched: &'a EnrichedTransaction) -> Self {
        let transaction = &enriched.transaction;

        Self {
            transaction_id: &transaction.transaction_id,
            date: &transaction.date,
            product_id: &transaction.product_id,
            product_name: &transaction.product_name,
            quantity: transaction.quantity,
            unit_price: transaction.unit_price,
            customer_id: &transaction.customer_id,
            region: &transaction.region,
            category: enriched.category.as_deref(),
            brand: enriched.brand.as_deref(),
            rating: enriched.rating,
            matched: if enriched.matched { "Yes" } else { "No" }
        }
    }
}

/// Attaches catalog attributes to each transaction whose product id has the
/// form `P<number>` and whose number is in the catalog.
pub fn enrich_sales_data<C: ProductCatalog + ?Sized>(transactions: &[Transaction], catalog: &C) -> Vec<EnrichedTransaction> {
    transactions.iter()
        .map(|transaction| {
            let product = transaction.product_number().and_then(|id| catalog.lookup(id));

            if let Some(product) = product {
                debug!("Transaction [{}] matched catalog product [{}]", transaction.transaction_id, product.title());
            }

            EnrichedTransaction {
                transaction: transaction.clone(),
                category: product.map(|p| p.category().to_string()),
                brand: product.map(|p| p.brand().to_string()),
                rating: product.map(|p| p.rating()),
                matched: product.is_some()
            }
        })
        .collect()
}

pub fn enrichment_stats(enriched: &[EnrichedTransaction]) -> EnrichmentStats {
    let total = enriched.len();
    let matched = enriched.iter().filter(|e| e.matched).count();

    let success_rate = if total == 0 {
        Decimal::ZERO
    } else {
        round_to_cents(Decimal::from(matched as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64))
    };

    EnrichmentStats {
        total,
        matched,
        success_rate,
        unmatched_products: enriched.iter()
            .filter(|e| !e.matched)
            .map(|e| e.transaction.product_name.clone())
            .collect()
    }
}

/// Writes enriched records as a pipe-delimited file with a header row.
pub fn save_enriched_data<P: AsRef<Path>>(path: P, enriched: &[EnrichedTransaction]) -> Result<(), CatalogError> {
    let path = path.as_ref();

    let mut writer = WriterBuilder::new()
        .delimiter(FIELD_SEPARATOR as u8)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_path(path)
        .map_err(|error| CatalogError::write(path, error))?;

    writer.write_record(ENRICHED_HEADER)
        .map_err(|error| CatalogError::write(path, error))?;

    for record in enriched {
        writer.serialize(EnrichedRow::from(record))
            .map_err(|error| CatalogError::write(path, error))?;
    }

    writer.flush()
        .map_err(|error| CatalogError::write(path, error.into()))?;

    Ok(())
}
