mod enrichment;
mod errors;
mod product_catalog;

pub use enrichment::{enrich_sales_data, enrichment_stats, save_enriched_data, EnrichedTransaction, EnrichmentStats};
pub use product_catalog::{load_catalog, InMemoryCatalog, ProductInfo};

/// Looks up catalog attributes by the numeric part of a product id.
pub trait ProductCatalog {
    fn lookup(&self, product_id: u32) -> Option<&ProductInfo>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
