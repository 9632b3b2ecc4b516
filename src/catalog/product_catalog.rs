use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::errors::CatalogError;
use crate::catalog::ProductCatalog;
use crate::models::FIELD_SEPARATOR;

const NOT_AVAILABLE: &str = "N/A";

/// Catalog attributes for one product, as read from a catalog file with the
/// header `id|title|category|brand|rating`. Blank or missing columns are `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductInfo {
    pub id: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub rating: Option<f64>
}

impl ProductInfo {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn brand(&self) -> &str {
        self.brand.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn rating(&self) -> f64 {
        self.rating.unwrap_or_default()
    }
}

/// A product catalog held entirely in memory, keyed by numeric product id.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: HashMap<u32, ProductInfo>
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            products: HashMap::new()
        }
    }

    /// Builds the id mapping. A later entry for the same id replaces an earlier one.
    pub fn from_products(products: Vec<ProductInfo>) -> Self {
        let products = products.into_iter()
            .map(|product| (product.id, product))
            .collect();

        Self { products }
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn lookup(&self, product_id: u32) -> Option<&ProductInfo> {
        self.products.get(&product_id)
    }

    fn len(&self) -> usize {
        self.products.len()
    }
}

/// Loads a pipe-delimited catalog file. Rows that do not deserialize are skipped.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<InMemoryCatalog, CatalogError> {
    let path = path.as_ref();

    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_SEPARATOR as u8)
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|error| CatalogError::read(path, error))?;

    let mut products = Vec::new();

    for result in reader.deserialize::<ProductInfo>() {
        match result {
            Ok(product) => products.push(product),
            Err(error) => {
                warn!("Catalog deserialization error: {error}");
            }
        }
    }

    debug!("Loaded {} catalog entries from {}", products.len(), path.display());

    Ok(InMemoryCatalog::from_products(products))
}
