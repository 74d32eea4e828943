use std::path::Path;

use anyhow::Result;

use crate::model::{FaqEntry, Product};
use crate::storage::load_products_jsonl;

/// Read-only view of the store catalog. The product fetch and the FAQ
/// collection load are separate because the FAQ side may be unavailable
/// independently; callers treat that as an empty list, not a failure.
pub trait ProductCatalog {
    fn product(&self, id: i64) -> Result<Option<Product>>;
    fn faqs(&self, id: i64) -> Result<Vec<FaqEntry>>;
}

/// In-memory catalog loaded from a JSONL product file; the backing store for
/// the CLI and the HTTP service.
#[derive(Debug, Clone, Default)]
pub struct JsonlCatalog {
    products: Vec<Product>,
}

impl JsonlCatalog {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            products: load_products_jsonl(path)?,
        })
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for JsonlCatalog {
    fn product(&self, id: i64) -> Result<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    fn faqs(&self, id: i64) -> Result<Vec<FaqEntry>> {
        Ok(self
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.faqs.clone())
            .unwrap_or_default())
    }
}
