//! Port interfaces for the product catalog read path

use apigate_domain::{Product, Result};
use async_trait::async_trait;

/// Read access to the remote product catalog
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// List every product with its attributes expanded
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Get a single product by name
    async fn get_product(&self, name: &str) -> Result<Product>;
}
