use thiserror::Error;

use crate::db_types::{NewProduct, Product, ProductUpdate, StockHistory};

/// Catalog reads and writes, including the atomic stock-deduction primitive.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// All products, optionally restricted to one district.
    async fn fetch_products(&self, district: Option<&str>) -> Result<Vec<Product>, CatalogError>;

    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogError>;

    /// Creates the catalog entry, assigning the next unique number for its (name, district) pair and writing
    /// an `ADD` stock-history entry, all in one transaction.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogError>;

    /// Applies the supplied fields. A quantity change writes an `UPDATE` stock-history entry.
    /// Returns `None` if the product does not exist.
    async fn update_product(&self, id: i64, update: ProductUpdate) -> Result<Option<Product>, CatalogError>;

    /// Returns false if the product did not exist.
    async fn delete_product(&self, id: i64) -> Result<bool, CatalogError>;

    /// Composite-key lookup: case-insensitive name, exact district, exact unique number.
    async fn find_product(
        &self,
        name: &str,
        district: &str,
        unique_number: i64,
    ) -> Result<Option<Product>, CatalogError>;

    /// Deducts `amount` from the product's stock if, and only if, at least that much is available. The check
    /// and the write are atomic with respect to other stock operations on the same product, so quantity can
    /// never go negative. A `DEDUCT` stock-history entry is written alongside.
    async fn deduct_stock(&self, product_id: i64, amount: i64) -> Result<Product, CatalogError>;

    async fn fetch_stock_history(&self, product_id: i64) -> Result<Vec<StockHistory>, CatalogError>;
}

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("We have an internal database problem: {0}")]
    DatabaseError(String),
    #[error("Product with id {0} does not exist")]
    ProductNotFound(i64),
    #[error("Product {name} not found in {district} with unique number {unique_number}")]
    ProductNotInCatalog { name: String, district: String, unique_number: i64 },
    #[error("Insufficient stock for {name} in {district}. Available: {available}, Requested: {requested}")]
    InsufficientStock { name: String, district: String, available: i64, requested: i64 },
    #[error("Invalid product data: {0}")]
    InvalidProduct(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        CatalogError::DatabaseError(e.to_string())
    }
}
