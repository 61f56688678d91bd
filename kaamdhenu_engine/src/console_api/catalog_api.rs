use log::*;

use crate::{
    db_types::{NewProduct, Product, ProductUpdate, StockHistory},
    traits::{CatalogError, CatalogManagement},
};

/// Catalog CRUD. The store assigns ids and unique numbers; this layer only validates the submission shape.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub async fn fetch_products(&self, district: Option<&str>) -> Result<Vec<Product>, CatalogError> {
        self.db.fetch_products(district).await
    }

    pub async fn fetch_product(&self, id: i64) -> Result<Option<Product>, CatalogError> {
        self.db.fetch_product(id).await
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        validate_product_fields(&product.name, product.quantity, product.price.value())?;
        let product = self.db.create_product(product).await?;
        debug!("🗄️ Product #{} ({}) added to the {} catalog", product.id, product.name, product.district);
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, update: ProductUpdate) -> Result<Option<Product>, CatalogError> {
        if update.is_empty() {
            return Err(CatalogError::InvalidProduct("No fields to update".to_string()));
        }
        if let Some(q) = update.quantity {
            if q < 0 {
                return Err(CatalogError::InvalidProduct(format!("Quantity cannot be negative (got {q})")));
            }
        }
        if let Some(p) = update.price {
            if !p.is_positive() {
                return Err(CatalogError::InvalidProduct(format!("Price must be positive (got {p})")));
            }
        }
        self.db.update_product(id, update).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<bool, CatalogError> {
        self.db.delete_product(id).await
    }

    pub async fn fetch_stock_history(&self, product_id: i64) -> Result<Vec<StockHistory>, CatalogError> {
        self.db.fetch_stock_history(product_id).await
    }
}

fn validate_product_fields(name: &str, quantity: i64, price: i64) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::InvalidProduct("Product name cannot be empty".to_string()));
    }
    if quantity < 0 {
        return Err(CatalogError::InvalidProduct(format!("Quantity cannot be negative (got {quantity})")));
    }
    if price <= 0 {
        return Err(CatalogError::InvalidProduct(format!("Price must be positive (got {price})")));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::validate_product_fields;

    #[test]
    fn submission_shape_checks() {
        assert!(validate_product_fields("Potato", 150, 45).is_ok());
        assert!(validate_product_fields("", 150, 45).is_err());
        assert!(validate_product_fields("Potato", -1, 45).is_err());
        assert!(validate_product_fields("Potato", 150, 0).is_err());
    }
}
