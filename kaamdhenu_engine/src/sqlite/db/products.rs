use log::debug;
use sqlx::SqliteConnection;

use super::stock_history;
use crate::{
    db_types::{NewProduct, Product, ProductUpdate, StockAction},
    traits::CatalogError,
};

pub async fn fetch_all(district: Option<&str>, conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let products = match district {
        Some(d) => {
            sqlx::query_as("SELECT * FROM products WHERE district = $1 ORDER BY id").bind(d).fetch_all(conn).await?
        },
        None => sqlx::query_as("SELECT * FROM products ORDER BY id").fetch_all(conn).await?,
    };
    Ok(products)
}

pub async fn fetch_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = $1").bind(id).fetch_optional(conn).await
}

/// Composite-key lookup. `name` is compared case-insensitively (the column carries `COLLATE NOCASE`),
/// district and unique number exactly.
pub async fn fetch_by_name_district_unique(
    name: &str,
    district: &str,
    unique_number: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE name = $1 AND district = $2 AND unique_number = $3")
        .bind(name)
        .bind(district)
        .bind(unique_number)
        .fetch_optional(conn)
        .await
}

/// The next unique number for a (name, district) pair: one past the current maximum, starting at 1.
pub async fn next_unique_number(
    name: &str,
    district: &str,
    conn: &mut SqliteConnection,
) -> Result<i64, sqlx::Error> {
    let next: i64 =
        sqlx::query_scalar("SELECT COALESCE(MAX(unique_number), 0) + 1 FROM products WHERE name = $1 AND district = $2")
            .bind(name)
            .bind(district)
            .fetch_one(conn)
            .await?;
    Ok(next)
}

/// Inserts the catalog entry with the given unique number and logs the opening stock. Run inside the same
/// transaction as the [`next_unique_number`] call that produced the number.
pub async fn insert(
    product: NewProduct,
    unique_number: i64,
    conn: &mut SqliteConnection,
) -> Result<Product, CatalogError> {
    let product: Product = sqlx::query_as(
        r#"
            INSERT INTO products (name, quantity, district, added_by, price, unique_number, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(product.name)
    .bind(product.quantity)
    .bind(product.district)
    .bind(product.added_by)
    .bind(product.price)
    .bind(unique_number)
    .bind(product.category)
    .fetch_one(&mut *conn)
    .await?;
    stock_history::insert(product.id, StockAction::Add, product.quantity, &mut *conn).await?;
    debug!("🗄️ Product [{}/{}/{}] inserted with id {}", product.name, product.district, unique_number, product.id);
    Ok(product)
}

/// Merge-and-write partial update. A quantity change gets a stock-history entry; run inside a transaction.
pub async fn update(
    id: i64,
    update: ProductUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, CatalogError> {
    let Some(existing) = fetch_by_id(id, &mut *conn).await? else {
        return Ok(None);
    };
    let quantity_changed = update.quantity.is_some();
    let merged = Product {
        id: existing.id,
        name: update.name.unwrap_or(existing.name),
        quantity: update.quantity.unwrap_or(existing.quantity),
        district: update.district.unwrap_or(existing.district),
        added_by: update.added_by.unwrap_or(existing.added_by),
        price: update.price.unwrap_or(existing.price),
        unique_number: existing.unique_number,
        category: update.category.unwrap_or(existing.category),
    };
    let product: Product = sqlx::query_as(
        r#"
            UPDATE products
            SET name = $1, quantity = $2, district = $3, added_by = $4, price = $5, category = $6
            WHERE id = $7
            RETURNING *;
        "#,
    )
    .bind(merged.name)
    .bind(merged.quantity)
    .bind(merged.district)
    .bind(merged.added_by)
    .bind(merged.price)
    .bind(merged.category)
    .bind(id)
    .fetch_one(&mut *conn)
    .await?;
    if quantity_changed {
        stock_history::insert(id, StockAction::Update, product.quantity, &mut *conn).await?;
    }
    Ok(Some(product))
}

pub async fn delete(id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

/// Deducts stock if, and only if, enough is available. The guard lives in the `WHERE` clause, so the check
/// and the write are one atomic statement and quantity cannot be driven negative by concurrent orders.
/// Logs a `DEDUCT` stock-history entry on success; run inside a transaction.
pub async fn deduct_stock(id: i64, amount: i64, conn: &mut SqliteConnection) -> Result<Product, CatalogError> {
    let deducted: Option<Product> = sqlx::query_as(
        "UPDATE products SET quantity = quantity - $1 WHERE id = $2 AND quantity >= $1 RETURNING *",
    )
    .bind(amount)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    match deducted {
        Some(product) => {
            stock_history::insert(id, StockAction::Deduct, amount, &mut *conn).await?;
            Ok(product)
        },
        None => match fetch_by_id(id, conn).await? {
            Some(p) => Err(CatalogError::InsufficientStock {
                name: p.name,
                district: p.district,
                available: p.quantity,
                requested: amount,
            }),
            None => Err(CatalogError::ProductNotFound(id)),
        },
    }
}
