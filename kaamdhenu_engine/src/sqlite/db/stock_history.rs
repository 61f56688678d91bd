use chrono::Utc;
use sqlx::SqliteConnection;

use crate::db_types::{StockAction, StockHistory};

pub async fn insert(
    product_id: i64,
    action: StockAction,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<StockHistory, sqlx::Error> {
    sqlx::query_as(
        r#"
            INSERT INTO stock_history (product_id, action, quantity, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(product_id)
    .bind(action)
    .bind(quantity)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
}

pub async fn fetch_for_product(
    product_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<StockHistory>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM stock_history WHERE product_id = $1 ORDER BY id")
        .bind(product_id)
        .fetch_all(conn)
        .await
}
