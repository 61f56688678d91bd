use chrono::Utc;
use kd_common::Rupees;
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderUpdate, PaymentStatus},
    helpers::phone_variants,
};

pub async fn fetch_all(district: Option<&str>, conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = match district {
        Some(d) => {
            sqlx::query_as("SELECT * FROM orders WHERE district = $1 ORDER BY created_at, id")
                .bind(d)
                .fetch_all(conn)
                .await?
        },
        None => sqlx::query_as("SELECT * FROM orders ORDER BY created_at, id").fetch_all(conn).await?,
    };
    Ok(orders)
}

pub async fn fetch_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await
}

pub async fn fetch_by_payment_status(
    status: PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE payment_status = $1 ORDER BY created_at, id")
        .bind(status)
        .fetch_all(conn)
        .await
}

/// Inserts a new order with `Pending`/`Processing` initial statuses and the server-computed total. This is
/// not atomic on its own; intake embeds it in the same transaction as the stock deductions.
pub async fn insert(
    order: NewOrder,
    product_ids: &str,
    total_amount: Rupees,
    conn: &mut SqliteConnection,
) -> Result<Order, sqlx::Error> {
    let now = Utc::now();
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                telegram_id, name, address, order_details, product_ids, total_amount,
                payment_status, order_status, phone, district, date_ordered, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, 'Pending', 'Processing', $7, $8, $9, $9)
            RETURNING *;
        "#,
    )
    .bind(order.telegram_id)
    .bind(order.name)
    .bind(order.address)
    .bind(order.order_details)
    .bind(product_ids)
    .bind(total_amount)
    .bind(order.phone)
    .bind(order.district)
    .bind(now)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Order inserted with id {}", order.id);
    Ok(order)
}

/// The payment-matching lookup: the oldest `Pending` order whose total matches exactly and whose stored
/// phone is any of the `+91`-tolerant representations of the notification's phone.
pub async fn fetch_pending_match(
    amount: Rupees,
    phone: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let [raw, prefixed, stripped] = phone_variants(phone);
    sqlx::query_as(
        r#"
            SELECT * FROM orders
            WHERE total_amount = $1 AND payment_status = 'Pending' AND phone IN ($2, $3, $4)
            ORDER BY created_at, id
            LIMIT 1;
        "#,
    )
    .bind(amount)
    .bind(raw)
    .bind(prefixed)
    .bind(stripped)
    .fetch_optional(conn)
    .await
}

/// Writes the supplied status fields. Returns `None` if the order does not exist.
pub async fn update_statuses(
    id: i64,
    update: OrderUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    match (update.payment_status, update.order_status) {
        (Some(ps), Some(os)) => {
            sqlx::query_as("UPDATE orders SET payment_status = $1, order_status = $2 WHERE id = $3 RETURNING *")
                .bind(ps)
                .bind(os)
                .bind(id)
                .fetch_optional(conn)
                .await
        },
        (Some(ps), None) => {
            sqlx::query_as("UPDATE orders SET payment_status = $1 WHERE id = $2 RETURNING *")
                .bind(ps)
                .bind(id)
                .fetch_optional(conn)
                .await
        },
        (None, Some(os)) => {
            sqlx::query_as("UPDATE orders SET order_status = $1 WHERE id = $2 RETURNING *")
                .bind(os)
                .bind(id)
                .fetch_optional(conn)
                .await
        },
        (None, None) => fetch_by_id(id, conn).await,
    }
}

/// Flips a `Pending` order to `Confirmed`. The status guard is in the `WHERE` clause, so a concurrent
/// confirmation or cancellation makes this return `None` rather than double-confirming.
pub async fn confirm_pending(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE orders SET payment_status = 'Confirmed' WHERE id = $1 AND payment_status = 'Pending' RETURNING *",
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}
