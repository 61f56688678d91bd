use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewTransaction, Transaction};

/// Appends a ledger entry. There is deliberately no update function in this module: the ledger is
/// append-only.
pub async fn insert(transaction: NewTransaction, conn: &mut SqliteConnection) -> Result<Transaction, sqlx::Error> {
    let now = Utc::now();
    let transaction: Transaction = sqlx::query_as(
        r#"
            INSERT INTO transactions (
                amount, sender_phone, upi_id, transaction_id, sms_phone,
                date_received, order_id, status, created_at, note
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $6, $9)
            RETURNING *;
        "#,
    )
    .bind(transaction.amount)
    .bind(transaction.sender_phone)
    .bind(transaction.upi_id)
    .bind(transaction.transaction_id)
    .bind(transaction.sms_phone)
    .bind(now)
    .bind(transaction.order_id)
    .bind(transaction.status)
    .bind(transaction.note)
    .fetch_one(conn)
    .await?;
    debug!("📒️ Transaction #{} recorded as {}", transaction.id, transaction.status);
    Ok(transaction)
}

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM transactions ORDER BY created_at, id").fetch_all(conn).await
}

pub async fn fetch_unmatched(conn: &mut SqliteConnection) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM transactions WHERE status = 'Unmatched' ORDER BY created_at, id")
        .fetch_all(conn)
        .await
}
