use kd_common::parse_i64_flag;
use sqlx::SqliteConnection;

use super::settings;
use crate::{console_api::settings_api::LOW_STOCK_THRESHOLD_KEY, traits::DashboardStats};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 100;

/// The four dashboard counters. Callers run this inside one transaction so the figures are a consistent
/// snapshot; the function itself just issues the reads.
pub async fn fetch_stats(conn: &mut SqliteConnection) -> Result<DashboardStats, sqlx::Error> {
    let threshold = settings::fetch(LOW_STOCK_THRESHOLD_KEY, &mut *conn).await?.map(|s| s.value);
    let threshold = parse_i64_flag(threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(&mut *conn).await?;
    let pending_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE payment_status = 'Pending'")
        .fetch_one(&mut *conn)
        .await?;
    // strict <, so zero stock counts as low
    let low_stock_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE quantity < $1")
        .bind(threshold)
        .fetch_one(&mut *conn)
        .await?;
    let total_revenue: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(total_amount), 0) FROM orders WHERE payment_status = 'Confirmed'")
            .fetch_one(&mut *conn)
            .await?;
    Ok(DashboardStats { total_products, pending_orders, low_stock_items, total_revenue: total_revenue.into() })
}
